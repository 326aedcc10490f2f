//! In-process document store with optimistic transactions.
//!
//! Used by tests, the simulator and single-node deployments. Every committed
//! write stamps the document with a fresh version; a transaction commits only
//! if the version it read is still current.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use tracing::debug;

use super::{ChangeCallback, DocKey, DocumentStore, Subscription, SubscriptionRegistry, TxnFn, TxnWrite};
use crate::config::GameConfig;
use crate::error::AppError;
use crate::errors::domain::{ConflictKind, DomainError};

pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Result of trying to commit one transaction attempt.
enum Commit {
    Conflict,
    Unchanged,
    Changed(Option<Value>),
}

#[derive(Debug, Clone)]
struct Versioned {
    version: u64,
    value: Value,
}

pub struct InMemoryStore {
    docs: Mutex<HashMap<DocKey, Versioned>>,
    next_version: AtomicU64,
    max_attempts: u32,
    registry: Arc<SubscriptionRegistry>,
    injected_conflicts: Mutex<HashMap<DocKey, u32>>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS)
    }
}

impl InMemoryStore {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            docs: Mutex::new(HashMap::new()),
            next_version: AtomicU64::new(1),
            max_attempts: max_attempts.max(1),
            registry: Arc::new(SubscriptionRegistry::new()),
            injected_conflicts: Mutex::new(HashMap::new()),
        }
    }

    /// Store retrying each transaction up to `config.txn_max_attempts` times.
    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.txn_max_attempts)
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Pretend another writer commits to `key` between the read and the
    /// commit of the next `times` transaction attempts.
    pub fn inject_conflicts(&self, key: &DocKey, times: u32) {
        self.injected_conflicts.lock().insert(key.clone(), times);
    }

    /// Committed version of a document, if present.
    pub fn version(&self, key: &DocKey) -> Option<u64> {
        self.docs.lock().get(key).map(|d| d.version)
    }

    pub fn len(&self) -> usize {
        self.docs.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn bump(&self) -> u64 {
        self.next_version.fetch_add(1, Ordering::Relaxed)
    }

    fn snapshot(&self, key: &DocKey) -> (Option<Value>, u64) {
        match self.docs.lock().get(key) {
            Some(doc) => (Some(doc.value.clone()), doc.version),
            None => (None, 0),
        }
    }

    fn take_injected_conflict(&self, key: &DocKey) -> bool {
        let mut pending = self.injected_conflicts.lock();
        match pending.get_mut(key) {
            Some(n) if *n > 0 => {
                *n -= 1;
                true
            }
            _ => false,
        }
    }

    /// Commit `write` if `key` is still at `read_version`.
    fn try_commit(&self, key: &DocKey, read_version: u64, write: TxnWrite) -> Commit {
        if self.take_injected_conflict(key) {
            let mut docs = self.docs.lock();
            let version = self.bump();
            if let Some(doc) = docs.get_mut(key) {
                doc.version = version;
            }
            return Commit::Conflict;
        }

        let mut docs = self.docs.lock();
        let current = docs.get(key).map_or(0, |d| d.version);
        if current != read_version {
            return Commit::Conflict;
        }
        match write {
            TxnWrite::Put(value) => {
                let version = self.bump();
                docs.insert(
                    key.clone(),
                    Versioned {
                        version,
                        value: value.clone(),
                    },
                );
                Commit::Changed(Some(value))
            }
            TxnWrite::Delete => {
                docs.remove(key);
                Commit::Changed(None)
            }
            TxnWrite::Keep => Commit::Unchanged,
        }
    }
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn get(&self, key: &DocKey) -> Result<Option<Value>, AppError> {
        Ok(self.snapshot(key).0)
    }

    async fn list(&self, collection: &str) -> Result<Vec<(String, Value)>, AppError> {
        let docs = self.docs.lock();
        let mut out: Vec<(String, Value)> = docs
            .iter()
            .filter(|(k, _)| k.collection == collection)
            .map(|(k, d)| (k.id.clone(), d.value.clone()))
            .collect();
        out.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(out)
    }

    async fn create(&self, key: &DocKey, value: Value) -> Result<(), AppError> {
        {
            let mut docs = self.docs.lock();
            if docs.contains_key(key) {
                return Err(DomainError::conflict(
                    ConflictKind::Other("exists".into()),
                    format!("Document {key} already exists"),
                )
                .into());
            }
            let version = self.bump();
            docs.insert(
                key.clone(),
                Versioned {
                    version,
                    value: value.clone(),
                },
            );
        }
        self.registry.broadcast(key, Some(&value));
        Ok(())
    }

    async fn put(&self, key: &DocKey, value: Value) -> Result<(), AppError> {
        {
            let mut docs = self.docs.lock();
            let version = self.bump();
            docs.insert(
                key.clone(),
                Versioned {
                    version,
                    value: value.clone(),
                },
            );
        }
        self.registry.broadcast(key, Some(&value));
        Ok(())
    }

    async fn delete(&self, key: &DocKey) -> Result<(), AppError> {
        let removed = self.docs.lock().remove(key).is_some();
        if removed {
            self.registry.broadcast(key, None);
        }
        Ok(())
    }

    async fn transact(&self, key: &DocKey, step: &mut TxnFn<'_>) -> Result<(), AppError> {
        for attempt in 1..=self.max_attempts {
            let (current, read_version) = self.snapshot(key);
            let write = step(current.as_ref())?;

            match self.try_commit(key, read_version, write) {
                Commit::Changed(value) => {
                    self.registry.broadcast(key, value.as_ref());
                    return Ok(());
                }
                Commit::Unchanged => return Ok(()),
                Commit::Conflict => {
                    debug!(doc = %key, attempt, "transaction conflict, retrying");
                }
            }
        }

        Err(DomainError::conflict(
            ConflictKind::OptimisticLock,
            format!(
                "Transaction on {key} gave up after {} attempts",
                self.max_attempts
            ),
        )
        .into())
    }

    fn subscribe(&self, key: &DocKey, callback: ChangeCallback) -> Subscription {
        self.registry.subscribe(key.clone(), callback)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;

    use serde_json::json;

    use super::*;

    fn key() -> DocKey {
        DocKey::new("counters", "c1")
    }

    async fn increment(store: &InMemoryStore, calls: &AtomicUsize) -> Result<(), AppError> {
        store
            .transact(&key(), &mut |current| {
                calls.fetch_add(1, Ordering::SeqCst);
                let n = current.and_then(|v| v["n"].as_i64()).unwrap_or(0);
                Ok(TxnWrite::Put(json!({ "n": n + 1 })))
            })
            .await
    }

    #[tokio::test]
    async fn transact_creates_and_updates() {
        let store = InMemoryStore::default();
        let calls = AtomicUsize::new(0);
        increment(&store, &calls).await.unwrap();
        increment(&store, &calls).await.unwrap();
        assert_eq!(store.get(&key()).await.unwrap(), Some(json!({"n": 2})));
    }

    #[tokio::test]
    async fn retries_after_a_concurrent_write() {
        let store = InMemoryStore::new(5);
        let calls = AtomicUsize::new(0);
        store.put(&key(), json!({"n": 10})).await.unwrap();
        store.inject_conflicts(&key(), 2);

        increment(&store, &calls).await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(store.get(&key()).await.unwrap(), Some(json!({"n": 11})));
    }

    #[tokio::test]
    async fn gives_up_with_optimistic_lock() {
        let store = InMemoryStore::new(3);
        let calls = AtomicUsize::new(0);
        store.put(&key(), json!({"n": 0})).await.unwrap();
        store.inject_conflicts(&key(), 10);

        let err = increment(&store, &calls).await.unwrap_err();
        assert_eq!(err.code(), crate::errors::ErrorCode::OptimisticLock);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(store.get(&key()).await.unwrap(), Some(json!({"n": 0})));
    }

    #[tokio::test]
    async fn aborted_step_writes_nothing() {
        let store = InMemoryStore::default();
        store.put(&key(), json!({"n": 1})).await.unwrap();
        let before = store.version(&key());

        let result = store
            .transact(&key(), &mut |_| Err(AppError::internal("nope")))
            .await;
        assert!(result.is_err());
        assert_eq!(store.version(&key()), before);
    }

    #[tokio::test]
    async fn create_refuses_existing_documents() {
        let store = InMemoryStore::default();
        store.create(&key(), json!({})).await.unwrap();
        assert!(store.create(&key(), json!({})).await.is_err());
    }

    #[tokio::test]
    async fn subscribers_see_commits_and_deletes() {
        let store = InMemoryStore::default();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let sub = store.subscribe(
            &key(),
            Arc::new(move |value| sink.lock().push(value.cloned())),
        );

        let calls = AtomicUsize::new(0);
        increment(&store, &calls).await.unwrap();
        store.delete(&key()).await.unwrap();
        drop(sub);
        store.put(&key(), json!({"n": 5})).await.unwrap();

        assert_eq!(*seen.lock(), vec![Some(json!({"n": 1})), None]);
    }

    #[tokio::test]
    async fn list_filters_by_collection() {
        let store = InMemoryStore::default();
        store.put(&DocKey::new("a", "1"), json!(1)).await.unwrap();
        store.put(&DocKey::new("b", "2"), json!(2)).await.unwrap();
        let listed = store.list("a").await.unwrap();
        assert_eq!(listed, vec![("1".to_string(), json!(1))]);
    }
}
