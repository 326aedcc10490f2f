//! Document store abstraction.
//!
//! Shared state lives in JSON documents addressed by collection and id.
//! The only way to change a document's content based on what it held is
//! [`DocumentStore::transact`]: the store hands the step function the
//! current value, writes the returned change atomically, and re-runs the
//! step when another writer got there first.

pub mod memory;
pub mod subscriptions;
pub mod txn;

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::AppError;

pub use memory::InMemoryStore;
pub use subscriptions::{Subscription, SubscriptionRegistry};
pub use txn::{get_doc, with_txn, TxnStep};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocKey {
    pub collection: String,
    pub id: String,
}

impl DocKey {
    pub fn new(collection: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            id: id.into(),
        }
    }
}

impl fmt::Display for DocKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.collection, self.id)
    }
}

/// What a transaction step wants written.
#[derive(Debug, Clone, PartialEq)]
pub enum TxnWrite {
    Put(Value),
    Delete,
    /// Commit nothing.
    Keep,
}

/// Called with the new value after every committed change; `None` once
/// the document is deleted.
pub type ChangeCallback = Arc<dyn Fn(Option<&Value>) + Send + Sync>;

/// Step function run inside a transaction. Returning `Err` aborts with no write.
pub type TxnFn<'a> = dyn FnMut(Option<&Value>) -> Result<TxnWrite, AppError> + Send + 'a;

#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn get(&self, key: &DocKey) -> Result<Option<Value>, AppError>;

    /// Every document in `collection`, as `(id, value)` pairs.
    async fn list(&self, collection: &str) -> Result<Vec<(String, Value)>, AppError>;

    /// Create a document, failing with a conflict if it already exists.
    async fn create(&self, key: &DocKey, value: Value) -> Result<(), AppError>;

    /// Unconditionally write a document.
    async fn put(&self, key: &DocKey, value: Value) -> Result<(), AppError>;

    async fn delete(&self, key: &DocKey) -> Result<(), AppError>;

    /// Serializable read-modify-write on one document.
    async fn transact(&self, key: &DocKey, step: &mut TxnFn<'_>) -> Result<(), AppError>;

    /// Register for change notifications on `key` until the returned
    /// handle is cancelled or dropped.
    fn subscribe(&self, key: &DocKey, callback: ChangeCallback) -> Subscription;
}
