use std::sync::{Arc, Weak};

use dashmap::DashMap;
use serde_json::Value;
use uuid::Uuid;

use super::{ChangeCallback, DocKey};

/// Change listeners keyed by document, then by registration token.
#[derive(Default)]
pub struct SubscriptionRegistry {
    listeners: DashMap<DocKey, DashMap<Uuid, ChangeCallback>>,
}

impl SubscriptionRegistry {
    pub fn new() -> Self {
        Self {
            listeners: DashMap::new(),
        }
    }

    pub fn register(&self, key: DocKey, callback: ChangeCallback) -> Uuid {
        let token = Uuid::new_v4();
        let entry = self.listeners.entry(key).or_default();
        entry.insert(token, callback);
        token
    }

    pub fn unregister(&self, key: &DocKey, token: Uuid) {
        let now_empty = match self.listeners.get(key) {
            Some(entry) => {
                entry.remove(&token);
                entry.is_empty()
            }
            None => false,
        };
        if now_empty {
            self.listeners.remove_if(key, |_, entry| entry.is_empty());
        }
    }

    pub fn listener_count(&self, key: &DocKey) -> usize {
        self.listeners.get(key).map_or(0, |entry| entry.len())
    }

    pub fn broadcast(&self, key: &DocKey, value: Option<&Value>) {
        // Snapshot first so callbacks may subscribe or cancel freely.
        let callbacks: Vec<ChangeCallback> = match self.listeners.get(key) {
            Some(entry) => entry.iter().map(|cb| cb.value().clone()).collect(),
            None => return,
        };
        for callback in callbacks {
            callback(value);
        }
    }

    /// Register and wrap the token in a handle that unregisters on drop.
    pub fn subscribe(self: &Arc<Self>, key: DocKey, callback: ChangeCallback) -> Subscription {
        let token = self.register(key.clone(), callback);
        let registry: Weak<Self> = Arc::downgrade(self);
        Subscription::new(move || {
            if let Some(registry) = registry.upgrade() {
                registry.unregister(&key, token);
            }
        })
    }
}

/// Opaque cancellation handle for a change subscription.
///
/// Dropping the handle cancels the subscription.
#[must_use = "dropping a Subscription cancels it"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    pub fn new(cancel: impl FnOnce() + Send + Sync + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    pub fn cancel(mut self) {
        self.run_cancel();
    }

    fn run_cancel(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.run_cancel();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}
