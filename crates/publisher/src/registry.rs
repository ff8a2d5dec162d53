use std::collections::BTreeSet;

use tokio::sync::{Mutex, MutexGuard};
use tracing::info;

use crate::{error::Result, store::SubscriberStore};

/// In-memory subscriber set mirrored to the backing file.
///
/// Every entry was either loaded from the file at startup or added through
/// [`SubscriberRegistry::register`]; the file reflects the in-memory set
/// after any successful mutation (write-through). A single exclusive lock
/// guards the set and the backing store together: registrations and whole
/// push cycles each hold the guard for their entire read-modify-persist
/// sequence, so they serialize against each other.
pub struct SubscriberRegistry {
    inner: Mutex<RegistryInner>,
}

struct RegistryInner {
    subscribers: BTreeSet<String>,
    store: SubscriberStore,
}

/// Exclusive view over the subscriber set and its backing store.
///
/// Held for the duration of one critical section; dropping it releases the
/// registry lock.
pub struct RegistryGuard<'a> {
    inner: MutexGuard<'a, RegistryInner>,
}

impl SubscriberRegistry {
    /// Load the registry from the backing store, creating the file if
    /// absent. Called once at process start; read errors are fatal here.
    pub fn load(store: SubscriberStore) -> Result<Self> {
        let subscribers = store.load()?;
        info!(
            count = subscribers.len(),
            path = %store.path().display(),
            "subscriber registry initialized"
        );
        Ok(Self { inner: Mutex::new(RegistryInner { subscribers, store }) })
    }

    /// Acquire exclusive access to the subscriber set and backing store.
    pub async fn lock(&self) -> RegistryGuard<'_> {
        RegistryGuard { inner: self.inner.lock().await }
    }

    /// Insert a subscriber and persist the full set as one critical section.
    ///
    /// Idempotent: re-adding an existing URL rewrites the file but changes
    /// nothing observable. Returns whether the URL was newly inserted. If
    /// the flush fails, a newly inserted URL is rolled back so memory and
    /// file stay consistent.
    pub async fn register(&self, url: &str) -> Result<bool> {
        let mut guard = self.lock().await;
        let inserted = guard.insert(url);
        if let Err(err) = guard.persist() {
            if inserted {
                guard.remove(url);
            }
            return Err(err);
        }
        Ok(inserted)
    }

    /// Sorted copy of the current subscriber set.
    pub async fn snapshot(&self) -> Vec<String> {
        self.lock().await.snapshot()
    }
}

impl RegistryGuard<'_> {
    pub fn insert(&mut self, url: &str) -> bool {
        self.inner.subscribers.insert(url.to_string())
    }

    pub fn remove(&mut self, url: &str) -> bool {
        self.inner.subscribers.remove(url)
    }

    pub fn contains(&self, url: &str) -> bool {
        self.inner.subscribers.contains(url)
    }

    pub fn len(&self) -> usize {
        self.inner.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.subscribers.is_empty()
    }

    /// Sorted copy of the subscriber set.
    pub fn snapshot(&self) -> Vec<String> {
        self.inner.subscribers.iter().cloned().collect()
    }

    /// Rewrite the backing file from the current set.
    pub fn persist(&self) -> Result<()> {
        self.inner.store.persist(&self.inner.subscribers)
    }
}
