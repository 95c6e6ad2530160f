use srefi_types::Identity;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

/// Callback invoked with the new identity (`None` after logout).
pub type IdentityCallback = Box<dyn Fn(Option<&Identity>) + Send + Sync>;

/// Handle returned by [`IdentityObservers::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

/// Current identity plus the callbacks watching it.
///
/// Callbacks run in registration order on the thread that changed the
/// identity, outside of any internal lock, so a callback may unsubscribe
/// itself.
pub struct IdentityObservers {
    current: RwLock<Option<Identity>>,
    callbacks: Mutex<BTreeMap<SubscriptionId, Arc<IdentityCallback>>>,
    next_id: AtomicU64,
}

impl IdentityObservers {
    pub fn new(initial: Option<Identity>) -> Self {
        Self {
            current: RwLock::new(initial),
            callbacks: Mutex::new(BTreeMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn current(&self) -> Option<Identity> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn subscribe(&self, callback: IdentityCallback) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let callback = Arc::new(callback);
        self.callbacks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, callback.clone());

        let current = self.current();
        callback(current.as_ref());
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.callbacks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id)
            .is_some()
    }

    /// Replace the identity; observers are notified only on change.
    /// Returns the number of callbacks invoked.
    pub fn set(&self, identity: Option<Identity>) -> usize {
        {
            let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
            if *current == identity {
                return 0;
            }
            *current = identity.clone();
        }

        let snapshot: Vec<Arc<IdentityCallback>> = self
            .callbacks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect();

        for callback in &snapshot {
            callback(identity.as_ref());
        }
        snapshot.len()
    }

    #[cfg(test)]
    pub fn subscriber_count(&self) -> usize {
        self.callbacks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl Default for IdentityObservers {
    fn default() -> Self {
        Self::new(None)
    }
}
