//! Scoped scroll listener registration.
//!
//! The host delivers scroll events to every registered listener. Listeners are
//! acquired on mount and released on unmount through an RAII
//! [`ScrollSubscription`] guard, so a remounted component can never leave a
//! stale listener behind.
//!
//! Registration is keyed: subscribing a key that is already registered
//! replaces the previous listener instead of adding a second one. The
//! superseded guard becomes inert, and dropping it later leaves the newer
//! listener in place.

use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

#[derive(Debug, Default)]
struct Listeners {
    /// Live generation per listener key.
    entries: BTreeMap<String, u64>,
    /// Next generation to hand out. Never reused.
    next_generation: u64,
}

/// Process-wide registry of scroll listeners.
///
/// Cheap to clone; clones share the same registry.
#[derive(Debug, Clone, Default)]
pub struct ScrollRegistry {
    inner: Arc<Mutex<Listeners>>,
}

impl ScrollRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Listeners> {
        // Listener bookkeeping stays consistent even if a holder panicked
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a listener under `key`.
    ///
    /// Replaces any listener already registered under the same key.
    pub fn subscribe(&self, key: impl Into<String>) -> ScrollSubscription {
        let key = key.into();
        let mut listeners = self.lock();

        let generation = listeners.next_generation;
        listeners.next_generation += 1;

        if listeners.entries.insert(key.clone(), generation).is_some() {
            tracing::debug!(%key, "scroll listener replaced");
        } else {
            tracing::debug!(%key, "scroll listener registered");
        }

        ScrollSubscription { registry: self.clone(), key, generation, released: false }
    }

    /// Number of live listeners.
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    /// Check if no listeners are registered.
    pub fn is_empty(&self) -> bool {
        self.lock().entries.is_empty()
    }

    /// Check if a listener is registered under `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.lock().entries.contains_key(key)
    }

    /// Keys of all live listeners, in order.
    pub fn keys(&self) -> Vec<String> {
        self.lock().entries.keys().cloned().collect()
    }

    fn is_live(&self, key: &str, generation: u64) -> bool {
        self.lock().entries.get(key) == Some(&generation)
    }

    fn release(&self, key: &str, generation: u64) -> bool {
        let mut listeners = self.lock();
        if listeners.entries.get(key) == Some(&generation) {
            listeners.entries.remove(key);
            tracing::debug!(%key, "scroll listener removed");
            true
        } else {
            false
        }
    }
}

/// RAII guard for one registered scroll listener.
///
/// Dropping the guard removes the listener unless a newer subscription for
/// the same key has replaced it.
#[derive(Debug)]
pub struct ScrollSubscription {
    registry: ScrollRegistry,
    key: String,
    generation: u64,
    released: bool,
}

impl ScrollSubscription {
    /// Listener key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Whether this guard still owns the registered listener.
    ///
    /// False after release or after a newer subscription replaced it.
    pub fn is_live(&self) -> bool {
        !self.released && self.registry.is_live(&self.key, self.generation)
    }

    /// Remove the listener now. Idempotent.
    ///
    /// Returns true if this call removed the listener.
    pub fn unsubscribe(&mut self) -> bool {
        if self.released {
            return false;
        }
        self.released = true;
        self.registry.release(&self.key, self.generation)
    }
}

impl Drop for ScrollSubscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}
