// SPDX-License-Identifier: MPL-2.0
//! Change listeners.
//!
//! Listeners receive no payload: after each publish they re-read the store's
//! current snapshot.

use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

type Listener = Arc<dyn Fn() + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct ListenerId(u64);

/// Registry of change listeners shared by all clones of a store.
#[derive(Default)]
pub(crate) struct Listeners {
    next_id: AtomicU64,
    entries: Mutex<Vec<(ListenerId, Listener)>>,
}

impl Listeners {
    pub(crate) fn register(self: &Arc<Self>, listener: Listener) -> Subscription {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.entries.lock().push((id, listener));
        Subscription {
            registry: Arc::downgrade(self),
            id,
        }
    }

    fn deregister(&self, id: ListenerId) {
        self.entries.lock().retain(|(entry_id, _)| *entry_id != id);
    }

    /// Invokes every registered listener.
    ///
    /// The list is copied first and the lock released, so listeners may
    /// subscribe, unsubscribe or mutate the store re-entrantly.
    pub(crate) fn notify_all(&self) {
        let listeners: Vec<Listener> = self
            .entries
            .lock()
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        for listener in listeners {
            listener();
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.lock().len()
    }
}

impl std::fmt::Debug for Listeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listeners").field("len", &self.len()).finish()
    }
}

/// Registration returned by `Store::subscribe`.
///
/// Dropping it deregisters the listener; keep it alive for as long as the
/// observer needs updates.
#[must_use = "dropping a Subscription immediately unsubscribes the listener"]
#[derive(Debug)]
pub struct Subscription {
    registry: Weak<Listeners>,
    id: ListenerId,
}

impl Subscription {
    /// Deregisters the listener. Equivalent to dropping the subscription.
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.deregister(self.id);
        }
    }
}
