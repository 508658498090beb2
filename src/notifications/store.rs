// SPDX-License-Identifier: MPL-2.0
//! Notification lifecycle management.
//!
//! The `Store` holds the active notifications and default configuration as
//! a single immutable [`Snapshot`]. Every mutation builds a successor
//! snapshot, swaps it in, then notifies subscribers, so readers never
//! observe a half-applied change.
//!
//! Insertion enforces a per-position cap by evicting the oldest
//! notifications at that position, and schedules an expiry timer for
//! non-persistent notifications. When the timer fires the notification is
//! flagged with `should_remove`; observers run their exit transition and
//! then call [`Store::remove`].

use super::notification::{
    Kind, Notification, NotificationHandle, NotificationId, Offset, Position, ToastOptions,
};
use super::snapshot::Snapshot;
use super::subscription::{Listeners, Subscription};
use super::timer::ExpiryTimers;
use crate::config::{MaxNotifications, StoreConfig};
use crate::diagnostics::{ConfigField, DiagnosticsHandle, StoreEventKind};
use arc_swap::ArcSwap;
use parking_lot::{Mutex, RwLock};
use std::fmt;
use std::sync::{Arc, Weak};
use std::time::Duration;

/// Shared notification store.
///
/// Cloning is cheap; all clones observe and mutate the same state.
///
/// ```
/// use toast_store::notifications::{Store, ToastOptions, Position};
///
/// let store = Store::default();
/// let handle = store.success("Image saved").expect("non-empty message");
/// assert_eq!(store.snapshot().len(), 1);
///
/// store.remove(handle);
/// assert!(store.snapshot().is_empty());
///
/// assert!(store.insert(ToastOptions::new("")).is_none());
/// ```
#[derive(Clone)]
pub struct Store {
    inner: Arc<Inner>,
}

struct Inner {
    state: ArcSwap<Snapshot>,
    /// Serializes writers; readers go through `state` without locking.
    writer: Mutex<WriterState>,
    listeners: Arc<Listeners>,
    timers: ExpiryTimers,
    diagnostics: RwLock<Option<DiagnosticsHandle>>,
}

#[derive(Default)]
struct WriterState {
    next_sequence: u64,
}

impl Store {
    /// Creates an empty store using `config` as the initial defaults.
    #[must_use]
    pub fn new(config: StoreConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                state: ArcSwap::from_pointee(Snapshot::initial(config)),
                writer: Mutex::new(WriterState::default()),
                listeners: Arc::new(Listeners::default()),
                timers: ExpiryTimers::default(),
                diagnostics: RwLock::new(None),
            }),
        }
    }

    /// Sets the diagnostics handle for recording lifecycle events.
    pub fn set_diagnostics(&self, handle: DiagnosticsHandle) {
        *self.inner.diagnostics.write() = Some(handle);
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Returns the current snapshot.
    ///
    /// Between two publishes every call returns the same `Arc`, so observers
    /// can detect changes with [`Arc::ptr_eq`].
    #[must_use]
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.inner.state.load_full()
    }

    /// Per-position cap currently in effect.
    #[must_use]
    pub fn effective_cap(&self) -> usize {
        self.inner.state.load().config().effective_cap()
    }

    /// Number of expiry timers that have not fired or been cancelled.
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.inner.timers.len()
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Inserts a notification.
    ///
    /// Returns `None` without touching state when the request has no
    /// primary message. Otherwise the notification is appended, older
    /// notifications at the same position are evicted beyond the effective
    /// cap, subscribers are notified, and an expiry timer is scheduled unless
    /// the notification is persistent or has a zero timeout.
    ///
    /// Expiry timers need a Tokio runtime; without one the notification is
    /// kept but never auto-expires.
    pub fn insert(&self, options: impl Into<ToastOptions>) -> Option<NotificationHandle> {
        let options = options.into();

        let (notification, evicted) = {
            let mut writer = self.inner.writer.lock();
            let current = self.inner.state.load_full();
            let Some(notification) =
                Notification::from_options(options, current.config(), writer.next_sequence)
            else {
                drop(writer);
                tracing::debug!("rejected notification without a primary message");
                self.inner.report(StoreEventKind::Rejected);
                return None;
            };
            writer.next_sequence += 1;

            let mut notifications = current.notifications().to_vec();
            notifications.push(notification.clone());
            let evicted = evict_excess(
                &mut notifications,
                notification.position(),
                current.config().effective_cap(),
            );

            self.inner.state.store(Arc::new(
                current.successor(notifications, current.config().clone()),
            ));
            (notification, evicted)
        };

        let id = notification.id();
        tracing::debug!(
            %id,
            kind = %notification.kind(),
            position = %notification.position(),
            "notification inserted"
        );
        self.inner.report(StoreEventKind::Inserted {
            id,
            kind: notification.kind(),
            position: notification.position(),
        });

        for evicted_id in &evicted {
            self.inner.timers.cancel(*evicted_id);
            tracing::debug!(id = %evicted_id, position = %notification.position(), "notification evicted");
            self.inner.report(StoreEventKind::Evicted {
                id: *evicted_id,
                position: notification.position(),
            });
        }

        if notification.will_auto_expire() && !evicted.contains(&id) {
            let weak: Weak<Inner> = Arc::downgrade(&self.inner);
            self.inner
                .timers
                .schedule(id, notification.timeout(), move || {
                    if let Some(inner) = weak.upgrade() {
                        inner.expire(id);
                    }
                });
        }

        self.inner.listeners.notify_all();
        Some(notification.handle())
    }

    /// Removes a notification and cancels its expiry timer.
    ///
    /// Returns `true` if the notification was found. Removing an absent id
    /// is a no-op and does not notify subscribers.
    pub fn remove(&self, id: impl Into<NotificationId>) -> bool {
        let id = id.into();
        self.inner.timers.cancel(id);

        let removed = {
            let _writer = self.inner.writer.lock();
            let current = self.inner.state.load_full();
            if current.contains(id) {
                let notifications = current
                    .notifications()
                    .iter()
                    .filter(|n| n.id() != id)
                    .cloned()
                    .collect();
                self.inner.state.store(Arc::new(
                    current.successor(notifications, current.config().clone()),
                ));
                true
            } else {
                false
            }
        };

        if removed {
            tracing::debug!(%id, "notification removed");
            self.inner.report(StoreEventKind::Removed { id });
            self.inner.listeners.notify_all();
        } else {
            tracing::trace!(%id, "remove ignored, notification not present");
        }
        removed
    }

    /// Removes every notification and cancels their pending expiry timers.
    pub fn clear_all(&self) {
        let count = {
            let _writer = self.inner.writer.lock();
            let current = self.inner.state.load_full();
            self.inner.state.store(Arc::new(
                current.successor(Vec::new(), current.config().clone()),
            ));
            // Only the cleared ids: a concurrent insert may schedule its timer
            // once the writer lock is released.
            let cancelled = self
                .inner
                .timers
                .cancel_each(current.notifications().iter().map(Notification::id));
            tracing::trace!(cancelled, "expiry timers cancelled by clear");
            current.len()
        };

        tracing::debug!(count, "notifications cleared");
        self.inner.report(StoreEventKind::Cleared { count });
        self.inner.listeners.notify_all();
    }

    // =========================================================================
    // Typed constructors
    // =========================================================================

    /// Inserts a success notification.
    pub fn success(&self, options: impl Into<ToastOptions>) -> Option<NotificationHandle> {
        self.insert_typed(Kind::Success, options.into())
    }

    /// Inserts a warning notification.
    pub fn warning(&self, options: impl Into<ToastOptions>) -> Option<NotificationHandle> {
        self.insert_typed(Kind::Warning, options.into())
    }

    /// Inserts an info notification.
    pub fn info(&self, options: impl Into<ToastOptions>) -> Option<NotificationHandle> {
        self.insert_typed(Kind::Info, options.into())
    }

    /// Inserts an error notification. Persistent unless the caller says otherwise.
    pub fn error(&self, options: impl Into<ToastOptions>) -> Option<NotificationHandle> {
        self.insert_typed(Kind::Error, options.into())
    }

    fn insert_typed(&self, kind: Kind, options: ToastOptions) -> Option<NotificationHandle> {
        let mut preset = ToastOptions::default().kind(kind);
        if kind.is_persistent_by_default() {
            preset = preset.persistent(true);
        }
        self.insert(options.merged_over(preset))
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// Sets the default position for notifications inserted from now on.
    pub fn set_position(&self, position: Position) {
        self.update_config(ConfigField::Position, |config| config.position = position);
    }

    /// Sets the default offset for notifications inserted from now on.
    pub fn set_offset(&self, offset: Offset) {
        self.update_config(ConfigField::Offset, |config| config.offset = offset);
    }

    /// Sets the default auto-dismiss delay. Zero disables auto-dismiss.
    pub fn set_default_timeout(&self, timeout: Duration) {
        self.update_config(ConfigField::DefaultTimeout, |config| {
            config.default_timeout = timeout;
        });
    }

    /// Sets the per-position cap; `None` restores the builtin default.
    ///
    /// The value is used as given, so a cap of zero evicts every new
    /// notification at its position. Applies to the next insertion; existing
    /// notifications are not evicted.
    pub fn set_max_notifications(&self, max: Option<usize>) {
        self.update_config(ConfigField::MaxNotifications, |config| {
            config.max_notifications = max.map(MaxNotifications::new);
        });
    }

    fn update_config(&self, field: ConfigField, apply: impl FnOnce(&mut StoreConfig)) {
        {
            let _writer = self.inner.writer.lock();
            let current = self.inner.state.load_full();
            let mut config = current.config().clone();
            apply(&mut config);
            self.inner.state.store(Arc::new(
                current.successor(current.notifications().to_vec(), config),
            ));
        }
        tracing::debug!(?field, "store config changed");
        self.inner.report(StoreEventKind::ConfigChanged { field });
        self.inner.listeners.notify_all();
    }

    // =========================================================================
    // Subscriptions
    // =========================================================================

    /// Registers a listener called after every publish.
    ///
    /// Listeners receive no payload and should re-read [`Store::snapshot`].
    /// They run outside the store's internal lock and may call back into the
    /// store.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.inner.listeners.register(Arc::new(listener))
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new(StoreConfig::default())
    }
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let snapshot = self.inner.state.load();
        f.debug_struct("Store")
            .field("revision", &snapshot.revision())
            .field("notifications", &snapshot.len())
            .field("listeners", &self.inner.listeners)
            .field("pending_timers", &self.inner.timers.len())
            .finish()
    }
}

impl Inner {
    fn report(&self, kind: StoreEventKind) {
        if let Some(handle) = self.diagnostics.read().as_ref() {
            handle.log(kind);
        }
    }

    /// Timer callback: flags the notification for removal if still present.
    fn expire(&self, id: NotificationId) {
        self.timers.forget(id);

        {
            let _writer = self.writer.lock();
            let current = self.state.load_full();
            let Some(index) = current.notifications().iter().position(|n| n.id() == id) else {
                tracing::trace!(%id, "stale expiry timer ignored");
                return;
            };
            let mut notifications = current.notifications().to_vec();
            if !notifications[index].flag_for_removal() {
                return;
            }
            self.state.store(Arc::new(
                current.successor(notifications, current.config().clone()),
            ));
        }

        tracing::debug!(%id, "notification expired");
        self.report(StoreEventKind::Expired { id });
        self.listeners.notify_all();
    }
}

/// Drops the oldest notifications at `position` beyond `cap`.
///
/// Age is `(created_at, sequence)`, so equal timestamps fall back to
/// insertion order. Returns the evicted ids, oldest first.
fn evict_excess(
    notifications: &mut Vec<Notification>,
    position: Position,
    cap: usize,
) -> Vec<NotificationId> {
    let mut at_position: Vec<_> = notifications
        .iter()
        .filter(|n| n.position() == position)
        .map(|n| (n.age_key(), n.id()))
        .collect();
    if at_position.len() <= cap {
        return Vec::new();
    }

    at_position.sort_unstable_by_key(|(age, _)| *age);
    let excess = at_position.len() - cap;
    let evicted: Vec<NotificationId> = at_position[..excess].iter().map(|(_, id)| *id).collect();
    notifications.retain(|n| !evicted.contains(&n.id()));
    evicted
}
