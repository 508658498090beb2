// SPDX-License-Identifier: MPL-2.0
//! Cancellable one-shot expiry timers keyed by notification id.
//!
//! Each timer is a Tokio task. Removing, evicting or clearing a notification
//! aborts its task, so no callback outlives the notification it targets.

use super::notification::NotificationId;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::AbortHandle;

#[derive(Debug, Default)]
pub(crate) struct ExpiryTimers {
    handles: Mutex<HashMap<NotificationId, AbortHandle>>,
}

impl ExpiryTimers {
    /// Runs `on_fire` once `delay` has elapsed, unless cancelled first.
    ///
    /// Returns `false` when no Tokio runtime is available; the caller keeps
    /// the notification but it will not auto-expire.
    pub(crate) fn schedule<F>(&self, id: NotificationId, delay: Duration, on_fire: F) -> bool
    where
        F: FnOnce() + Send + 'static,
    {
        let Ok(runtime) = Handle::try_current() else {
            tracing::warn!(%id, "no tokio runtime available, auto-dismiss disabled");
            return false;
        };

        // Held across spawn so the task cannot forget itself before it is tracked.
        let mut handles = self.handles.lock();
        let task = runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            on_fire();
        });
        if let Some(previous) = handles.insert(id, task.abort_handle()) {
            previous.abort();
        }
        let delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        tracing::trace!(%id, delay_ms, "expiry timer scheduled");
        true
    }

    /// Aborts the timer for `id`. Returns whether one was pending.
    pub(crate) fn cancel(&self, id: NotificationId) -> bool {
        match self.handles.lock().remove(&id) {
            Some(handle) => {
                handle.abort();
                tracing::trace!(%id, "expiry timer cancelled");
                true
            }
            None => false,
        }
    }

    /// Aborts the timers for `ids`. Returns how many were pending.
    pub(crate) fn cancel_each(&self, ids: impl IntoIterator<Item = NotificationId>) -> usize {
        let mut handles = self.handles.lock();
        let mut cancelled = 0;
        for id in ids {
            if let Some(handle) = handles.remove(&id) {
                handle.abort();
                cancelled += 1;
            }
        }
        cancelled
    }

    /// Drops the bookkeeping for a timer that has already fired.
    pub(crate) fn forget(&self, id: NotificationId) {
        self.handles.lock().remove(&id);
    }

    /// Aborts every pending timer. Returns how many were pending.
    pub(crate) fn cancel_all(&self) -> usize {
        let drained: Vec<AbortHandle> = self.handles.lock().drain().map(|(_, h)| h).collect();
        for handle in &drained {
            handle.abort();
        }
        drained.len()
    }

    pub(crate) fn len(&self) -> usize {
        self.handles.lock().len()
    }
}

impl Drop for ExpiryTimers {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
