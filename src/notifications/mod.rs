// SPDX-License-Identifier: MPL-2.0
//! Toast notification store.
//!
//! This module provides a non-intrusive notification model following
//! toast/snackbar UX patterns. Any number of UI surfaces observe one
//! [`Store`] and render its current [`Snapshot`]; none of them own it.
//!
//! # Components
//!
//! - [`notification`] - `Notification` value, `ToastOptions` request, anchors
//! - [`snapshot`] - Immutable point-in-time state
//! - [`store`] - `Store` with insertion, eviction, expiry and subscriptions
//!
//! # Usage
//!
//! ```
//! use toast_store::notifications::{Position, Store, ToastOptions};
//! use std::time::Duration;
//!
//! let store = Store::default();
//! let _subscription = store.subscribe(|| {
//!     // Re-read `store.snapshot()` and re-render.
//! });
//!
//! store.success("Image saved");
//! store.error(ToastOptions::new("Upload failed").secondary("Server returned 500"));
//! store.info(
//!     ToastOptions::new("Syncing")
//!         .position(Position::BottomLeft)
//!         .timeout(Duration::from_secs(2)),
//! );
//! assert_eq!(store.snapshot().len(), 3);
//! ```
//!
//! # Lifecycle
//!
//! - Non-persistent notifications get `should_remove` set once their timeout
//!   elapses; observers play their exit transition and call `Store::remove`.
//! - Errors created through `Store::error` are persistent by default.
//! - Each position holds at most the effective cap (default 5); the oldest
//!   are evicted first.

pub mod notification;
pub mod snapshot;
pub mod store;
mod subscription;
mod timer;

pub use notification::{
    Icon, Kind, Notification, NotificationHandle, NotificationId, Offset, ParseError, Position,
    ToastOptions,
};
pub use snapshot::Snapshot;
pub use store::Store;
pub use subscription::Subscription;
