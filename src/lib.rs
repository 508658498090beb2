// SPDX-License-Identifier: MPL-2.0
//! `toast_store` is a toast notification store for UI front-ends.
//!
//! It keeps the active notifications and their default placement in an
//! immutable snapshot, expires non-persistent notifications on Tokio timers,
//! caps each screen position independently, and notifies subscribers after
//! every change so independent views stay in sync.

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod notifications;

pub use notifications::{Kind, NotificationHandle, Position, Snapshot, Store, ToastOptions};
