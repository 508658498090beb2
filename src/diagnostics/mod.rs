// SPDX-License-Identifier: MPL-2.0
//! Diagnostics module for recording store lifecycle events.
//!
//! A store with an attached [`DiagnosticsHandle`] reports insertions,
//! rejections, evictions, expiries, removals, clears and configuration
//! changes. Recent events are retained up to a fixed capacity and can be
//! exported as JSON; per-kind totals cover everything ever processed.
//!
//! # Architecture
//!
//! - [`StoreEvent`]: Timestamped lifecycle event
//! - [`DiagnosticsCollector`]: Drains the event channel, keeps recent events
//!   and [`EventTotals`]

mod collector;
mod events;

pub use collector::{BufferCapacity, DiagnosticsCollector, DiagnosticsHandle, EventTotals};
pub use events::{ConfigField, StoreEvent, StoreEventKind};
