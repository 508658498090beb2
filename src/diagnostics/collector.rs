// SPDX-License-Identifier: MPL-2.0
//! Diagnostics collector for aggregating store lifecycle events.
//!
//! Stores report through a [`DiagnosticsHandle`]; the collector drains the
//! channel whenever its owner asks it to. Recent events are retained up to
//! the configured capacity, and [`EventTotals`] keeps per-kind counts for
//! the collector's whole lifetime so trimming old events loses no tallies.

use std::collections::VecDeque;

use crossbeam_channel::{bounded, Receiver, Sender};
use serde::Serialize;

use super::{StoreEvent, StoreEventKind};
use crate::config::{
    DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY, MAX_DIAGNOSTICS_BUFFER_CAPACITY,
    MIN_DIAGNOSTICS_BUFFER_CAPACITY,
};

/// Default channel capacity for event buffering.
const DEFAULT_CHANNEL_CAPACITY: usize = 256;

/// Number of recent events a collector retains (10–10000).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferCapacity(usize);

impl BufferCapacity {
    /// Creates a new buffer capacity, clamping to valid range.
    #[must_use]
    pub fn new(value: usize) -> Self {
        Self(value.clamp(
            MIN_DIAGNOSTICS_BUFFER_CAPACITY,
            MAX_DIAGNOSTICS_BUFFER_CAPACITY,
        ))
    }

    #[must_use]
    pub fn value(self) -> usize {
        self.0
    }
}

impl Default for BufferCapacity {
    fn default() -> Self {
        Self(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY)
    }
}

/// Lifetime count of each event kind seen by a collector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EventTotals {
    pub inserted: u64,
    pub rejected: u64,
    pub evicted: u64,
    pub expired: u64,
    pub removed: u64,
    pub cleared: u64,
    pub config_changed: u64,
}

impl EventTotals {
    fn record(&mut self, kind: &StoreEventKind) {
        let slot = match kind {
            StoreEventKind::Inserted { .. } => &mut self.inserted,
            StoreEventKind::Rejected => &mut self.rejected,
            StoreEventKind::Evicted { .. } => &mut self.evicted,
            StoreEventKind::Expired { .. } => &mut self.expired,
            StoreEventKind::Removed { .. } => &mut self.removed,
            StoreEventKind::Cleared { .. } => &mut self.cleared,
            StoreEventKind::ConfigChanged { .. } => &mut self.config_changed,
        };
        *slot += 1;
    }

    /// Notifications that left the store without an explicit removal.
    #[must_use]
    pub fn dropped_by_store(&self) -> u64 {
        self.evicted + self.expired
    }
}

/// Handle for sending lifecycle events to the collector.
///
/// This handle is cheap to clone and can be shared across threads.
/// Sending never blocks; events are dropped when the channel is full.
#[derive(Clone, Debug)]
pub struct DiagnosticsHandle {
    event_tx: Sender<StoreEvent>,
}

impl DiagnosticsHandle {
    /// Records an event, dropping it on backpressure.
    pub fn log(&self, kind: StoreEventKind) {
        if self.event_tx.try_send(StoreEvent::new(kind)).is_err() {
            tracing::trace!("diagnostics channel full or closed, event dropped");
        }
    }
}

/// Central collector for store lifecycle events.
#[derive(Debug)]
pub struct DiagnosticsCollector {
    recent: VecDeque<StoreEvent>,
    capacity: BufferCapacity,
    totals: EventTotals,
    event_rx: Receiver<StoreEvent>,
    event_tx: Sender<StoreEvent>,
}

impl DiagnosticsCollector {
    /// Creates a new collector retaining up to `capacity` recent events.
    #[must_use]
    pub fn new(capacity: BufferCapacity) -> Self {
        let (event_tx, event_rx) = bounded(DEFAULT_CHANNEL_CAPACITY);
        Self {
            recent: VecDeque::with_capacity(capacity.value()),
            capacity,
            totals: EventTotals::default(),
            event_rx,
            event_tx,
        }
    }

    /// Creates a handle for sending events to this collector.
    #[must_use]
    pub fn handle(&self) -> DiagnosticsHandle {
        DiagnosticsHandle {
            event_tx: self.event_tx.clone(),
        }
    }

    /// Drains pending events from the channel, counting each one and
    /// trimming the oldest retained events beyond capacity.
    /// Returns how many were processed.
    pub fn process_pending(&mut self) -> usize {
        let mut processed = 0;
        while let Ok(event) = self.event_rx.try_recv() {
            self.totals.record(&event.kind);
            if self.recent.len() == self.capacity.value() {
                self.recent.pop_front();
            }
            self.recent.push_back(event);
            processed += 1;
        }
        processed
    }

    /// Retained events, oldest first.
    pub fn events(&self) -> impl Iterator<Item = &StoreEvent> {
        self.recent.iter()
    }

    /// Per-kind counts of every processed event, including trimmed ones.
    #[must_use]
    pub fn totals(&self) -> EventTotals {
        self.totals
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.recent.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.recent.is_empty()
    }

    /// Forgets retained events and resets the totals.
    pub fn clear(&mut self) {
        self.recent.clear();
        self.totals = EventTotals::default();
    }

    /// Serializes the retained events as a pretty-printed JSON array.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.recent)
    }
}

impl Default for DiagnosticsCollector {
    fn default() -> Self {
        Self::new(BufferCapacity::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifications::{NotificationId, Position};

    #[test]
    fn buffer_capacity_clamps_to_valid_range() {
        assert_eq!(BufferCapacity::new(0).value(), MIN_DIAGNOSTICS_BUFFER_CAPACITY);
        assert_eq!(
            BufferCapacity::new(100_000).value(),
            MAX_DIAGNOSTICS_BUFFER_CAPACITY
        );
        assert_eq!(BufferCapacity::default().value(), DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY);
    }

    #[test]
    fn handle_events_reach_collector_after_processing() {
        let mut collector = DiagnosticsCollector::default();
        let handle = collector.handle();

        handle.log(StoreEventKind::Rejected);
        handle.log(StoreEventKind::Cleared { count: 2 });
        assert!(collector.is_empty());

        assert_eq!(collector.process_pending(), 2);
        assert_eq!(collector.len(), 2);
        assert_eq!(
            collector.events().last().map(|e| e.kind.clone()),
            Some(StoreEventKind::Cleared { count: 2 })
        );
    }

    #[test]
    fn full_channel_drops_events() {
        let mut collector = DiagnosticsCollector::default();
        let handle = collector.handle();
        for _ in 0..DEFAULT_CHANNEL_CAPACITY + 10 {
            handle.log(StoreEventKind::Rejected);
        }
        assert_eq!(collector.process_pending(), DEFAULT_CHANNEL_CAPACITY);
    }

    #[test]
    fn trimmed_events_still_count_in_totals() {
        let mut collector = DiagnosticsCollector::new(BufferCapacity::new(10));
        let handle = collector.handle();
        for _ in 0..15 {
            handle.log(StoreEventKind::Evicted {
                id: NotificationId::new(),
                position: Position::TopRight,
            });
        }
        for count in 0..5 {
            handle.log(StoreEventKind::Cleared { count });
        }
        collector.process_pending();

        assert_eq!(collector.len(), 10);
        assert!(matches!(
            collector.events().next().map(|e| &e.kind),
            Some(StoreEventKind::Evicted { .. })
        ));
        let totals = collector.totals();
        assert_eq!(totals.evicted, 15);
        assert_eq!(totals.cleared, 5);
        assert_eq!(totals.dropped_by_store(), 15);
    }

    #[test]
    fn clear_resets_events_and_totals() {
        let mut collector = DiagnosticsCollector::default();
        collector.handle().log(StoreEventKind::Expired {
            id: NotificationId::new(),
        });
        collector.process_pending();
        assert_eq!(collector.totals().expired, 1);

        collector.clear();
        assert!(collector.is_empty());
        assert_eq!(collector.totals(), EventTotals::default());
    }

    #[test]
    fn json_export_is_an_array() {
        let mut collector = DiagnosticsCollector::default();
        collector.handle().log(StoreEventKind::Rejected);
        collector.process_pending();

        let json = collector.to_json().expect("export");
        let value: serde_json::Value = serde_json::from_str(&json).expect("parse");
        assert_eq!(value.as_array().map(Vec::len), Some(1));
        assert_eq!(value[0]["type"], "rejected");
    }
}
