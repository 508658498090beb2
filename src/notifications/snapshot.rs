// SPDX-License-Identifier: MPL-2.0
//! Immutable point-in-time view of the store.
//!
//! A `Snapshot` is never mutated once published. Each store mutation builds
//! a successor with a bumped revision and swaps it in wholesale.

use super::notification::{Notification, NotificationId, Position};
use crate::config::StoreConfig;
use serde::Serialize;

/// Notifications plus configuration at one revision.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Snapshot {
    revision: u64,
    notifications: Vec<Notification>,
    config: StoreConfig,
}

impl Snapshot {
    pub(crate) fn initial(config: StoreConfig) -> Self {
        Self {
            revision: 0,
            notifications: Vec::new(),
            config,
        }
    }

    /// Builds the next revision from replacement parts.
    pub(crate) fn successor(&self, notifications: Vec<Notification>, config: StoreConfig) -> Self {
        Self {
            revision: self.revision + 1,
            notifications,
            config,
        }
    }

    /// Incremented on every publish.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Notifications in insertion order.
    #[must_use]
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    #[must_use]
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.notifications.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: NotificationId) -> Option<&Notification> {
        self.notifications.iter().find(|n| n.id() == id)
    }

    #[must_use]
    pub fn contains(&self, id: NotificationId) -> bool {
        self.get(id).is_some()
    }

    /// Notifications anchored at `position`, in insertion order.
    pub fn at_position(&self, position: Position) -> impl Iterator<Item = &Notification> {
        self.notifications
            .iter()
            .filter(move |n| n.position() == position)
    }

    #[must_use]
    pub fn count_at(&self, position: Position) -> usize {
        self.at_position(position).count()
    }

    /// Notifications whose expiry timer has fired and that await removal.
    pub fn pending_removal(&self) -> impl Iterator<Item = &Notification> {
        self.notifications.iter().filter(|n| n.should_remove())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifications::ToastOptions;

    fn with_positions(positions: &[Position]) -> Snapshot {
        let config = StoreConfig::default();
        let notifications = positions
            .iter()
            .enumerate()
            .filter_map(|(i, &p)| {
                Notification::from_options(ToastOptions::new("n").position(p), &config, i as u64)
            })
            .collect();
        Snapshot::initial(config.clone()).successor(notifications, config)
    }

    #[test]
    fn initial_snapshot_is_empty_at_revision_zero() {
        let snapshot = Snapshot::initial(StoreConfig::default());
        assert_eq!(snapshot.revision(), 0);
        assert!(snapshot.is_empty());
    }

    #[test]
    fn successor_bumps_revision() {
        let snapshot = with_positions(&[Position::TopLeft]);
        assert_eq!(snapshot.revision(), 1);
        let next = snapshot.successor(Vec::new(), snapshot.config().clone());
        assert_eq!(next.revision(), 2);
        assert_eq!(snapshot.len(), 1);
    }

    #[test]
    fn position_queries_group_by_anchor() {
        let snapshot = with_positions(&[
            Position::TopLeft,
            Position::BottomRight,
            Position::TopLeft,
        ]);
        assert_eq!(snapshot.count_at(Position::TopLeft), 2);
        assert_eq!(snapshot.count_at(Position::BottomRight), 1);
        assert_eq!(snapshot.count_at(Position::TopCenter), 0);

        let sequences: Vec<u64> = snapshot
            .at_position(Position::TopLeft)
            .map(Notification::sequence)
            .collect();
        assert_eq!(sequences, vec![0, 2]);
    }

    #[test]
    fn lookup_by_id() {
        let snapshot = with_positions(&[Position::TopRight]);
        let id = snapshot.notifications()[0].id();
        assert!(snapshot.contains(id));
        assert_eq!(snapshot.get(id).map(Notification::id), Some(id));
        assert!(!snapshot.contains(crate::notifications::NotificationId::new()));
    }
}
