// SPDX-License-Identifier: MPL-2.0
//! Store lifecycle events captured for diagnostics.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::notifications::{Kind, NotificationId, Position};

/// Configuration field touched by a setter.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ConfigField {
    Position,
    Offset,
    DefaultTimeout,
    MaxNotifications,
}

/// What happened in the store.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StoreEventKind {
    // ==========================================================================
    // Insertion
    // ==========================================================================
    /// A notification was added.
    Inserted {
        id: NotificationId,
        kind: Kind,
        position: Position,
    },

    /// An insertion request without a primary message was ignored.
    Rejected,

    /// A notification was dropped to respect its position's cap.
    Evicted {
        id: NotificationId,
        position: Position,
    },

    // ==========================================================================
    // Removal
    // ==========================================================================
    /// An expiry timer flagged a notification for removal.
    Expired { id: NotificationId },

    /// A notification was removed explicitly.
    Removed { id: NotificationId },

    /// All notifications were cleared.
    Cleared { count: usize },

    // ==========================================================================
    // Configuration
    // ==========================================================================
    /// A default configuration field changed.
    ConfigChanged { field: ConfigField },
}

/// A timestamped store event.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StoreEvent {
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub kind: StoreEventKind,
}

impl StoreEvent {
    /// Creates an event stamped with the current time.
    #[must_use]
    pub fn new(kind: StoreEventKind) -> Self {
        Self {
            timestamp: Utc::now(),
            kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_serialize_with_type_tag() {
        let event = StoreEvent::new(StoreEventKind::Cleared { count: 3 });
        let json = serde_json::to_value(&event).expect("serialize");
        assert_eq!(json["type"], "cleared");
        assert_eq!(json["count"], 3);
        assert!(json.get("timestamp").is_some());
    }

    #[test]
    fn config_change_names_the_field() {
        let event = StoreEvent::new(StoreEventKind::ConfigChanged {
            field: ConfigField::MaxNotifications,
        });
        let json = serde_json::to_value(&event).expect("serialize");
        assert_eq!(json["field"], "max_notifications");
    }

    #[test]
    fn insertion_event_carries_kebab_case_position() {
        let event = StoreEvent::new(StoreEventKind::Inserted {
            id: NotificationId::new(),
            kind: Kind::Warning,
            position: Position::BottomCenter,
        });
        let json = serde_json::to_value(&event).expect("serialize");
        assert_eq!(json["kind"], "warning");
        assert_eq!(json["position"], "bottom-center");
    }
}
