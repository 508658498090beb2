// SPDX-License-Identifier: MPL-2.0
//! Core notification data structures.
//!
//! This module defines the `Notification` value held by the store, the
//! `ToastOptions` insertion request, and the small value types they carry.

use crate::config::{self, StoreConfig};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use uuid::Uuid;

/// Unique identifier for a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationId(Uuid);

impl NotificationId {
    /// Creates a new random notification ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for NotificationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Notification type; determines the default icon and default persistence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Kind {
    /// Operation completed successfully.
    Success,
    /// Error requiring attention (persistent when created through `Store::error`).
    Error,
    /// Warning that doesn't block operation.
    Warning,
    /// Informational message.
    #[default]
    Info,
}

impl Kind {
    /// Returns the built-in icon for this kind.
    #[must_use]
    pub fn default_icon(self) -> Icon {
        Icon::Builtin(self)
    }

    /// Returns whether the typed constructor for this kind makes it persistent.
    #[must_use]
    pub fn is_persistent_by_default(self) -> bool {
        matches!(self, Kind::Error)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Success => "success",
            Kind::Error => "error",
            Kind::Warning => "warning",
            Kind::Info => "info",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Kind {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "success" => Ok(Kind::Success),
            "error" => Ok(Kind::Error),
            "warning" => Ok(Kind::Warning),
            "info" => Ok(Kind::Info),
            other => Err(ParseError::Kind(other.to_string())),
        }
    }
}

/// A renderable icon reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Icon {
    /// The built-in glyph for a notification kind.
    Builtin(Kind),
    /// A caller-supplied reference (asset name, glyph, path).
    Custom(String),
}

/// Named screen anchor used to group and independently cap notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Position {
    TopLeft,
    TopCenter,
    TopRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl Position {
    pub const ALL: [Position; 6] = [
        Position::TopLeft,
        Position::TopCenter,
        Position::TopRight,
        Position::BottomLeft,
        Position::BottomCenter,
        Position::BottomRight,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Position::TopLeft => "top-left",
            Position::TopCenter => "top-center",
            Position::TopRight => "top-right",
            Position::BottomLeft => "bottom-left",
            Position::BottomCenter => "bottom-center",
            Position::BottomRight => "bottom-right",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Position {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Position::ALL
            .into_iter()
            .find(|position| position.as_str() == s)
            .ok_or_else(|| ParseError::Position(s.to_string()))
    }
}

/// Failure to parse a [`Kind`] or [`Position`] from its kebab-case name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("unknown notification kind: {0}")]
    Kind(String),
    #[error("unknown position: {0}")]
    Position(String),
}

/// 2D spacing from the anchor edges, in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Offset {
    pub x: f32,
    pub y: f32,
}

impl Offset {
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Handle returned by a successful insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotificationHandle {
    id: NotificationId,
}

impl NotificationHandle {
    /// Returns the id of the inserted notification.
    #[must_use]
    pub fn id(&self) -> NotificationId {
        self.id
    }
}

impl From<NotificationHandle> for NotificationId {
    fn from(handle: NotificationHandle) -> Self {
        handle.id
    }
}

/// An insertion request.
///
/// Every field is optional; unset fields fall back to the store's
/// configuration (or builtin defaults) at insertion time. An absent or empty
/// primary message makes the request invalid.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToastOptions {
    kind: Option<Kind>,
    primary_message: Option<String>,
    secondary_message: Option<String>,
    icon: Option<Icon>,
    show_close_button: Option<bool>,
    timeout: Option<Duration>,
    is_persistent: Option<bool>,
    position: Option<Position>,
    offset: Option<Offset>,
}

impl ToastOptions {
    /// Creates options carrying only a primary message.
    pub fn new(primary_message: impl Into<String>) -> Self {
        Self {
            primary_message: Some(primary_message.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn kind(mut self, kind: Kind) -> Self {
        self.kind = Some(kind);
        self
    }

    #[must_use]
    pub fn secondary(mut self, message: impl Into<String>) -> Self {
        self.secondary_message = Some(message.into());
        self
    }

    #[must_use]
    pub fn icon(mut self, icon: Icon) -> Self {
        self.icon = Some(icon);
        self
    }

    #[must_use]
    pub fn show_close_button(mut self, show: bool) -> Self {
        self.show_close_button = Some(show);
        self
    }

    /// Sets the auto-dismiss delay. A zero timeout disables auto-dismiss.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Persistent notifications never auto-dismiss, regardless of timeout.
    #[must_use]
    pub fn persistent(mut self, persistent: bool) -> Self {
        self.is_persistent = Some(persistent);
        self
    }

    #[must_use]
    pub fn position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    #[must_use]
    pub fn offset(mut self, offset: Offset) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Returns the primary message if it is present and non-empty.
    #[must_use]
    pub fn primary_message(&self) -> Option<&str> {
        self.primary_message.as_deref().filter(|m| !m.is_empty())
    }

    /// Layers these options over `preset`; fields set here take precedence.
    #[must_use]
    pub fn merged_over(self, preset: ToastOptions) -> ToastOptions {
        ToastOptions {
            kind: self.kind.or(preset.kind),
            primary_message: self.primary_message.or(preset.primary_message),
            secondary_message: self.secondary_message.or(preset.secondary_message),
            icon: self.icon.or(preset.icon),
            show_close_button: self.show_close_button.or(preset.show_close_button),
            timeout: self.timeout.or(preset.timeout),
            is_persistent: self.is_persistent.or(preset.is_persistent),
            position: self.position.or(preset.position),
            offset: self.offset.or(preset.offset),
        }
    }
}

impl From<&str> for ToastOptions {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

impl From<String> for ToastOptions {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

/// A notification held by the store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    id: NotificationId,
    kind: Kind,
    primary_message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    secondary_message: Option<String>,
    icon: Icon,
    show_close_button: bool,
    #[serde(rename = "timeout_ms", serialize_with = "config::serialize_timeout_ms")]
    timeout: Duration,
    is_persistent: bool,
    position: Position,
    offset: Offset,
    created_at: DateTime<Utc>,
    /// Per-store insertion counter, breaks `created_at` ties.
    sequence: u64,
    should_remove: bool,
}

impl Notification {
    /// Builds a notification from a request, filling gaps from `defaults`.
    ///
    /// Returns `None` when the request has no usable primary message.
    pub(crate) fn from_options(
        options: ToastOptions,
        defaults: &StoreConfig,
        sequence: u64,
    ) -> Option<Self> {
        options.primary_message()?;
        let kind = options.kind.unwrap_or_default();
        Some(Self {
            id: NotificationId::new(),
            kind,
            primary_message: options.primary_message.unwrap_or_default(),
            secondary_message: options.secondary_message,
            icon: options.icon.unwrap_or_else(|| kind.default_icon()),
            show_close_button: options.show_close_button.unwrap_or(true),
            timeout: options.timeout.unwrap_or(defaults.default_timeout),
            is_persistent: options.is_persistent.unwrap_or(false),
            position: options.position.unwrap_or(defaults.position),
            offset: options.offset.unwrap_or(defaults.offset),
            created_at: Utc::now(),
            sequence,
            should_remove: false,
        })
    }

    /// Sets the removal flag. Returns `false` if it was already set.
    pub(crate) fn flag_for_removal(&mut self) -> bool {
        !std::mem::replace(&mut self.should_remove, true)
    }

    #[must_use]
    pub fn id(&self) -> NotificationId {
        self.id
    }

    #[must_use]
    pub fn handle(&self) -> NotificationHandle {
        NotificationHandle { id: self.id }
    }

    #[must_use]
    pub fn kind(&self) -> Kind {
        self.kind
    }

    #[must_use]
    pub fn primary_message(&self) -> &str {
        &self.primary_message
    }

    #[must_use]
    pub fn secondary_message(&self) -> Option<&str> {
        self.secondary_message.as_deref()
    }

    #[must_use]
    pub fn icon(&self) -> &Icon {
        &self.icon
    }

    #[must_use]
    pub fn show_close_button(&self) -> bool {
        self.show_close_button
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    #[must_use]
    pub fn is_persistent(&self) -> bool {
        self.is_persistent
    }

    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    #[must_use]
    pub fn offset(&self) -> Offset {
        self.offset
    }

    /// Returns when this notification was inserted.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Set once the expiry timer fired; observers should start their exit
    /// transition and then call `Store::remove`.
    #[must_use]
    pub fn should_remove(&self) -> bool {
        self.should_remove
    }

    /// Returns whether an expiry timer is scheduled for this notification.
    #[must_use]
    pub fn will_auto_expire(&self) -> bool {
        !self.is_persistent && !self.timeout.is_zero()
    }

    /// Eviction order key: oldest first, insertion order on ties.
    pub(crate) fn age_key(&self) -> (DateTime<Utc>, u64) {
        (self.created_at, self.sequence)
    }

    #[cfg(test)]
    pub(crate) fn set_created_at(&mut self, created_at: DateTime<Utc>) {
        self.created_at = created_at;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(options: ToastOptions) -> Option<Notification> {
        Notification::from_options(options, &StoreConfig::default(), 0)
    }

    #[test]
    fn notification_ids_are_unique() {
        let n1 = build(ToastOptions::new("test")).unwrap();
        let n2 = build(ToastOptions::new("test")).unwrap();
        assert_ne!(n1.id(), n2.id());
    }

    #[test]
    fn empty_or_missing_message_is_rejected() {
        assert!(build(ToastOptions::default()).is_none());
        assert!(build(ToastOptions::new("")).is_none());
        assert!(build(ToastOptions::default().kind(Kind::Error)).is_none());
    }

    #[test]
    fn unset_fields_take_config_defaults() {
        let config = StoreConfig {
            position: Position::BottomLeft,
            offset: Offset::new(2.0, 3.0),
            default_timeout: Duration::from_millis(250),
            max_notifications: None,
        };
        let n = Notification::from_options(ToastOptions::new("hello"), &config, 7).unwrap();

        assert_eq!(n.kind(), Kind::Info);
        assert_eq!(n.icon(), &Icon::Builtin(Kind::Info));
        assert!(n.show_close_button());
        assert!(!n.is_persistent());
        assert!(!n.should_remove());
        assert_eq!(n.position(), Position::BottomLeft);
        assert_eq!(n.offset(), Offset::new(2.0, 3.0));
        assert_eq!(n.timeout(), Duration::from_millis(250));
        assert_eq!(n.sequence(), 7);
    }

    #[test]
    fn explicit_fields_override_defaults() {
        let n = build(
            ToastOptions::new("saved")
                .kind(Kind::Success)
                .secondary("3 files")
                .icon(Icon::Custom("disk".into()))
                .show_close_button(false)
                .timeout(Duration::ZERO)
                .position(Position::TopCenter),
        )
        .unwrap();

        assert_eq!(n.kind(), Kind::Success);
        assert_eq!(n.secondary_message(), Some("3 files"));
        assert_eq!(n.icon(), &Icon::Custom("disk".into()));
        assert!(!n.show_close_button());
        assert_eq!(n.position(), Position::TopCenter);
        assert!(!n.will_auto_expire());
    }

    #[test]
    fn persistent_notifications_never_auto_expire() {
        let n = build(ToastOptions::new("x").persistent(true).timeout(Duration::from_millis(10)))
            .unwrap();
        assert!(!n.will_auto_expire());
    }

    #[test]
    fn merged_over_prefers_caller_fields() {
        let preset = ToastOptions::default().kind(Kind::Error).persistent(true);
        let merged = ToastOptions::new("b").persistent(false).merged_over(preset);

        assert_eq!(merged.kind, Some(Kind::Error));
        assert_eq!(merged.is_persistent, Some(false));
        assert_eq!(merged.primary_message(), Some("b"));
    }

    #[test]
    fn flag_for_removal_reports_first_transition_only() {
        let mut n = build(ToastOptions::new("x")).unwrap();
        assert!(n.flag_for_removal());
        assert!(!n.flag_for_removal());
        assert!(n.should_remove());
    }

    #[test]
    fn only_error_is_persistent_by_default() {
        assert!(Kind::Error.is_persistent_by_default());
        assert!(!Kind::Success.is_persistent_by_default());
        assert!(!Kind::Warning.is_persistent_by_default());
        assert!(!Kind::Info.is_persistent_by_default());
    }

    #[test]
    fn position_parses_kebab_case_names() {
        for position in Position::ALL {
            assert_eq!(position.as_str().parse::<Position>(), Ok(position));
        }
        assert!("middle".parse::<Position>().is_err());
    }

    #[test]
    fn kind_parses_names() {
        assert_eq!("warning".parse::<Kind>(), Ok(Kind::Warning));
        assert_eq!(
            "fatal".parse::<Kind>(),
            Err(ParseError::Kind("fatal".to_string()))
        );
    }
}
