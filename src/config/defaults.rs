// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the crate. Constants are organized by category.
//!
//! # Categories
//!
//! - **Placement**: Default anchor and spacing for new notifications
//! - **Timeout**: Auto-dismiss delay bounds
//! - **Capacity**: Per-position notification cap
//! - **Diagnostics**: Lifecycle event buffer sizing

use crate::notifications::{Offset, Position};

// ==========================================================================
// Placement Defaults
// ==========================================================================

/// Default screen anchor for new notifications.
pub const DEFAULT_POSITION: Position = Position::TopRight;

/// Default horizontal spacing from the anchor edge (logical pixels).
pub const DEFAULT_OFFSET_X: f32 = 16.0;

/// Default vertical spacing from the anchor edge (logical pixels).
pub const DEFAULT_OFFSET_Y: f32 = 16.0;

/// Default spacing for new notifications.
pub const DEFAULT_OFFSET: Offset = Offset {
    x: DEFAULT_OFFSET_X,
    y: DEFAULT_OFFSET_Y,
};

// ==========================================================================
// Timeout Defaults
// ==========================================================================

/// Default delay before a non-persistent notification is flagged for removal.
pub const DEFAULT_TIMEOUT_MS: u64 = 5_000;

/// Upper bound for a default timeout read from a config file (10 minutes).
/// A timeout of zero disables auto-dismiss.
pub const MAX_TIMEOUT_MS: u64 = 600_000;

// ==========================================================================
// Capacity Defaults
// ==========================================================================

/// Per-position cap used when none is configured.
pub const DEFAULT_MAX_NOTIFICATIONS: usize = 5;

/// Smallest per-position cap accepted from a config file.
pub const MIN_MAX_NOTIFICATIONS: usize = 1;

/// Largest per-position cap accepted from a config file.
pub const MAX_MAX_NOTIFICATIONS: usize = 50;

// ==========================================================================
// Diagnostics Defaults
// ==========================================================================

/// Default lifecycle event buffer capacity.
pub const DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY: usize = 500;

/// Minimum lifecycle event buffer capacity.
pub const MIN_DIAGNOSTICS_BUFFER_CAPACITY: usize = 10;

/// Maximum lifecycle event buffer capacity.
pub const MAX_DIAGNOSTICS_BUFFER_CAPACITY: usize = 10_000;
