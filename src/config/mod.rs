// SPDX-License-Identifier: MPL-2.0
//! This module handles the store's default configuration, including loading
//! and saving it to a `settings.toml` file.
//!
//! The configuration only supplies defaults for notifications created after
//! it is applied; notifications already in a store keep the position, offset
//! and timeout they were created with.
//!
//! # Path Resolution
//!
//! The config file location can be customized for testing or portable deployments:
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. Set `TOAST_STORE_CONFIG_DIR` environment variable
//! 3. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use toast_store::config::{self, StoreConfig};
//! use toast_store::notifications::Position;
//!
//! // Load existing configuration (returns tuple with optional warning)
//! let (mut config, _warning) = config::load();
//!
//! // Modify a setting
//! config.position = Position::BottomLeft;
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::error::Result;
use crate::notifications::{Offset, Position};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "settings.toml";

/// Application name used for directory naming.
const APP_NAME: &str = "ToastStore";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "TOAST_STORE_CONFIG_DIR";

// =============================================================================
// MaxNotifications
// =============================================================================

/// Per-position notification cap.
///
/// Values set through the store are kept as given. Values read from a config
/// file are clamped to 1–50 on deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MaxNotifications(usize);

impl MaxNotifications {
    /// Creates a cap holding exactly `value`.
    #[must_use]
    pub const fn new(value: usize) -> Self {
        Self(value)
    }

    /// Creates a cap clamped to the range accepted from config files.
    #[must_use]
    pub fn clamped(value: usize) -> Self {
        Self(value.clamp(MIN_MAX_NOTIFICATIONS, MAX_MAX_NOTIFICATIONS))
    }

    /// Returns the value as usize.
    #[must_use]
    pub fn value(self) -> usize {
        self.0
    }
}

impl<'de> Deserialize<'de> for MaxNotifications {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        usize::deserialize(deserializer).map(Self::clamped)
    }
}

impl Default for MaxNotifications {
    fn default() -> Self {
        Self(DEFAULT_MAX_NOTIFICATIONS)
    }
}

impl From<usize> for MaxNotifications {
    fn from(value: usize) -> Self {
        Self::new(value)
    }
}

impl From<MaxNotifications> for usize {
    fn from(value: MaxNotifications) -> Self {
        value.0
    }
}

// =============================================================================
// StoreConfig
// =============================================================================

/// Defaults applied to notifications at insertion time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Default anchor for new notifications.
    #[serde(default = "default_position")]
    pub position: Position,

    /// Default spacing for new notifications.
    #[serde(default = "default_offset")]
    pub offset: Offset,

    /// Default delay before auto-dismiss. Zero disables auto-dismiss.
    #[serde(
        rename = "default_timeout_ms",
        default = "default_timeout",
        serialize_with = "serialize_timeout_ms",
        deserialize_with = "deserialize_timeout_ms"
    )]
    pub default_timeout: Duration,

    /// Per-position cap; `None` means [`DEFAULT_MAX_NOTIFICATIONS`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_notifications: Option<MaxNotifications>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            position: DEFAULT_POSITION,
            offset: DEFAULT_OFFSET,
            default_timeout: default_timeout(),
            max_notifications: None,
        }
    }
}

impl StoreConfig {
    /// Returns the per-position cap in effect: the configured value, or the
    /// builtin default when unset.
    #[must_use]
    pub fn effective_cap(&self) -> usize {
        self.max_notifications
            .map_or(DEFAULT_MAX_NOTIFICATIONS, MaxNotifications::value)
    }
}

fn default_position() -> Position {
    DEFAULT_POSITION
}

fn default_offset() -> Offset {
    DEFAULT_OFFSET
}

fn default_timeout() -> Duration {
    Duration::from_millis(DEFAULT_TIMEOUT_MS)
}

/// Caps a timeout read from a config file.
fn clamp_loaded_timeout(timeout: Duration) -> Duration {
    timeout.min(Duration::from_millis(MAX_TIMEOUT_MS))
}

pub(crate) fn serialize_timeout_ms<S>(timeout: &Duration, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let millis = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
    serializer.serialize_u64(millis)
}

fn deserialize_timeout_ms<'de, D>(deserializer: D) -> std::result::Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let millis = u64::deserialize(deserializer)?;
    Ok(clamp_loaded_timeout(Duration::from_millis(millis)))
}

// =============================================================================
// Load / Save
// =============================================================================

/// Returns the configuration directory, honoring [`ENV_CONFIG_DIR`].
#[must_use]
pub fn config_dir() -> Option<PathBuf> {
    if let Some(dir) = std::env::var_os(ENV_CONFIG_DIR).filter(|d| !d.is_empty()) {
        return Some(PathBuf::from(dir));
    }
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path
    })
}

fn get_default_config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(CONFIG_FILE))
}

/// Loads the configuration from the default location.
///
/// Never fails: a missing file yields defaults, and an unreadable or invalid
/// file yields defaults together with a warning describing the problem.
#[must_use]
pub fn load() -> (StoreConfig, Option<String>) {
    let Some(path) = get_default_config_path() else {
        return (StoreConfig::default(), None);
    };
    if !path.exists() {
        return (StoreConfig::default(), None);
    }
    match load_from_path(&path) {
        Ok(result) => result,
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "failed to read store config");
            (StoreConfig::default(), Some(err.to_string()))
        }
    }
}

/// Saves the configuration to the default location.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the file written.
pub fn save(config: &StoreConfig) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Loads the configuration from an explicit path.
///
/// Invalid TOML falls back to defaults and is reported as a warning.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn load_from_path(path: &Path) -> Result<(StoreConfig, Option<String>)> {
    let content = fs::read_to_string(path)?;
    match toml::from_str::<StoreConfig>(&content) {
        Ok(config) => Ok((config, None)),
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "invalid store config, using defaults");
            Ok((
                StoreConfig::default(),
                Some(format!("invalid config at {}: {err}", path.display())),
            ))
        }
    }
}

/// Saves the configuration to an explicit path, creating parent directories.
///
/// # Errors
///
/// Returns an error if serialization or any filesystem operation fails.
pub fn save_to_path(config: &StoreConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}
