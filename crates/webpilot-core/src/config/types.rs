//! Configuration type definitions.
//!
//! These types are deserialized from TOML config files.
//!
//! # Example Configuration
//!
//! ```toml
//! [focus]
//! poll_interval_ms = 50
//! timeout_ms = 1000
//!
//! [dialog]
//! poll_interval_ms = 100
//! timeout_ms = 3000
//! class_names = ["#32770"]
//! title_patterns = ["Choose File to Upload", "Open"]
//! ```

use serde::{Deserialize, Serialize};

/// Main configuration loaded from TOML config files.
///
/// Loaded from:
/// 1. User config: `~/.webpilot/config.toml`
/// 2. Project config: `./.webpilot/config.toml`
///
/// Project config values override user config values.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PilotConfig {
    /// Element focus wait settings
    #[serde(default)]
    pub focus: FocusConfig,

    /// Native file dialog settings
    #[serde(default)]
    pub dialog: DialogConfig,
}

/// Element focus wait configuration.
///
/// Unset fields fall back to the defaults documented on the accessors.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FocusConfig {
    /// Spacing between focus checks.
    /// Default: 50ms.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poll_interval_ms: Option<u64>,

    /// Total budget for the element to report focus.
    /// Default: 1000ms.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
}

/// Native file dialog configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DialogConfig {
    /// Spacing between dialog searches.
    /// Default: 100ms.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poll_interval_ms: Option<u64>,

    /// Budget for the dialog to appear.
    /// Default: 3000ms.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,

    /// Native window classes recognized as file dialogs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_names: Option<Vec<String>>,

    /// Window titles recognized as file dialogs (case-insensitive).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_patterns: Option<Vec<String>>,
}
