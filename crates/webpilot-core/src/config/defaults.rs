//! Default values for configuration types.
//!
//! Config structs keep unset fields as `None`; the accessors here resolve
//! them against the built-in defaults.

use crate::config::types::{DialogConfig, FocusConfig};
use crate::dialog::DialogPattern;
use crate::polling::PollOptions;

pub const DEFAULT_FOCUS_POLL_INTERVAL_MS: u64 = 50;
pub const DEFAULT_FOCUS_TIMEOUT_MS: u64 = 1000;
pub const DEFAULT_DIALOG_POLL_INTERVAL_MS: u64 = 100;
pub const DEFAULT_DIALOG_TIMEOUT_MS: u64 = 3000;

/// Window class of the common file dialog on Windows.
pub const DEFAULT_DIALOG_CLASS_NAMES: &[&str] = &["#32770"];

pub const DEFAULT_DIALOG_TITLE_PATTERNS: &[&str] = &["Choose File to Upload", "File Upload", "Open"];

impl FocusConfig {
    /// Returns the focus poll interval in milliseconds, defaulting to 50.
    pub fn poll_interval_ms(&self) -> u64 {
        self.poll_interval_ms
            .unwrap_or(DEFAULT_FOCUS_POLL_INTERVAL_MS)
    }

    /// Returns the focus wait budget in milliseconds, defaulting to 1000.
    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms.unwrap_or(DEFAULT_FOCUS_TIMEOUT_MS)
    }

    pub fn wait_options(&self) -> PollOptions {
        PollOptions::new(self.poll_interval_ms(), self.timeout_ms())
    }
}

impl DialogConfig {
    /// Returns the dialog poll interval in milliseconds, defaulting to 100.
    pub fn poll_interval_ms(&self) -> u64 {
        self.poll_interval_ms
            .unwrap_or(DEFAULT_DIALOG_POLL_INTERVAL_MS)
    }

    /// Returns the dialog search budget in milliseconds, defaulting to 3000.
    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms.unwrap_or(DEFAULT_DIALOG_TIMEOUT_MS)
    }

    pub fn class_names(&self) -> Vec<String> {
        self.class_names.clone().unwrap_or_else(|| {
            DEFAULT_DIALOG_CLASS_NAMES
                .iter()
                .map(|s| s.to_string())
                .collect()
        })
    }

    pub fn title_patterns(&self) -> Vec<String> {
        self.title_patterns.clone().unwrap_or_else(|| {
            DEFAULT_DIALOG_TITLE_PATTERNS
                .iter()
                .map(|s| s.to_string())
                .collect()
        })
    }

    pub fn wait_options(&self) -> PollOptions {
        PollOptions::new(self.poll_interval_ms(), self.timeout_ms())
    }

    pub fn pattern(&self) -> DialogPattern {
        DialogPattern::new(self.class_names(), self.title_patterns())
    }
}
