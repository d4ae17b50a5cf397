//! # Configuration System
//!
//! Hierarchical TOML configuration for the input delivery core.
//!
//! ## Configuration Hierarchy
//!
//! Configuration is loaded in the following order (later sources override earlier ones):
//! 1. **Hardcoded defaults** - Built-in fallback values
//! 2. **User config** - `~/.webpilot/config.toml`
//! 3. **Project config** - `./.webpilot/config.toml`
//!
//! ## Loading Configuration
//!
//! ```rust,no_run
//! use webpilot_core::config::PilotConfig;
//!
//! fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = PilotConfig::load_hierarchy()?;
//!     let focus_wait = config.focus.wait_options();
//!     println!("checking focus every {}ms", focus_wait.poll_interval_ms());
//!     Ok(())
//! }
//! ```

pub mod defaults;
pub mod loading;
pub mod types;
pub mod validation;

pub use types::{DialogConfig, FocusConfig, PilotConfig};
pub use validation::validate_config;

impl PilotConfig {
    /// Load configuration from the hierarchy of config files.
    ///
    /// See [`loading::load_hierarchy`] for details.
    pub fn load_hierarchy() -> Result<Self, crate::errors::ConfigError> {
        loading::load_hierarchy()
    }

    /// Validate the configuration.
    ///
    /// See [`validation::validate_config`] for details.
    pub fn validate(&self) -> Result<(), crate::errors::ConfigError> {
        validation::validate_config(self)
    }
}
