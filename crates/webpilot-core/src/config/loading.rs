//! Configuration loading and merging logic.
//!
//! # Configuration Hierarchy
//!
//! Configuration is loaded in the following order (later sources override earlier ones):
//! 1. **Hardcoded defaults** - Built-in fallback values
//! 2. **User config** - `~/.webpilot/config.toml`
//! 3. **Project config** - `./.webpilot/config.toml`

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::types::{DialogConfig, FocusConfig, PilotConfig};
use crate::config::validation::validate_config;
use crate::errors::ConfigError;

const CONFIG_DIR: &str = ".webpilot";
const CONFIG_FILE: &str = "config.toml";

/// Load configuration from the hierarchy of config files.
///
/// # Errors
///
/// Returns an error if a config file exists but cannot be read or parsed, or
/// if validation of the merged result fails. Missing config files are not errors.
pub fn load_hierarchy() -> Result<PilotConfig, ConfigError> {
    let user_path = user_config_path()?;
    let project_path = std::env::current_dir()?.join(CONFIG_DIR).join(CONFIG_FILE);
    load_from_paths(&[user_path, project_path])
}

/// Load and merge config files in order, skipping those that do not exist.
pub fn load_from_paths(paths: &[PathBuf]) -> Result<PilotConfig, ConfigError> {
    let mut config = PilotConfig::default();

    for path in paths {
        match load_config_file(path) {
            Ok(loaded) => {
                debug!(event = "core.config.file_loaded", path = %path.display());
                config = merge_configs(config, loaded);
            }
            Err(ConfigError::ConfigNotFound { .. }) => {
                debug!(event = "core.config.file_missing", path = %path.display());
            }
            Err(e) => return Err(e),
        }
    }

    validate_config(&config)?;
    Ok(config)
}

fn user_config_path() -> Result<PathBuf, ConfigError> {
    let home_dir = dirs::home_dir().ok_or(ConfigError::HomeDirectoryUnavailable)?;
    Ok(home_dir.join(CONFIG_DIR).join(CONFIG_FILE))
}

/// Load a configuration file from the given path.
fn load_config_file(path: &Path) -> Result<PilotConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ConfigError::ConfigNotFound {
                path: path.display().to_string(),
            }
        } else {
            ConfigError::IoError { source: e }
        }
    })?;

    toml::from_str(&content).map_err(|e| ConfigError::ConfigParseError {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Merge two configurations, with override_config taking precedence.
///
/// Override values replace base values only if present.
pub fn merge_configs(base: PilotConfig, override_config: PilotConfig) -> PilotConfig {
    PilotConfig {
        focus: FocusConfig {
            poll_interval_ms: override_config
                .focus
                .poll_interval_ms
                .or(base.focus.poll_interval_ms),
            timeout_ms: override_config.focus.timeout_ms.or(base.focus.timeout_ms),
        },
        dialog: DialogConfig {
            poll_interval_ms: override_config
                .dialog
                .poll_interval_ms
                .or(base.dialog.poll_interval_ms),
            timeout_ms: override_config.dialog.timeout_ms.or(base.dialog.timeout_ms),
            class_names: override_config.dialog.class_names.or(base.dialog.class_names),
            title_patterns: override_config
                .dialog
                .title_patterns
                .or(base.dialog.title_patterns),
        },
    }
}
