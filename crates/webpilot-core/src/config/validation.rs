use crate::config::types::PilotConfig;
use crate::errors::ConfigError;

/// Validate the configuration.
///
/// Intervals and budgets must be non-zero, and an interval may not exceed the
/// budget it polls within.
pub fn validate_config(config: &PilotConfig) -> Result<(), ConfigError> {
    validate_poll_settings(
        "focus",
        config.focus.poll_interval_ms(),
        config.focus.timeout_ms(),
    )?;
    validate_poll_settings(
        "dialog",
        config.dialog.poll_interval_ms(),
        config.dialog.timeout_ms(),
    )?;

    if config.dialog.class_names().is_empty() && config.dialog.title_patterns().is_empty() {
        return Err(ConfigError::InvalidConfiguration {
            message: "dialog.class_names and dialog.title_patterns cannot both be empty"
                .to_string(),
        });
    }

    Ok(())
}

fn validate_poll_settings(
    section: &str,
    poll_interval_ms: u64,
    timeout_ms: u64,
) -> Result<(), ConfigError> {
    if poll_interval_ms == 0 {
        return Err(ConfigError::InvalidConfiguration {
            message: format!("{}.poll_interval_ms must be greater than 0", section),
        });
    }
    if timeout_ms == 0 {
        return Err(ConfigError::InvalidConfiguration {
            message: format!("{}.timeout_ms must be greater than 0", section),
        });
    }
    if poll_interval_ms > timeout_ms {
        return Err(ConfigError::InvalidConfiguration {
            message: format!(
                "{}.poll_interval_ms ({}) cannot exceed {}.timeout_ms ({})",
                section, poll_interval_ms, section, timeout_ms
            ),
        });
    }
    Ok(())
}
