// SPDX-FileCopyrightText: 2026 Parkdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.

use chrono::format::{Item, StrftimeItems};

use crate::diagnostic::ConfigError;
use crate::model::ParkdeskConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Collects every failure instead of stopping at the first one.
pub fn validate_config(config: &ParkdeskConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let base_url = config.api.base_url.trim();
    if base_url.is_empty() {
        errors.push(ConfigError::Validation {
            message: "api.base_url must not be empty".to_string(),
        });
    } else if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        errors.push(ConfigError::Validation {
            message: format!("api.base_url `{base_url}` must start with http:// or https://"),
        });
    }

    if config.api.request_timeout_secs == Some(0) {
        errors.push(ConfigError::Validation {
            message: "api.request_timeout_secs must be greater than 0 when set".to_string(),
        });
    }

    let level = config.desk.log_level.trim().to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "desk.log_level `{}` is not one of {}",
                config.desk.log_level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    let time_format = &config.desk.time_format;
    if time_format.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "desk.time_format must not be empty".to_string(),
        });
    } else if !is_renderable(time_format) {
        errors.push(ConfigError::Validation {
            message: format!("desk.time_format `{time_format}` is not a valid strftime pattern"),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// chrono fails at render time on any pattern that parses to an error item.
fn is_renderable(time_format: &str) -> bool {
    !StrftimeItems::new(time_format).any(|item| matches!(item, Item::Error))
}
