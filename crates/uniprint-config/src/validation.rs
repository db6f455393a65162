// SPDX-FileCopyrightText: 2026 Uniprint Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation of configuration values.

use crate::diagnostic::ConfigError;
use crate::model::UniprintConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration.
///
/// Collects every problem instead of stopping at the first.
pub fn validate_config(config: &UniprintConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.vault.path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "vault.path must not be empty".to_string(),
        });
    }

    let level = config.log.level.trim().to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "log.level `{}` is not one of {}",
                config.log.level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    let host = &config.account.default_host;
    if host.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "account.default_host must not be empty".to_string(),
        });
    } else if host.contains('@') || host.chars().any(char::is_whitespace) {
        errors.push(ConfigError::Validation {
            message: format!("account.default_host `{host}` must be a bare host name"),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
