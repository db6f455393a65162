// SPDX-FileCopyrightText: 2026 Uniprint Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs.
//!
//! All structs use `#[serde(deny_unknown_fields)]` so a misspelt key is
//! reported at startup instead of silently ignored.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use uniprint_core::UniprintError;

/// Top-level uniprint configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct UniprintConfig {
    /// Encrypted credential vault settings.
    #[serde(default)]
    pub vault: VaultConfig,

    /// Logging settings.
    #[serde(default)]
    pub log: LogConfig,

    /// Remote account defaults.
    #[serde(default)]
    pub account: AccountConfig,
}

/// Encrypted credential vault configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct VaultConfig {
    /// Vault file location. Relative paths are resolved against the home
    /// directory.
    #[serde(default = "default_vault_path")]
    pub path: String,

    /// Reject rows with fewer than two fields and unexpected headers instead
    /// of skipping them.
    #[serde(default)]
    pub strict_rows: bool,

    /// Persist through a temporary file and rename instead of overwriting
    /// the vault in place.
    #[serde(default)]
    pub atomic_write: bool,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            path: default_vault_path(),
            strict_rows: false,
            atomic_write: false,
        }
    }
}

impl VaultConfig {
    /// Absolute location of the vault file.
    pub fn resolved_path(&self) -> Result<PathBuf, UniprintError> {
        let configured = PathBuf::from(self.path.trim());
        if configured.is_absolute() {
            return Ok(configured);
        }
        let home = dirs::home_dir().ok_or_else(|| {
            UniprintError::Config("cannot resolve home directory for vault.path".to_string())
        })?;
        Ok(home.join(configured))
    }
}

fn default_vault_path() -> String {
    ".uniprint/keys.csv.encrypted".to_string()
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

/// Remote account defaults.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AccountConfig {
    /// Host appended to usernames entered without an `@`.
    #[serde(default = "default_host")]
    pub default_host: String,
}

impl Default for AccountConfig {
    fn default() -> Self {
        Self {
            default_host: default_host(),
        }
    }
}

fn default_host() -> String {
    "login.informatik.uni-freiburg.de".to_string()
}

impl AccountConfig {
    /// Qualifies a bare username with the default host.
    ///
    /// Input is trimmed; anything already containing `@` is returned as is.
    pub fn qualify(&self, username: &str) -> String {
        let username = username.trim();
        if username.contains('@') {
            username.to_string()
        } else {
            format!("{username}@{}", self.default_host)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_vault_path_is_kept() {
        let config = VaultConfig {
            path: "/var/lib/uniprint/vault.bin".to_string(),
            ..VaultConfig::default()
        };
        assert_eq!(
            config.resolved_path().unwrap(),
            PathBuf::from("/var/lib/uniprint/vault.bin")
        );
    }

    #[test]
    fn relative_vault_path_is_home_relative() {
        let Some(home) = dirs::home_dir() else {
            return;
        };
        let resolved = VaultConfig::default().resolved_path().unwrap();
        assert_eq!(resolved, home.join(".uniprint/keys.csv.encrypted"));
    }

    #[test]
    fn qualify_appends_default_host() {
        let account = AccountConfig::default();
        assert_eq!(
            account.qualify(" jdoe \n"),
            "jdoe@login.informatik.uni-freiburg.de"
        );
        assert_eq!(account.qualify("jdoe@example.org"), "jdoe@example.org");
    }
}
