// SPDX-FileCopyrightText: 2026 Uniprint Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Layered configuration loading with Figment.
//!
//! Merge order, later wins: compiled defaults, `/etc/uniprint/uniprint.toml`,
//! `~/.config/uniprint/uniprint.toml`, `./uniprint.toml`, `UNIPRINT_*`
//! environment variables.

#![allow(clippy::result_large_err)] // figment::Error is external

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::UniprintConfig;

/// System-wide config file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/uniprint/uniprint.toml";

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "uniprint.toml";

/// Environment variables that share a section prefix but are not
/// configuration keys.
const NON_CONFIG_ENV_KEYS: &[&str] = &["vault_pin"];

/// Sections reachable from `UNIPRINT_<SECTION>_<FIELD>` variables. Other
/// `UNIPRINT_*` variables are not configuration and are skipped.
const ENV_SECTIONS: &[&str] = &["vault", "log", "account"];

/// Per-user config file under the XDG config directory.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("uniprint").join(LOCAL_CONFIG_FILE))
}

/// Load configuration from the standard hierarchy with env var overrides.
pub fn load_config() -> Result<UniprintConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string on top of the defaults only.
pub fn load_config_from_str(toml_content: &str) -> Result<UniprintConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(UniprintConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from an explicit file, skipping the lookup hierarchy.
///
/// Unlike the hierarchy files, a missing explicit file is an error.
pub fn load_config_from_path(path: &Path) -> Result<UniprintConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(UniprintConfig::default()))
        .merge(Toml::file_exact(path))
        .merge(env_provider())
        .extract()
}

/// The Figment used by [`load_config`], before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(UniprintConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG_FILE))
        .merge(env_provider())
}

/// `UNIPRINT_VAULT_ATOMIC_WRITE` must land on `vault.atomic_write`, so the
/// section is mapped explicitly rather than splitting on every underscore.
fn env_provider() -> Env {
    Env::prefixed("UNIPRINT_")
        .ignore(NON_CONFIG_ENV_KEYS)
        .filter_map(|key| {
            let key = key.as_str().to_ascii_lowercase();
            ENV_SECTIONS.iter().find_map(|section| {
                let field = key.strip_prefix(section)?.strip_prefix('_')?;
                Some(format!("{section}.{field}").into())
            })
        })
}
