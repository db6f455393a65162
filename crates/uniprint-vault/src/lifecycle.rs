// SPDX-FileCopyrightText: 2026 Uniprint Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Startup: create the vault on first run, unlock it afterwards.
//!
//! ```text
//!            probe(path)
//!           /           \
//!      Missing         Present
//!         |               |
//!   PIN + confirm     PIN once
//!   create empty      read + decrypt
//!         \               /
//!          CredentialStore
//! ```
//!
//! A wrong PIN on the unlock branch ends the attempt with
//! [`UniprintError::Unlock`]; retrying is up to the caller.

use std::path::Path;

use tracing::info;
use uniprint_config::VaultConfig;
use uniprint_core::{Prompter, UniprintError};

use crate::prompt::acquire_pin;
use crate::store::{CredentialStore, StoreOptions};

/// Whether a vault file is present at the configured path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VaultState {
    Missing,
    Present,
}

/// Check for a vault file without reading it.
pub fn probe(path: &Path) -> Result<VaultState, UniprintError> {
    match std::fs::metadata(path) {
        Ok(_) => Ok(VaultState::Present),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(VaultState::Missing),
        Err(e) => Err(UniprintError::io(
            format!("checking vault {}", path.display()),
            e,
        )),
    }
}

/// First run: collect a confirmed PIN and write an empty vault.
pub fn bootstrap(
    path: &Path,
    prompter: &mut dyn Prompter,
    options: StoreOptions,
) -> Result<CredentialStore, UniprintError> {
    prompter.notice("No existing vault found. Please set a new PIN.");
    let pin = acquire_pin(prompter, true)?;
    let store = CredentialStore::create(path, &pin, options)?;
    prompter.notice("New encrypted vault initialized.");
    Ok(store)
}

/// Later runs: collect the PIN once and open the vault.
pub fn unlock(
    path: &Path,
    prompter: &mut dyn Prompter,
    options: StoreOptions,
) -> Result<CredentialStore, UniprintError> {
    prompter.notice("Encrypted vault found. Please enter your PIN to unlock it.");
    let pin = acquire_pin(prompter, false)?;
    let store = CredentialStore::open(path, &pin, options)?;
    prompter.notice("Vault unlocked.");
    Ok(store)
}

/// Resolve the vault path from config and run the matching branch.
pub fn initialize_store(
    config: &VaultConfig,
    prompter: &mut dyn Prompter,
) -> Result<CredentialStore, UniprintError> {
    let path = config.resolved_path()?;
    let options = StoreOptions::from(config);

    let store = match probe(&path)? {
        VaultState::Missing => bootstrap(&path, prompter, options)?,
        VaultState::Present => unlock(&path, prompter, options)?,
    };
    info!(path = %path.display(), records = store.len(), "credential store ready");
    Ok(store)
}
