// SPDX-FileCopyrightText: 2026 Uniprint Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Credential commands that run against an unlocked store.
//!
//! Usernames typed by the operator are qualified with the configured default
//! host before they reach the store, so `jdoe` and
//! `jdoe@login.informatik.uni-freiburg.de` name the same record.

use secrecy::ExposeSecret;
use tracing::info;
use uniprint_config::AccountConfig;
use uniprint_core::{Credential, Prompter, UniprintError};
use uniprint_vault::{CredentialStore, mask_secret, prompt};

/// Question asked before a newly entered password is stored.
const SAVE_QUESTION: &str = "Do you want to save the account to storage?";

/// Resolve the login to use for a remote print job.
///
/// Asks for a username and returns the stored credential when there is one,
/// bumping it to the front. Otherwise asks for the password and offers to
/// store it. The credential is returned either way.
pub fn resolve_credentials(
    store: &mut CredentialStore,
    prompter: &mut dyn Prompter,
    account: &AccountConfig,
) -> Result<Credential, UniprintError> {
    let entered = prompter.read_line("Enter your email (e.g., user@host): ")?;
    let username = account.qualify(&entered);

    if let Some(credential) = store.lookup(&username)? {
        info!(username = %username, "using stored credential");
        return Ok(credential);
    }

    let password = prompter.read_secret("Enter your password: ")?;
    let credential = Credential::new(username, password.expose_secret());
    if prompter.confirm(SAVE_QUESTION, true)? {
        store.add(credential.clone())?;
        prompter.notice("Account saved.");
    }
    Ok(credential)
}

/// Stored secret for `username`, if any.
pub fn lookup(
    store: &mut CredentialStore,
    account: &AccountConfig,
    username: &str,
) -> Result<Option<Credential>, UniprintError> {
    store.lookup(&account.qualify(username))
}

/// Ask for a password and store it for `username`, replacing an old one.
pub fn remember(
    store: &mut CredentialStore,
    prompter: &mut dyn Prompter,
    account: &AccountConfig,
    username: &str,
) -> Result<String, UniprintError> {
    let username = account.qualify(username);
    let password = prompter.read_secret("Enter your password: ")?;
    store.remember(&username, password.expose_secret())?;
    Ok(username)
}

/// Drop the record for `username`.
pub fn forget(
    store: &mut CredentialStore,
    account: &AccountConfig,
    username: &str,
) -> Result<String, UniprintError> {
    let username = account.qualify(username);
    store.remove(&username)?;
    Ok(username)
}

/// `(username, masked secret)` rows in recency order.
pub fn list(store: &CredentialStore) -> Vec<(String, String)> {
    store
        .records()
        .iter()
        .map(|r| (r.username().to_string(), mask_secret(r.secret())))
        .collect()
}

/// Ask for a new confirmed PIN and reseal the vault with it.
///
/// The PIN environment variable is not consulted here: it holds the PIN
/// that unlocked the vault.
pub fn change_pin(
    store: &mut CredentialStore,
    prompter: &mut dyn Prompter,
) -> Result<(), UniprintError> {
    prompter.notice("Choose a new PIN.");
    let pin = prompt::prompt_pin(prompter, true)?;
    store.change_pin(&pin)?;
    prompter.notice("PIN changed.");
    Ok(())
}
