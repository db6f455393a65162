// SPDX-FileCopyrightText: 2026 Uniprint Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Lifecycle tests: first-run bootstrap, unlock, and failure paths, driven
//! through a scripted prompter.
//!
//! These go through the PIN environment lookup, so they are serialized.

use serial_test::serial;
use uniprint_core::{Credential, UniprintError};
use uniprint_test_utils::{ScriptedPrompter, TempVault};
use uniprint_vault::{crypto, initialize_store, kdf};

#[test]
#[serial]
fn bootstrap_creates_header_only_vault() {
    let vault = TempVault::new();
    let mut prompter = ScriptedPrompter::new().with_secrets(["abc123", "abc123"]);

    let store = initialize_store(&vault.config(), &mut prompter).unwrap();
    assert!(store.is_empty());
    assert_eq!(store.path(), vault.path());
    assert!(prompter.noticed("set a new PIN"));

    let plaintext = crypto::decrypt(&vault.read_bytes(), &kdf::derive_key(b"abc123")).unwrap();
    assert_eq!(plaintext.as_slice(), b"username,password\n");
}

#[test]
#[serial]
fn bootstrap_reprompts_until_confirmed() {
    let vault = TempVault::new();
    let mut prompter = ScriptedPrompter::new().with_secrets([
        "bad pin!", // rejected, not alphanumeric
        "abc123", "abc999", // mismatch
        "abc123", "abc123",
    ]);

    initialize_store(&vault.config(), &mut prompter).unwrap();
    assert!(prompter.noticed("alphanumeric"));
    assert!(prompter.noticed("do not match"));
    assert_eq!(prompter.remaining(), (0, 0));
}

#[test]
#[serial]
fn second_run_unlocks_without_confirmation() {
    let vault = TempVault::new();
    {
        let mut first = ScriptedPrompter::new().with_secrets(["abc123", "abc123"]);
        let mut store = initialize_store(&vault.config(), &mut first).unwrap();
        store.remember("alice@example.org", "s3cret").unwrap();
    }

    let mut second = ScriptedPrompter::new().with_secrets(["abc123"]);
    let mut store = initialize_store(&vault.config(), &mut second).unwrap();
    assert_eq!(second.labels(), ["Enter PIN: "]);
    assert!(second.noticed("Vault unlocked"));
    assert_eq!(
        store.lookup("alice@example.org").unwrap(),
        Some(Credential::new("alice@example.org", "s3cret"))
    );
}

#[test]
#[serial]
fn truncated_vault_fails_to_unlock() {
    let vault = TempVault::new();
    {
        let mut first = ScriptedPrompter::new().with_secrets(["abc123", "abc123"]);
        initialize_store(&vault.config(), &mut first).unwrap();
    }
    let mut bytes = vault.read_bytes();
    bytes.pop();
    vault.write_bytes(&bytes);

    let mut second = ScriptedPrompter::new().with_secrets(["abc123"]);
    let err = initialize_store(&vault.config(), &mut second).unwrap_err();
    assert!(matches!(err, UniprintError::Unlock { .. }), "got {err:?}");
}

#[test]
#[serial]
fn unlock_is_not_retried() {
    let vault = TempVault::new();
    {
        let mut first = ScriptedPrompter::new().with_secrets(["abc123", "abc123"]);
        initialize_store(&vault.config(), &mut first).unwrap();
    }
    let before = vault.read_bytes();

    let mut second = ScriptedPrompter::new().with_secrets(["wrong1", "abc123"]);
    let result = initialize_store(&vault.config(), &mut second);
    assert!(result.is_err());
    // Only one PIN was asked for; the correct one is still queued.
    assert_eq!(second.remaining(), (1, 0));
    assert_eq!(vault.read_bytes(), before);
}

#[test]
#[serial]
fn pin_from_environment_is_used() {
    let vault = TempVault::new();
    // SAFETY: env mutation is serialized by #[serial].
    unsafe { std::env::set_var(uniprint_vault::VAULT_PIN_ENV_VAR, "headless42") };
    let mut prompter = ScriptedPrompter::new();
    let created = initialize_store(&vault.config(), &mut prompter).map(|s| s.len());
    let reopened = initialize_store(&vault.config(), &mut prompter).map(|s| s.len());
    unsafe { std::env::remove_var(uniprint_vault::VAULT_PIN_ENV_VAR) };

    assert_eq!(created.unwrap(), 0);
    assert_eq!(reopened.unwrap(), 0);
    assert!(prompter.labels().is_empty());
}

#[test]
#[serial]
fn strict_rows_rejects_foreign_table() {
    let vault = TempVault::new();
    std::fs::create_dir_all(vault.path().parent().unwrap()).unwrap();
    let key = kdf::derive_key(b"abc123");
    vault.write_bytes(&crypto::encrypt(b"user\nalice\n", &key));

    let mut lenient = ScriptedPrompter::new().with_secrets(["abc123"]);
    let store = initialize_store(&vault.config(), &mut lenient).unwrap();
    assert!(store.is_empty());

    let mut config = vault.config();
    config.strict_rows = true;
    let mut strict = ScriptedPrompter::new().with_secrets(["abc123"]);
    let err = initialize_store(&config, &mut strict).unwrap_err();
    assert!(matches!(err, UniprintError::Format(_)));
}
