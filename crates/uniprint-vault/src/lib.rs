// SPDX-FileCopyrightText: 2026 Uniprint Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! PIN-protected credential vault for uniprint.
//!
//! Remote-login usernames and passwords are kept in a CSV table, most
//! recently used first, sealed with AES-256-CBC under a key derived from a
//! PIN with SHA-256. The PIN itself is never stored.
//!
//! The entry point is [`initialize_store`], which creates the vault on first
//! run or unlocks it on later runs, and returns the [`CredentialStore`] the
//! rest of the program works with.

pub mod crypto;
pub mod kdf;
pub mod lifecycle;
pub mod prompt;
pub mod record;
pub mod store;

pub use lifecycle::{VaultState, initialize_store, probe};
pub use prompt::{TerminalPrompter, VAULT_PIN_ENV_VAR, acquire_pin, validate_pin};
pub use record::RowPolicy;
pub use store::{CredentialStore, StoreOptions, mask_secret};
