// SPDX-FileCopyrightText: 2026 Uniprint Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The credential store: an in-memory list in recency order, backed by the
//! encrypted vault file.
//!
//! Every mutation rewrites the whole vault. The new plaintext is serialized
//! and encrypted before the file is touched, so an encoding failure leaves
//! the file as it was. A failure while writing is reported as
//! [`UniprintError::Persist`]: the in-memory list already holds the change
//! and the file may be truncated. By default the file is overwritten in
//! place; [`StoreOptions::atomic_write`] switches to write-then-rename.

use std::io::Write;
use std::path::{Path, PathBuf};

use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, info};
use uniprint_config::VaultConfig;
use uniprint_core::{Credential, UniprintError};

use crate::crypto;
use crate::kdf::{self, VaultKey};
use crate::record::{self, RowPolicy};

/// Behavior switches for a store, usually taken from [`VaultConfig`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreOptions {
    /// How undecodable rows are treated on load.
    pub rows: RowPolicy,
    /// Persist through a temp file in the vault directory and a rename.
    pub atomic_write: bool,
}

impl From<&VaultConfig> for StoreOptions {
    fn from(config: &VaultConfig) -> Self {
        Self {
            rows: if config.strict_rows {
                RowPolicy::Strict
            } else {
                RowPolicy::Lenient
            },
            atomic_write: config.atomic_write,
        }
    }
}

/// An unlocked vault.
///
/// Debug output omits the key and the secrets.
pub struct CredentialStore {
    path: PathBuf,
    key: VaultKey,
    records: Vec<Credential>,
    options: StoreOptions,
}

impl std::fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialStore")
            .field("path", &self.path)
            .field("key", &"[REDACTED]")
            .field("records", &self.records.len())
            .field("options", &self.options)
            .finish()
    }
}

impl CredentialStore {
    /// Write a new vault holding an empty table and return it unlocked.
    ///
    /// Parent directories are created as needed. An existing file at `path`
    /// is overwritten.
    pub fn create(
        path: &Path,
        pin: &SecretString,
        options: StoreOptions,
    ) -> Result<Self, UniprintError> {
        let store = Self {
            path: path.to_path_buf(),
            key: kdf::derive_key(pin.expose_secret().as_bytes()),
            records: Vec::new(),
            options,
        };

        if let Some(parent) = path.parent() {
            create_private_dir(parent)?;
        }
        store.persist()?;

        info!(path = %path.display(), "vault created");
        Ok(store)
    }

    /// Read and decrypt an existing vault.
    ///
    /// A decryption failure becomes [`UniprintError::Unlock`]; a table that
    /// decrypts but does not parse stays [`UniprintError::Format`].
    pub fn open(
        path: &Path,
        pin: &SecretString,
        options: StoreOptions,
    ) -> Result<Self, UniprintError> {
        let key = kdf::derive_key(pin.expose_secret().as_bytes());
        let sealed = std::fs::read(path)
            .map_err(|e| UniprintError::io(format!("reading vault {}", path.display()), e))?;
        let plaintext = crypto::decrypt(&sealed, &key).map_err(|_| UniprintError::Unlock {
            path: path.display().to_string(),
        })?;
        let records = record::deserialize(&plaintext, options.rows)?;

        debug!(path = %path.display(), records = records.len(), "vault unlocked");
        Ok(Self {
            path: path.to_path_buf(),
            key,
            records,
            options,
        })
    }

    /// Put `record` in front and persist. Does not check for an existing
    /// record with the same username; see [`Self::remember`].
    pub fn add(&mut self, record: Credential) -> Result<(), UniprintError> {
        debug!(username = %record.username(), "adding credential");
        self.records.insert(0, record);
        self.persist().map_err(UniprintError::persist)
    }

    /// Replace the first record named `username` with `record`, in front.
    ///
    /// On [`UniprintError::NotFound`] neither the list nor the file changes.
    pub fn update(&mut self, username: &str, record: Credential) -> Result<(), UniprintError> {
        let index = self.position(username)?;
        debug!(username = %username, "updating credential");
        self.records.remove(index);
        self.records.insert(0, record);
        self.persist().map_err(UniprintError::persist)
    }

    /// Return the first record named `username` after moving it to the front
    /// and persisting the new order.
    ///
    /// On [`UniprintError::NotFound`] neither the list nor the file changes.
    pub fn access(&mut self, username: &str) -> Result<Credential, UniprintError> {
        let index = self.position(username)?;
        self.records[..=index].rotate_right(1);
        self.persist().map_err(UniprintError::persist)?;
        debug!(username = %username, "credential accessed");
        Ok(self.records[0].clone())
    }

    /// Like [`Self::access`], with a missing username as `None`.
    pub fn lookup(&mut self, username: &str) -> Result<Option<Credential>, UniprintError> {
        match self.access(username) {
            Ok(credential) => Ok(Some(credential)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Store a secret for `username`, replacing an existing record rather
    /// than adding a duplicate.
    pub fn remember(&mut self, username: &str, secret: &str) -> Result<(), UniprintError> {
        let record = Credential::new(username, secret);
        if self.contains(username) {
            self.update(username, record)
        } else {
            self.add(record)
        }
    }

    /// Drop the first record named `username` and persist.
    pub fn remove(&mut self, username: &str) -> Result<Credential, UniprintError> {
        let index = self.position(username)?;
        let removed = self.records.remove(index);
        self.persist().map_err(UniprintError::persist)?;
        info!(username = %username, "credential removed");
        Ok(removed)
    }

    /// Re-encrypt the vault under a new PIN.
    ///
    /// If writing fails the old key is kept, so the store keeps matching
    /// whatever the file was sealed with before the call.
    pub fn change_pin(&mut self, new_pin: &SecretString) -> Result<(), UniprintError> {
        let new_key = kdf::derive_key(new_pin.expose_secret().as_bytes());
        let old_key = std::mem::replace(&mut self.key, new_key);
        if let Err(e) = self.persist() {
            self.key = old_key;
            return Err(UniprintError::persist(e));
        }
        info!(path = %self.path.display(), "vault PIN changed");
        Ok(())
    }

    /// Records in recency order, most recent first.
    pub fn records(&self) -> &[Credential] {
        &self.records
    }

    pub fn contains(&self, username: &str) -> bool {
        self.records.iter().any(|r| r.username() == username)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn position(&self, username: &str) -> Result<usize, UniprintError> {
        self.records
            .iter()
            .position(|r| r.username() == username)
            .ok_or_else(|| UniprintError::NotFound {
                username: username.to_string(),
            })
    }

    fn persist(&self) -> Result<(), UniprintError> {
        let plaintext = record::serialize(&self.records)?;
        let sealed = crypto::encrypt(&plaintext, &self.key);
        write_vault(&self.path, &sealed, self.options.atomic_write)?;
        debug!(records = self.records.len(), "vault persisted");
        Ok(())
    }
}

/// Mask a secret for display: first and last four characters around
/// `...`, or `****` when shorter than ten characters.
pub fn mask_secret(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() < 10 {
        return "****".to_string();
    }
    let prefix: String = chars[..4].iter().collect();
    let suffix: String = chars[chars.len() - 4..].iter().collect();
    format!("{prefix}...{suffix}")
}

/// Create `dir` and its parents, owner-only on Unix.
pub(crate) fn create_private_dir(dir: &Path) -> Result<(), UniprintError> {
    if dir.as_os_str().is_empty() {
        return Ok(());
    }
    let mut builder = std::fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o700);
    }
    builder
        .create(dir)
        .map_err(|e| UniprintError::io(format!("creating directory {}", dir.display()), e))
}

/// Write sealed vault bytes, owner-only on Unix.
fn write_vault(path: &Path, bytes: &[u8], atomic: bool) -> Result<(), UniprintError> {
    let context = || format!("writing vault {}", path.display());

    if atomic {
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let mut tmp = tempfile::NamedTempFile::new_in(dir)
            .map_err(|e| UniprintError::io(context(), e))?;
        tmp.write_all(bytes)
            .and_then(|()| tmp.as_file().sync_all())
            .map_err(|e| UniprintError::io(context(), e))?;
        tmp.persist(path)
            .map_err(|e| UniprintError::io(context(), e.error))?;
        return Ok(());
    }

    let mut options = std::fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options.open(path).map_err(|e| UniprintError::io(context(), e))?;
    file.write_all(bytes)
        .map_err(|e| UniprintError::io(context(), e))
}
