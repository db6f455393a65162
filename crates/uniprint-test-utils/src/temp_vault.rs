// SPDX-FileCopyrightText: 2026 Uniprint Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-test vault location.

use std::path::{Path, PathBuf};

use tempfile::TempDir;
use uniprint_config::VaultConfig;

/// A temporary directory holding one vault file path.
///
/// The vault file itself is not created; the directory is removed on drop.
#[derive(Debug)]
pub struct TempVault {
    // Held for its drop, which removes the directory.
    _dir: TempDir,
    path: PathBuf,
}

impl TempVault {
    /// A vault path nested one level below a fresh temp dir, so that
    /// bootstrap has to create the parent directory.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join(".uniprint").join("keys.csv.encrypted");
        Self { _dir: dir, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Vault config pointing at this location with default options.
    pub fn config(&self) -> VaultConfig {
        VaultConfig {
            path: self.path.display().to_string(),
            ..VaultConfig::default()
        }
    }

    /// Raw bytes of the vault file.
    pub fn read_bytes(&self) -> Vec<u8> {
        std::fs::read(&self.path).expect("read vault file")
    }

    /// Overwrite the vault file with arbitrary bytes.
    pub fn write_bytes(&self, bytes: &[u8]) {
        std::fs::write(&self.path, bytes).expect("write vault file");
    }
}

impl Default for TempVault {
    fn default() -> Self {
        Self::new()
    }
}
