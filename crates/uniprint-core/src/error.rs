// SPDX-FileCopyrightText: 2026 Uniprint Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the uniprint credential vault.

use thiserror::Error;

/// The error type returned by every vault, store and lifecycle operation.
#[derive(Debug, Error)]
pub enum UniprintError {
    /// Malformed PIN or confirmation mismatch. The prompt layer recovers from
    /// this by asking again.
    #[error("validation error: {0}")]
    Validation(String),

    /// The cipher codec rejected a ciphertext (short input, misaligned body,
    /// bad padding). Wrong PIN and corrupted file look identical here.
    #[error("decryption failed: {0}")]
    Decrypt(String),

    /// An existing vault could not be opened with the supplied PIN.
    #[error("failed to unlock vault at {path}: wrong PIN or corrupted file")]
    Unlock { path: String },

    /// The decrypted table is not a usable credential table.
    #[error("malformed credential table: {0}")]
    Format(String),

    /// No record carries the requested username.
    #[error("no credential stored for `{username}`")]
    NotFound { username: String },

    /// Filesystem failure.
    #[error("{context}: {source}")]
    Io {
        context: String,
        source: std::io::Error,
    },

    /// A mutation was applied in memory but writing the vault back failed.
    /// The in-memory list and the file may now disagree.
    #[error("vault state may be inconsistent, persisting failed: {source}")]
    Persist { source: Box<UniprintError> },

    /// Configuration that could not be resolved at runtime.
    #[error("configuration error: {0}")]
    Config(String),

    /// The prompt collaborator could not read input.
    #[error("prompt error: {0}")]
    Prompt(String),
}

impl UniprintError {
    /// Builds an [`UniprintError::Io`] with a short description of what was
    /// being attempted.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Wraps a write failure that happened after the in-memory list changed.
    pub fn persist(source: UniprintError) -> Self {
        Self::Persist {
            source: Box::new(source),
        }
    }

    /// True for the expected "no such username" outcome.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
