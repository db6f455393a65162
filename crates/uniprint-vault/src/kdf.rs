// SPDX-FileCopyrightText: 2026 Uniprint Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! PIN to key derivation.
//!
//! The key is SHA-256 of the PIN bytes. There is no salt and no work factor:
//! the same PIN always yields the same key, across every vault.

use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

/// Length of a derived key in bytes (AES-256).
pub const KEY_LEN: usize = 32;

/// A derived vault key, zeroed on drop.
pub type VaultKey = Zeroizing<[u8; KEY_LEN]>;

/// Derive the vault key from a PIN. Deterministic and infallible.
pub fn derive_key(pin: &[u8]) -> VaultKey {
    let mut key = Zeroizing::new([0u8; KEY_LEN]);
    key.copy_from_slice(&Sha256::digest(pin));
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_pin_same_key() {
        assert_eq!(*derive_key(b"abc123"), *derive_key(b"abc123"));
    }

    #[test]
    fn different_pin_different_key() {
        assert_ne!(*derive_key(b"abc123"), *derive_key(b"abc124"));
    }

    #[test]
    fn key_is_sha256_of_pin() {
        // SHA-256("abc")
        let expected: [u8; 32] = [
            0xba, 0x78, 0x16, 0xbf, 0x8f, 0x01, 0xcf, 0xea, 0x41, 0x41, 0x40, 0xde, 0x5d, 0xae,
            0x22, 0x23, 0xb0, 0x03, 0x61, 0xa3, 0x96, 0x17, 0x7a, 0x9c, 0xb4, 0x10, 0xff, 0x61,
            0xf2, 0x00, 0x15, 0xad,
        ];
        assert_eq!(*derive_key(b"abc"), expected);
    }
}
