// SPDX-FileCopyrightText: 2026 Uniprint Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! AES-256-CBC encrypt/decrypt for the vault payload.
//!
//! Vault layout: `[16-byte IV][ciphertext]`, the ciphertext length being a
//! non-zero multiple of 16. Padding appends `n` bytes of value `n`, with
//! `1 <= n <= 16`, so aligned input gains a whole block. Decryption checks
//! every pad byte, which turns most wrong keys into a padding error rather
//! than garbage plaintext.
//!
//! The IV is the first 16 bytes of the key, not random. Every vault sealed
//! with the same PIN therefore starts with the same keystream, and there is
//! no authentication tag: a wrong PIN and a damaged file are both reported
//! as [`UniprintError::Decrypt`]. Replacing this needs a random IV and an
//! AEAD, which changes the on-disk format.

use aes::Aes256;
use cbc::cipher::block_padding::NoPadding;
use cbc::cipher::generic_array::GenericArray;
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use uniprint_core::UniprintError;
use zeroize::Zeroizing;

use crate::kdf::{KEY_LEN, VaultKey};

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// AES block size, also the length of the IV slot.
pub const BLOCK_SIZE: usize = 16;

/// IV slot contents for a key.
fn iv_for(key: &[u8; KEY_LEN]) -> [u8; BLOCK_SIZE] {
    let mut iv = [0u8; BLOCK_SIZE];
    iv.copy_from_slice(&key[..BLOCK_SIZE]);
    iv
}

/// Pad and encrypt `plaintext`, returning `IV || ciphertext`.
pub fn encrypt(plaintext: &[u8], key: &VaultKey) -> Vec<u8> {
    let pad = BLOCK_SIZE - plaintext.len() % BLOCK_SIZE;
    let iv = iv_for(key);

    let mut out = Vec::with_capacity(BLOCK_SIZE + plaintext.len() + pad);
    out.extend_from_slice(&iv);
    out.extend_from_slice(plaintext);
    out.resize(out.len() + pad, pad as u8);

    let body_len = out.len() - BLOCK_SIZE;
    let cipher = Aes256CbcEnc::new(
        GenericArray::from_slice(&key[..]),
        GenericArray::from_slice(&iv),
    );
    // The body is block-aligned by construction, NoPadding cannot fail.
    let _ = cipher.encrypt_padded_mut::<NoPadding>(&mut out[BLOCK_SIZE..], body_len);

    out
}

/// Decrypt `IV || ciphertext` and strip the padding.
pub fn decrypt(data: &[u8], key: &VaultKey) -> Result<Zeroizing<Vec<u8>>, UniprintError> {
    if data.len() < BLOCK_SIZE {
        return Err(UniprintError::Decrypt("ciphertext too short".to_string()));
    }
    let (iv, body) = data.split_at(BLOCK_SIZE);
    if body.is_empty() {
        return Err(UniprintError::Decrypt("ciphertext body is empty".to_string()));
    }
    if body.len() % BLOCK_SIZE != 0 {
        return Err(UniprintError::Decrypt(
            "ciphertext is not a multiple of the block size".to_string(),
        ));
    }

    let mut buf = Zeroizing::new(body.to_vec());
    let cipher = Aes256CbcDec::new(
        GenericArray::from_slice(&key[..]),
        GenericArray::from_slice(iv),
    );
    cipher
        .decrypt_padded_mut::<NoPadding>(&mut buf)
        .map_err(|_| UniprintError::Decrypt("block decryption failed".to_string()))?;

    let pad = usize::from(buf[buf.len() - 1]);
    if pad == 0
        || pad > BLOCK_SIZE
        || buf[buf.len() - pad..].iter().any(|&b| usize::from(b) != pad)
    {
        return Err(UniprintError::Decrypt("invalid padding".to_string()));
    }
    let len = buf.len() - pad;
    buf.truncate(len);
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kdf::derive_key;

    #[test]
    fn roundtrip() {
        let key = derive_key(b"abc123");
        let sealed = encrypt(b"username,password\n", &key);
        assert_eq!(decrypt(&sealed, &key).unwrap().as_slice(), b"username,password\n");
    }

    #[test]
    fn iv_slot_is_derived_from_key() {
        let key = derive_key(b"abc123");
        let sealed = encrypt(b"x", &key);
        assert_eq!(&sealed[..BLOCK_SIZE], &key[..BLOCK_SIZE]);
    }

    #[test]
    fn encryption_is_deterministic_per_pin() {
        let key = derive_key(b"abc123");
        assert_eq!(encrypt(b"same", &key), encrypt(b"same", &key));
    }

    #[test]
    fn aligned_input_gets_a_full_padding_block() {
        let key = derive_key(b"pin");
        let sealed = encrypt(&[7u8; 32], &key);
        assert_eq!(sealed.len(), BLOCK_SIZE + 32 + BLOCK_SIZE);
        assert_eq!(decrypt(&sealed, &key).unwrap().as_slice(), &[7u8; 32]);
    }

    #[test]
    fn empty_input_is_one_padding_block() {
        let key = derive_key(b"pin");
        let sealed = encrypt(b"", &key);
        assert_eq!(sealed.len(), 2 * BLOCK_SIZE);
        assert!(decrypt(&sealed, &key).unwrap().is_empty());
    }

    #[test]
    fn short_input_is_rejected() {
        let key = derive_key(b"pin");
        let err = decrypt(&[0u8; BLOCK_SIZE - 1], &key).unwrap_err();
        assert!(matches!(err, UniprintError::Decrypt(_)));
    }

    #[test]
    fn iv_only_is_rejected() {
        let key = derive_key(b"pin");
        assert!(decrypt(&[0u8; BLOCK_SIZE], &key).is_err());
    }

    #[test]
    fn misaligned_body_is_rejected() {
        let key = derive_key(b"pin");
        let mut sealed = encrypt(b"hello", &key);
        sealed.pop();
        let err = decrypt(&sealed, &key).unwrap_err();
        assert!(err.to_string().contains("multiple of the block size"));
    }

    #[test]
    fn wrong_key_does_not_recover_plaintext() {
        let plaintext = b"username,password\nalice,secret\n";
        let sealed = encrypt(plaintext, &derive_key(b"right1"));

        let mut rejected = 0;
        for i in 0..256 {
            let wrong = derive_key(format!("wrong{i}").as_bytes());
            match decrypt(&sealed, &wrong) {
                Err(UniprintError::Decrypt(_)) => rejected += 1,
                Err(other) => panic!("unexpected error {other:?}"),
                Ok(opened) => assert_ne!(opened.as_slice(), plaintext),
            }
        }
        // A wrong key yields valid padding only when the last bytes happen
        // to form one, about one time in 256.
        assert!(rejected >= 240, "only {rejected} of 256 wrong keys rejected");
    }

    #[test]
    fn inconsistent_padding_bytes_are_rejected() {
        let key = derive_key(b"pin");
        // Last byte claims three pad bytes, the two before it disagree.
        let mut block = [b'x'; BLOCK_SIZE];
        block[BLOCK_SIZE - 3] = 1;
        block[BLOCK_SIZE - 2] = 2;
        block[BLOCK_SIZE - 1] = 3;

        let iv = iv_for(&key);
        let mut sealed = iv.to_vec();
        sealed.extend_from_slice(&block);
        let cipher = Aes256CbcEnc::new(
            GenericArray::from_slice(&key[..]),
            GenericArray::from_slice(&iv),
        );
        cipher
            .encrypt_padded_mut::<NoPadding>(&mut sealed[BLOCK_SIZE..], BLOCK_SIZE)
            .unwrap();

        let err = decrypt(&sealed, &key).unwrap_err();
        assert!(err.to_string().contains("invalid padding"));
    }
}
