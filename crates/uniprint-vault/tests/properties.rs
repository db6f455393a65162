// SPDX-FileCopyrightText: 2026 Uniprint Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Property tests for the seal/open pipeline and recency ordering.

use proptest::prelude::*;
use secrecy::SecretString;
use uniprint_core::Credential;
use uniprint_test_utils::TempVault;
use uniprint_vault::record::{self, RowPolicy};
use uniprint_vault::{CredentialStore, StoreOptions, crypto, kdf};

fn credentials() -> impl Strategy<Value = Vec<Credential>> {
    // Usernames are non-empty so that a row never collapses to one empty
    // field; secrets may contain delimiters, quotes and newlines.
    prop::collection::vec(("[a-z0-9@.]{1,24}", "[ -~\n]{0,32}"), 0..12)
        .prop_map(|rows| rows.into_iter().map(|(u, s)| Credential::new(u, s)).collect())
}

proptest! {
    #[test]
    fn table_survives_encrypt_decrypt(records in credentials(), pin in "[a-zA-Z0-9]{1,12}") {
        let key = kdf::derive_key(pin.as_bytes());
        let sealed = crypto::encrypt(&record::serialize(&records).unwrap(), &key);
        prop_assert_eq!((sealed.len() - crypto::BLOCK_SIZE) % crypto::BLOCK_SIZE, 0);

        let opened = crypto::decrypt(&sealed, &key).unwrap();
        prop_assert_eq!(record::deserialize(&opened, RowPolicy::Strict).unwrap(), records);
    }

    #[test]
    fn access_moves_exactly_one_record(count in 1usize..8, pick in 0usize..8) {
        let pick = pick % count;
        let vault = TempVault::new();
        let pin = SecretString::from("abc123".to_string());
        let mut store = CredentialStore::create(vault.path(), &pin, StoreOptions::default()).unwrap();
        for i in 0..count {
            store.add(Credential::new(format!("user{i}"), "pw")).unwrap();
        }
        let before: Vec<String> = store.records().iter().map(|r| r.username().to_string()).collect();

        let target = before[pick].clone();
        store.access(&target).unwrap();

        let mut expected = before.clone();
        let moved = expected.remove(pick);
        expected.insert(0, moved);
        let after: Vec<String> = store.records().iter().map(|r| r.username().to_string()).collect();
        prop_assert_eq!(after, expected);
    }
}
