//! Property-based tests.

mod common;

use asymmetric_rsa::{AsymmetricCryptography, RsaCrypto};
use common::{keys_1024, keys_2048};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn bytes_roundtrip(data in prop::collection::vec(any::<u8>(), 1..=2_000)) {
        let crypto = RsaCrypto::new();
        let keys = keys_1024();
        let encrypted = crypto.encrypt(&data, &keys.public).unwrap();
        prop_assert_ne!(&encrypted, &data);
        prop_assert_eq!(crypto.decrypt(&encrypted, &keys.private).unwrap(), data);
    }

    #[test]
    fn text_roundtrip(text in "\\PC{1,400}") {
        let crypto = RsaCrypto::new();
        let keys = keys_2048();
        let encrypted = crypto.encrypt_text(&text, &keys.public).unwrap();
        prop_assert_eq!(crypto.decrypt_text(&encrypted, &keys.private).unwrap(), text);
    }

    #[test]
    fn sign_roundtrip(msg in prop::collection::vec(any::<u8>(), 1..512)) {
        let crypto = RsaCrypto::new();
        let keys = keys_1024();
        let signature = crypto.sign(&msg, &keys.private).unwrap();
        prop_assert!(crypto.verify(&msg, &signature, &keys.public));
    }

    #[test]
    fn sign_rejects_mutation(msg in prop::collection::vec(any::<u8>(), 1..512), index in any::<prop::sample::Index>()) {
        let crypto = RsaCrypto::new();
        let keys = keys_1024();
        let signature = crypto.sign(&msg, &keys.private).unwrap();

        let mut mutated = msg.clone();
        let i = index.index(mutated.len());
        mutated[i] = mutated[i].wrapping_add(1);
        prop_assert!(!crypto.verify(&mutated, &signature, &keys.public));
    }
}
