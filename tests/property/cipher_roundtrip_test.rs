//! Property-based tests for the export cipher.
//!
//! Decrypting with the key used for encryption restores any byte string, and
//! the transform never changes the length.

use passkeep::services::cipher::{Cipher, CipherTrait};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn decrypt_inverts_encrypt(
        plaintext in proptest::collection::vec(any::<u8>(), 0..=512),
        key in proptest::collection::vec(any::<u8>(), 1..=64),
    ) {
        let cipher = Cipher::new();
        let encrypted = cipher.encrypt(&plaintext, &key).unwrap();
        prop_assert_eq!(encrypted.len(), plaintext.len());

        let decrypted = cipher.decrypt(&encrypted, &key).unwrap();
        prop_assert_eq!(decrypted, plaintext);
    }

    #[test]
    fn encrypt_inverts_decrypt(
        ciphertext in proptest::collection::vec(any::<u8>(), 0..=512),
        key in proptest::collection::vec(any::<u8>(), 1..=64),
    ) {
        let cipher = Cipher::new();
        let plain = cipher.decrypt(&ciphertext, &key).unwrap();
        prop_assert_eq!(cipher.encrypt(&plain, &key).unwrap(), ciphertext);
    }

    #[test]
    fn empty_key_always_rejected(plaintext in proptest::collection::vec(any::<u8>(), 0..=64)) {
        let cipher = Cipher::new();
        prop_assert!(cipher.encrypt(&plaintext, &[]).is_err());
        prop_assert!(cipher.decrypt(&plaintext, &[]).is_err());
    }
}
