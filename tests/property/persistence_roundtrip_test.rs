//! Property-based tests for the export file round trip.
//!
//! For any store whose ciphertexts contain no newline, reading back a written
//! export yields one entry per written password, keyed by category and id,
//! and the same category blocks that were written.

use passkeep::managers::category_manager::{CategoryManager, CategoryManagerTrait};
use passkeep::services::cipher::Cipher;
use passkeep::services::persistence_codec::{seal, PersistenceCodec, PersistenceCodecTrait};
use proptest::prelude::*;

fn arb_store() -> impl Strategy<Value = Vec<(String, Vec<String>)>> {
    proptest::collection::vec(
        (
            "[A-Za-z][A-Za-z0-9 ]{0,11}",
            proptest::collection::vec("[ -~]{1,12}", 0..4),
        ),
        0..4,
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn write_then_read_preserves_ciphertexts(
        layout in arb_store(),
        key in proptest::collection::vec(1u8..=255, 1..=16),
    ) {
        let mut mgr = CategoryManager::new();
        for (name, secrets) in &layout {
            let id = mgr.add(name);
            for secret in secrets {
                mgr.add_password(id, secret).unwrap();
            }
        }

        let snapshot = seal(mgr.list(), &Cipher::new(), &key).unwrap();
        prop_assume!(snapshot
            .categories
            .iter()
            .flat_map(|c| c.passwords.iter())
            .all(|p| !p.ciphertext.contains(&b'\n')));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.txt");
        let codec = PersistenceCodec::new();
        codec.write(&snapshot, &path).unwrap();

        let read_back = codec.read(&path).unwrap();
        prop_assert_eq!(read_back.len(), snapshot.password_count());
        prop_assert_eq!(read_back, snapshot.ciphertext_map());

        let parsed = codec.read_export(&path).unwrap();
        prop_assert!(parsed.warnings.is_empty());
        prop_assert_eq!(parsed.categories, snapshot.categories);
    }
}
