use std::collections::BTreeMap;

use super::category::CategoryId;
use super::password::PasswordId;

/// Ciphertext of one password as it appears in an export file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedPassword {
    pub id: PasswordId,
    pub ciphertext: Vec<u8>,
}

/// One category block of an export file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedCategory {
    pub id: CategoryId,
    pub name: String,
    pub passwords: Vec<EncryptedPassword>,
}

/// Where a password sits in an export file: the category block holding it
/// and its id within that block. Lines that appear before any category
/// header have no category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntryKey {
    pub category_id: Option<CategoryId>,
    pub password_id: PasswordId,
}

impl EntryKey {
    pub fn new(category_id: Option<CategoryId>, password_id: PasswordId) -> Self {
        Self {
            category_id,
            password_id,
        }
    }
}

/// Every category with its passwords already encrypted, in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncryptedSnapshot {
    pub categories: Vec<EncryptedCategory>,
}

impl EncryptedSnapshot {
    /// Flattens the snapshot to the keyed ciphertext view the export file
    /// reader produces.
    pub fn ciphertext_map(&self) -> BTreeMap<EntryKey, Vec<u8>> {
        let mut map = BTreeMap::new();
        for category in &self.categories {
            for password in &category.passwords {
                map.insert(
                    EntryKey::new(Some(category.id), password.id),
                    password.ciphertext.clone(),
                );
            }
        }
        map
    }

    pub fn password_count(&self) -> usize {
        self.categories.iter().map(|c| c.passwords.len()).sum()
    }
}
