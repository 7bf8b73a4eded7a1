//! Session object owned by the caller for the length of a run.
//!
//! Holds both stores and, once provided, the secret key used for export and
//! import. Nothing here is global: two sessions never share a key.

use std::path::Path;

use crate::managers::category_manager::{CategoryManager, CategoryManagerTrait};
use crate::managers::unassigned_manager::{UnassignedPasswordManager, UnassignedPasswordManagerTrait};
use crate::services::cipher::{Cipher, CipherTrait, SecretKey};
use crate::services::password_generator::{PasswordGenerator, PasswordGeneratorTrait};
use crate::services::persistence_codec::{self, PersistenceCodec, PersistenceCodecTrait};
use crate::services::strength_policy::StrengthPolicy;
use crate::types::category::{Category, CategoryId, Identifier};
use crate::types::errors::{ParseWarning, StoreError, VaultError};
use crate::types::password::{GeneratorOptions, PasswordEntry, PasswordId, SearchHit};
use crate::types::snapshot::EncryptedCategory;

/// Where a new password should be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Unassigned,
    Category(Identifier),
}

/// Where a password ended up after [`VaultSession::store_password`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoredAt {
    Unassigned(PasswordId),
    Category {
        category_id: CategoryId,
        password_id: PasswordId,
    },
}

/// Outcome of [`VaultSession::import`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportReport {
    pub categories: usize,
    pub passwords: usize,
    pub warnings: Vec<ParseWarning>,
    /// Category ids changed while restoring, as `(id in file, id now)`.
    pub reassigned: Vec<(CategoryId, CategoryId)>,
}

/// The caller-owned state of one run.
#[derive(Debug, Default)]
pub struct VaultSession {
    categories: CategoryManager,
    unassigned: UnassignedPasswordManager,
    key: Option<SecretKey>,
    policy: StrengthPolicy,
    generator: PasswordGenerator,
    cipher: Cipher,
    codec: PersistenceCodec,
}

impl VaultSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn categories(&self) -> &CategoryManager {
        &self.categories
    }

    pub fn categories_mut(&mut self) -> &mut CategoryManager {
        &mut self.categories
    }

    pub fn unassigned(&self) -> &UnassignedPasswordManager {
        &self.unassigned
    }

    pub fn unassigned_mut(&mut self) -> &mut UnassignedPasswordManager {
        &mut self.unassigned
    }

    pub fn policy(&self) -> &StrengthPolicy {
        &self.policy
    }

    /// Stores the key for later export/import, replacing any previous one.
    pub fn set_key(&mut self, key: SecretKey) {
        self.key = Some(key);
    }

    /// Convenience for a key typed in as one line of text.
    pub fn set_key_from_line(&mut self, line: &str) -> Result<(), VaultError> {
        self.key = Some(SecretKey::from_line(line)?);
        Ok(())
    }

    /// Forgets the key; it is zeroized as it drops.
    pub fn clear_key(&mut self) {
        self.key = None;
    }

    pub fn has_key(&self) -> bool {
        self.key.is_some()
    }

    pub fn generate_password(&self, options: &GeneratorOptions) -> Result<String, VaultError> {
        Ok(self.generator.generate_from(options)?)
    }

    /// Files `secret` in the unassigned list or in the resolved category.
    pub fn store_password(&mut self, secret: &str, destination: &Destination) -> Result<StoredAt, VaultError> {
        match destination {
            Destination::Unassigned => Ok(StoredAt::Unassigned(self.unassigned.add(secret))),
            Destination::Category(identifier) => {
                let category_id = self
                    .categories
                    .resolve(identifier)
                    .map(|c| c.id)
                    .ok_or_else(|| StoreError::NotFound(format!("category {}", identifier)))?;
                let password_id = self.categories.add_password(category_id, secret)?;
                Ok(StoredAt::Category {
                    category_id,
                    password_id,
                })
            }
        }
    }

    /// Replaces an unassigned secret, but only with one that passes the policy.
    pub fn edit_unassigned_checked(&mut self, id: PasswordId, new_secret: &str) -> Result<(), VaultError> {
        if self.unassigned.get(id).is_none() {
            return Err(StoreError::NotFound(format!("password #{}", id)).into());
        }
        if !self.policy.is_secure(new_secret) {
            return Err(VaultError::InsecurePassword);
        }
        Ok(self.unassigned.edit(id, new_secret)?)
    }

    /// Replaces a categorized secret, but only with one that passes the policy.
    pub fn edit_category_password_checked(
        &mut self,
        identifier: &Identifier,
        position: usize,
        new_secret: &str,
    ) -> Result<(), VaultError> {
        let category = self
            .categories
            .resolve(identifier)
            .ok_or_else(|| StoreError::NotFound(format!("category {}", identifier)))?;
        if category.password_at(position).is_none() {
            return Err(StoreError::OutOfRange {
                position,
                len: category.passwords.len(),
            }
            .into());
        }
        if !self.policy.is_secure(new_secret) {
            return Err(VaultError::InsecurePassword);
        }
        let category_id = category.id;
        Ok(self.categories.edit_password(category_id, position, new_secret)?)
    }

    /// Searches unassigned passwords first, then every category.
    pub fn search_all(&self, substring: &str) -> Vec<SearchHit> {
        let mut hits: Vec<SearchHit> = self
            .unassigned
            .search(substring)
            .into_iter()
            .map(SearchHit::Unassigned)
            .collect();
        hits.extend(
            self.categories
                .search(substring)
                .into_iter()
                .map(SearchHit::Category),
        );
        hits
    }

    /// Encrypts every category with the session key and writes the export.
    pub fn export(&self, path: &Path) -> Result<(), VaultError> {
        let key = self.key.as_ref().ok_or(VaultError::KeyNotSet)?;
        let snapshot = persistence_codec::seal(self.categories.list(), &self.cipher, key.as_bytes())?;
        self.codec.write(&snapshot, path)?;
        Ok(())
    }

    /// Reads an export, decrypts it with the session key and replaces the
    /// categories with its contents. The unassigned list is untouched.
    ///
    /// Nothing is replaced if any password fails to decrypt to valid text.
    pub fn import(&mut self, path: &Path) -> Result<ImportReport, VaultError> {
        let key = self.key.as_ref().ok_or(VaultError::KeyNotSet)?;
        let parsed = self.codec.read_export(path)?;
        let restored = unseal(&parsed.categories, &self.cipher, key.as_bytes())?;

        let categories = restored.len();
        let passwords = restored.iter().map(|c| c.passwords.len()).sum();
        let reassigned = self.categories.restore(restored);
        let report = ImportReport {
            categories,
            passwords,
            warnings: parsed.warnings,
            reassigned,
        };

        tracing::info!(
            categories = report.categories,
            passwords = report.passwords,
            skipped = report.warnings.len(),
            reassigned = report.reassigned.len(),
            "imported export file"
        );
        Ok(report)
    }
}

fn unseal<C: CipherTrait>(
    blocks: &[EncryptedCategory],
    cipher: &C,
    key: &[u8],
) -> Result<Vec<Category>, VaultError> {
    let mut categories = Vec::with_capacity(blocks.len());
    for block in blocks {
        let mut category = Category::new(block.id, &block.name);
        for password in &block.passwords {
            let plain = cipher.decrypt(&password.ciphertext, key)?;
            let secret = String::from_utf8(plain).map_err(|_| VaultError::InvalidUtf8 {
                category_id: block.id,
                password_id: password.id,
            })?;
            category.passwords.push(PasswordEntry {
                id: password.id,
                secret,
            });
        }
        categories.push(category);
    }
    Ok(categories)
}
