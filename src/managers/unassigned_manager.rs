//! Store for passwords that belong to no category.
//!
//! Ids come from their own monotonic counter and stay attached to an entry
//! for its whole life, sorting included.

use crate::types::errors::StoreError;
use crate::types::password::{PasswordEntry, PasswordId};

/// Trait defining the unassigned password store interface.
pub trait UnassignedPasswordManagerTrait {
    fn add(&mut self, secret: &str) -> PasswordId;
    fn get(&self, id: PasswordId) -> Option<&PasswordEntry>;
    fn get_ids(&self) -> Vec<PasswordId>;
    fn list(&self) -> &[PasswordEntry];
    fn has_any(&self) -> bool;
    fn remove(&mut self, id: PasswordId) -> Result<PasswordEntry, StoreError>;
    fn edit(&mut self, id: PasswordId, new_secret: &str) -> Result<(), StoreError>;
    fn search(&self, substring: &str) -> Vec<PasswordEntry>;
    fn sort_by_secret(&mut self);
}

/// In-memory store of unassigned passwords.
#[derive(Debug, Clone)]
pub struct UnassignedPasswordManager {
    entries: Vec<PasswordEntry>,
    next_id: PasswordId,
}

impl UnassignedPasswordManager {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn find_index(&self, id: PasswordId) -> Result<usize, StoreError> {
        self.entries
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| StoreError::NotFound(format!("password #{}", id)))
    }
}

impl Default for UnassignedPasswordManager {
    fn default() -> Self {
        Self::new()
    }
}

impl UnassignedPasswordManagerTrait for UnassignedPasswordManager {
    fn add(&mut self, secret: &str) -> PasswordId {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push(PasswordEntry::new(id, secret));
        id
    }

    fn get(&self, id: PasswordId) -> Option<&PasswordEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Ids in current display order.
    fn get_ids(&self) -> Vec<PasswordId> {
        self.entries.iter().map(|e| e.id).collect()
    }

    fn list(&self) -> &[PasswordEntry] {
        &self.entries
    }

    fn has_any(&self) -> bool {
        !self.entries.is_empty()
    }

    fn remove(&mut self, id: PasswordId) -> Result<PasswordEntry, StoreError> {
        let index = self.find_index(id)?;
        Ok(self.entries.remove(index))
    }

    fn edit(&mut self, id: PasswordId, new_secret: &str) -> Result<(), StoreError> {
        let index = self.find_index(id)?;
        self.entries[index].secret = new_secret.to_string();
        Ok(())
    }

    fn search(&self, substring: &str) -> Vec<PasswordEntry> {
        self.entries
            .iter()
            .filter(|e| e.secret.contains(substring))
            .cloned()
            .collect()
    }

    /// Reorders entries by secret. Ids are kept.
    fn sort_by_secret(&mut self) {
        self.entries.sort_by(|a, b| a.secret.cmp(&b.secret));
    }
}
