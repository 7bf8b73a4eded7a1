//! Category store.
//!
//! Owns every [`Category`] and the passwords inside it. Categories are kept in
//! insertion order and can be resolved by id or by name. Password positions
//! inside a category are 1-based and always dense: removing an entry shifts
//! the later ones down and renumbers them.

use std::collections::HashSet;

use crate::types::category::{Category, CategoryId, Identifier};
use crate::types::errors::StoreError;
use crate::types::password::{CategoryMatch, PasswordEntry, PasswordId};

/// Trait defining the category store interface.
pub trait CategoryManagerTrait {
    fn add(&mut self, name: &str) -> CategoryId;
    fn get_by_id(&self, id: CategoryId) -> Option<&Category>;
    fn get_by_name(&self, name: &str) -> Option<&Category>;
    fn resolve(&self, identifier: &Identifier) -> Option<&Category>;
    fn remove(&mut self, identifier: &Identifier) -> Result<Category, StoreError>;
    fn list(&self) -> &[Category];
    fn has_any(&self) -> bool;
    fn add_password(&mut self, category_id: CategoryId, secret: &str) -> Result<PasswordId, StoreError>;
    fn remove_password(&mut self, category_id: CategoryId, position: usize) -> Result<PasswordEntry, StoreError>;
    fn edit_password(&mut self, category_id: CategoryId, position: usize, new_secret: &str) -> Result<(), StoreError>;
    fn sort_categories_by_name(&mut self);
    fn sort_passwords_within(&mut self, category_id: CategoryId) -> Result<(), StoreError>;
    fn search(&self, substring: &str) -> Vec<CategoryMatch>;
}

/// In-memory category store.
#[derive(Debug, Clone)]
pub struct CategoryManager {
    categories: Vec<Category>,
    next_id: CategoryId,
}

impl CategoryManager {
    pub fn new() -> Self {
        Self {
            categories: Vec::new(),
            next_id: 1,
        }
    }

    /// Number of categories currently held.
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Total number of passwords across every category.
    pub fn password_count(&self) -> usize {
        self.categories.iter().map(|c| c.passwords.len()).sum()
    }

    /// Sorts the categories by name, then the passwords inside each one.
    pub fn sort_all(&mut self) {
        self.sort_categories_by_name();
        for category in &mut self.categories {
            Self::sort_entries(category);
        }
    }

    /// Replaces the whole store, e.g. with categories read back from an
    /// export. Password ids are renumbered to their positions and the id
    /// counter moves past the highest restored category id.
    ///
    /// A category whose id repeats an earlier one gets a fresh id. Returns
    /// every `(old, new)` id change made.
    pub fn restore(&mut self, categories: Vec<Category>) -> Vec<(CategoryId, CategoryId)> {
        self.categories = categories;
        for category in &mut self.categories {
            category.renumber_passwords();
        }
        let highest = self.categories.iter().map(|c| c.id).max().unwrap_or(0);
        self.next_id = self.next_id.max(highest.saturating_add(1));

        let mut seen = HashSet::new();
        let repeated: Vec<usize> = self
            .categories
            .iter()
            .enumerate()
            .filter(|(_, c)| !seen.insert(c.id))
            .map(|(index, _)| index)
            .collect();
        if repeated.is_empty() {
            return Vec::new();
        }

        let enough_ids = self
            .next_id
            .checked_add(repeated.len() as CategoryId)
            .is_some_and(|end| end < CategoryId::MAX);
        if !enough_ids {
            return self.compact_ids();
        }

        let mut changes = Vec::with_capacity(repeated.len());
        for index in repeated {
            let old = self.categories[index].id;
            let new = self.next_id;
            self.next_id += 1;
            self.categories[index].id = new;
            changes.push((old, new));
        }
        tracing::warn!(count = changes.len(), "reassigned repeated category ids on restore");
        changes
    }

    /// Renumbers every category `1..=n` in current order and resets the
    /// counter to follow them. Only used once the counter has run out.
    fn compact_ids(&mut self) -> Vec<(CategoryId, CategoryId)> {
        let mut changes = Vec::new();
        for (index, category) in self.categories.iter_mut().enumerate() {
            let new = (index + 1) as CategoryId;
            if category.id != new {
                changes.push((category.id, new));
                category.id = new;
            }
        }
        self.next_id = self.categories.len() as CategoryId + 1;
        tracing::warn!(count = self.categories.len(), "category id counter exhausted, compacted ids");
        changes
    }

    fn index_of(&self, id: CategoryId) -> Option<usize> {
        self.categories.iter().position(|c| c.id == id)
    }

    fn resolve_index(&self, identifier: &Identifier) -> Option<usize> {
        match identifier {
            Identifier::Id(id) => self.index_of(*id),
            Identifier::Name(name) => self.categories.iter().position(|c| c.name == *name),
        }
    }

    fn category_mut(&mut self, id: CategoryId) -> Result<&mut Category, StoreError> {
        self.categories
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| StoreError::NotFound(format!("category #{}", id)))
    }

    /// Converts a 1-based position into an index, checking it against `len`.
    fn checked_index(position: usize, len: usize) -> Result<usize, StoreError> {
        if position == 0 || position > len {
            return Err(StoreError::OutOfRange { position, len });
        }
        Ok(position - 1)
    }

    fn sort_entries(category: &mut Category) {
        category.passwords.sort_by(|a, b| a.secret.cmp(&b.secret));
        category.renumber_passwords();
    }
}

impl Default for CategoryManager {
    fn default() -> Self {
        Self::new()
    }
}

impl CategoryManagerTrait for CategoryManager {
    /// Appends an empty category and returns its freshly assigned id.
    fn add(&mut self, name: &str) -> CategoryId {
        if self.next_id == CategoryId::MAX {
            self.compact_ids();
        }
        let id = self.next_id;
        self.next_id += 1;
        self.categories.push(Category::new(id, name));
        id
    }

    fn get_by_id(&self, id: CategoryId) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Exact, case-sensitive match; the earliest category wins on duplicates.
    fn get_by_name(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    fn resolve(&self, identifier: &Identifier) -> Option<&Category> {
        match identifier {
            Identifier::Id(id) => self.get_by_id(*id),
            Identifier::Name(name) => self.get_by_name(name),
        }
    }

    /// Deletes the resolved category and hands it back. Its id is not reused.
    fn remove(&mut self, identifier: &Identifier) -> Result<Category, StoreError> {
        let index = self
            .resolve_index(identifier)
            .ok_or_else(|| StoreError::NotFound(format!("category {}", identifier)))?;
        Ok(self.categories.remove(index))
    }

    fn list(&self) -> &[Category] {
        &self.categories
    }

    fn has_any(&self) -> bool {
        !self.categories.is_empty()
    }

    /// Appends a password to the category. The new id equals its position.
    fn add_password(&mut self, category_id: CategoryId, secret: &str) -> Result<PasswordId, StoreError> {
        let category = self.category_mut(category_id)?;
        let id = (category.passwords.len() + 1) as PasswordId;
        category.passwords.push(PasswordEntry::new(id, secret));
        Ok(id)
    }

    /// Removes the password at `position`, shifting later entries down.
    fn remove_password(&mut self, category_id: CategoryId, position: usize) -> Result<PasswordEntry, StoreError> {
        let category = self.category_mut(category_id)?;
        let index = Self::checked_index(position, category.passwords.len())?;
        let removed = category.passwords.remove(index);
        category.renumber_passwords();
        tracing::debug!(category_id, position, "removed password and renumbered category");
        Ok(removed)
    }

    fn edit_password(&mut self, category_id: CategoryId, position: usize, new_secret: &str) -> Result<(), StoreError> {
        let category = self.category_mut(category_id)?;
        let index = Self::checked_index(position, category.passwords.len())?;
        category.passwords[index].secret = new_secret.to_string();
        Ok(())
    }

    /// Orders categories by name and reassigns their ids `1..=n` in the new
    /// order. Ids captured before the call no longer refer to the same
    /// categories afterwards. The id counter is left alone, so later additions
    /// still never collide.
    fn sort_categories_by_name(&mut self) {
        self.categories.sort_by(|a, b| a.name.cmp(&b.name));
        for (index, category) in self.categories.iter_mut().enumerate() {
            category.id = (index + 1) as CategoryId;
        }
        tracing::debug!(count = self.categories.len(), "sorted categories and reassigned ids");
    }

    /// Orders one category's passwords by secret and renumbers them.
    fn sort_passwords_within(&mut self, category_id: CategoryId) -> Result<(), StoreError> {
        let category = self.category_mut(category_id)?;
        Self::sort_entries(category);
        Ok(())
    }

    /// Literal, case-sensitive substring search over every secret.
    fn search(&self, substring: &str) -> Vec<CategoryMatch> {
        self.categories
            .iter()
            .flat_map(|category| {
                category
                    .passwords
                    .iter()
                    .filter(|entry| entry.secret.contains(substring))
                    .map(move |entry| CategoryMatch {
                        category_id: category.id,
                        category_name: category.name.clone(),
                        password_id: entry.id,
                        secret: entry.secret.clone(),
                    })
            })
            .collect()
    }
}
