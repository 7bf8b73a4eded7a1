use std::fmt;

use serde::{Deserialize, Serialize};

use super::password::{PasswordEntry, PasswordId};

/// Numeric identity of a category, assigned from 1 upward.
pub type CategoryId = u64;

/// A named group of password entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    /// Entries in display order. Entry ids are always `1..=passwords.len()`.
    pub passwords: Vec<PasswordEntry>,
}

impl Category {
    pub fn new(id: CategoryId, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            passwords: Vec::new(),
        }
    }

    /// Returns the entry at a 1-based position.
    pub fn password_at(&self, position: usize) -> Option<&PasswordEntry> {
        position
            .checked_sub(1)
            .and_then(|index| self.passwords.get(index))
    }

    /// Rewrites entry ids so they match their positions again.
    pub(crate) fn renumber_passwords(&mut self) {
        for (index, entry) in self.passwords.iter_mut().enumerate() {
            entry.id = (index + 1) as PasswordId;
        }
    }
}

/// Either key a category can be resolved by.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Identifier {
    Id(CategoryId),
    Name(String),
}

impl Identifier {
    /// Interprets free-form user input: anything that reads as an unsigned
    /// integer is an id, everything else is taken verbatim as a name.
    pub fn parse(input: &str) -> Self {
        match input.trim().parse::<CategoryId>() {
            Ok(id) => Identifier::Id(id),
            Err(_) => Identifier::Name(input.to_string()),
        }
    }
}

impl From<CategoryId> for Identifier {
    fn from(id: CategoryId) -> Self {
        Identifier::Id(id)
    }
}

impl From<&str> for Identifier {
    fn from(name: &str) -> Self {
        Identifier::Name(name.to_string())
    }
}

impl From<String> for Identifier {
    fn from(name: String) -> Self {
        Identifier::Name(name)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Id(id) => write!(f, "#{}", id),
            Identifier::Name(name) => write!(f, "'{}'", name),
        }
    }
}
