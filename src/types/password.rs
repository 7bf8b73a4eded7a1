use serde::{Deserialize, Serialize};

use super::category::CategoryId;

/// Numeric identity of a password entry within its owning collection.
pub type PasswordId = u64;

/// A single stored secret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordEntry {
    pub id: PasswordId,
    pub secret: String,
}

impl PasswordEntry {
    pub fn new(id: PasswordId, secret: &str) -> Self {
        Self {
            id,
            secret: secret.to_string(),
        }
    }
}

/// A categorized password whose secret matched a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryMatch {
    pub category_id: CategoryId,
    pub category_name: String,
    pub password_id: PasswordId,
    pub secret: String,
}

/// A search result tagged with where the password lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchHit {
    Unassigned(PasswordEntry),
    Category(CategoryMatch),
}

impl SearchHit {
    pub fn secret(&self) -> &str {
        match self {
            SearchHit::Unassigned(entry) => &entry.secret,
            SearchHit::Category(hit) => &hit.secret,
        }
    }
}

/// Character classes and length requested from the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorOptions {
    pub length: usize,
    pub use_upper: bool,
    pub use_lower: bool,
    pub use_special: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            length: 16,
            use_upper: true,
            use_lower: true,
            use_special: true,
        }
    }
}
