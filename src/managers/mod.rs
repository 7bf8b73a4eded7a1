// passkeep state managers
// Managers own the in-memory collections: categories and unassigned passwords.

pub mod category_manager;
pub mod unassigned_manager;
