// passkeep shared type definitions
// Data model, error taxonomy and settings used across managers and services.

pub mod category;
pub mod errors;
pub mod password;
pub mod settings;
pub mod snapshot;
