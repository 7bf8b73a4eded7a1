use serde::{Deserialize, Serialize};

use crate::platform;

use super::password::GeneratorOptions;

/// Top-level user settings container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VaultSettings {
    /// File the encrypted export is written to and read from.
    pub export_path: String,
    pub generator: GeneratorSettings,
}

impl Default for VaultSettings {
    fn default() -> Self {
        Self {
            export_path: platform::get_data_dir()
                .join("passwords.txt")
                .to_string_lossy()
                .to_string(),
            generator: GeneratorSettings::default(),
        }
    }
}

/// Defaults offered when generating a password.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneratorSettings {
    pub length: usize,
    pub use_upper: bool,
    pub use_lower: bool,
    pub use_special: bool,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        let options = GeneratorOptions::default();
        Self {
            length: options.length,
            use_upper: options.use_upper,
            use_lower: options.use_lower,
            use_special: options.use_special,
        }
    }
}

impl From<&GeneratorSettings> for GeneratorOptions {
    fn from(settings: &GeneratorSettings) -> Self {
        GeneratorOptions {
            length: settings.length,
            use_upper: settings.use_upper,
            use_lower: settings.use_lower,
            use_special: settings.use_special,
        }
    }
}
