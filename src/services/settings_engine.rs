// passkeep Settings Engine
// Loads, saves, updates and resets the user's settings.
// Settings are stored as a JSON file at the platform-specific config path.

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::platform;
use crate::services::password_generator::MAX_LENGTH;
use crate::types::errors::SettingsError;
use crate::types::password::GeneratorOptions;
use crate::types::settings::VaultSettings;

/// Trait defining the settings engine interface.
pub trait SettingsEngineTrait {
    fn load(&mut self) -> Result<VaultSettings, SettingsError>;
    fn save(&self) -> Result<(), SettingsError>;
    fn get_settings(&self) -> &VaultSettings;
    fn set_value(&mut self, key: &str, value: Value) -> Result<(), SettingsError>;
    fn reset(&mut self) -> Result<(), SettingsError>;
    fn get_config_path(&self) -> &str;
}

/// Settings engine that persists settings as JSON on disk.
pub struct SettingsEngine {
    config_path: String,
    settings: VaultSettings,
}

impl SettingsEngine {
    /// Creates a new SettingsEngine.
    ///
    /// `path_override` replaces the default `<config dir>/settings.json`.
    pub fn new(path_override: Option<String>) -> Self {
        let config_path = path_override.unwrap_or_else(|| {
            platform::get_config_dir()
                .join("settings.json")
                .to_string_lossy()
                .to_string()
        });

        Self {
            config_path,
            settings: VaultSettings::default(),
        }
    }

    /// Generator defaults as options ready to hand to the generator.
    pub fn generator_options(&self) -> GeneratorOptions {
        GeneratorOptions::from(&self.settings.generator)
    }

    /// Rejects values that deserialize fine but the rest of the crate refuses.
    fn validate(settings: &VaultSettings) -> Result<(), SettingsError> {
        let length = settings.generator.length;
        if length == 0 || length > MAX_LENGTH {
            return Err(SettingsError::InvalidValue(format!(
                "generator.length must be between 1 and {}, got {}",
                MAX_LENGTH, length
            )));
        }
        Ok(())
    }

    /// Finds the slot a dot-separated key points at, refusing unknown keys.
    fn lookup<'v>(root: &'v mut Value, key: &str) -> Result<&'v mut Value, SettingsError> {
        key.split('.').try_fold(root, |current, part| match current {
            Value::Object(map) => map
                .get_mut(part)
                .ok_or_else(|| SettingsError::InvalidKey(key.to_string())),
            _ => Err(SettingsError::InvalidKey(key.to_string())),
        })
    }
}

impl SettingsEngineTrait for SettingsEngine {
    /// Loads settings from the config file.
    ///
    /// A missing file yields defaults; a malformed one is an error.
    fn load(&mut self) -> Result<VaultSettings, SettingsError> {
        let path = Path::new(&self.config_path);

        if !path.exists() {
            tracing::debug!(path = %self.config_path, "no settings file, using defaults");
            self.settings = VaultSettings::default();
            return Ok(self.settings.clone());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| SettingsError::IoError(format!("Failed to read config file: {}", e)))?;

        let settings: VaultSettings = serde_json::from_str(&content).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to parse config file: {}", e))
        })?;
        Self::validate(&settings)?;
        self.settings = settings;
        Ok(self.settings.clone())
    }

    /// Writes the current settings, creating parent directories as needed.
    fn save(&self) -> Result<(), SettingsError> {
        let path = Path::new(&self.config_path);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                SettingsError::IoError(format!("Failed to create config directory: {}", e))
            })?;
        }

        let json = serde_json::to_string_pretty(&self.settings).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to serialize settings: {}", e))
        })?;

        fs::write(path, json)
            .map_err(|e| SettingsError::IoError(format!("Failed to write config file: {}", e)))
    }

    fn get_settings(&self) -> &VaultSettings {
        &self.settings
    }

    /// Updates one setting by dot-notation key (e.g. `"generator.length"`)
    /// and saves. The new value must deserialize back into `VaultSettings`
    /// and keep `generator.length` within the generator's bounds.
    fn set_value(&mut self, key: &str, value: Value) -> Result<(), SettingsError> {
        if key.is_empty() {
            return Err(SettingsError::InvalidKey("Key cannot be empty".to_string()));
        }

        let mut json = serde_json::to_value(&self.settings).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to serialize settings: {}", e))
        })?;
        *Self::lookup(&mut json, key)? = value;

        let settings: VaultSettings = serde_json::from_value(json).map_err(|e| {
            SettingsError::InvalidValue(format!("Invalid value for key '{}': {}", key, e))
        })?;
        Self::validate(&settings)?;
        self.settings = settings;
        self.save()
    }

    /// Restores factory defaults and saves.
    fn reset(&mut self) -> Result<(), SettingsError> {
        self.settings = VaultSettings::default();
        self.save()
    }

    fn get_config_path(&self) -> &str {
        &self.config_path
    }
}
