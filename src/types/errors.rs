use std::fmt;

// === StoreError ===

/// Errors returned by the category and unassigned password stores.
#[derive(Debug, PartialEq, Eq)]
pub enum StoreError {
    /// The identifier, id or position does not resolve to anything.
    NotFound(String),
    /// A 1-based position lies outside the current sequence.
    OutOfRange { position: usize, len: usize },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::NotFound(what) => write!(f, "Not found: {}", what),
            StoreError::OutOfRange { position, len } => {
                write!(f, "Position {} is out of range (1..={})", position, len)
            }
        }
    }
}

impl std::error::Error for StoreError {}

// === GenerationError ===

/// Errors related to password generation.
#[derive(Debug, PartialEq, Eq)]
pub enum GenerationError {
    /// No character class was selected.
    EmptyAlphabet,
    /// Requested length is zero or above the supported maximum.
    InvalidLength(usize),
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationError::EmptyAlphabet => write!(f, "No character type selected"),
            GenerationError::InvalidLength(len) => {
                write!(f, "Invalid password length: {}", len)
            }
        }
    }
}

impl std::error::Error for GenerationError {}

// === CipherError ===

/// Errors related to the at-rest cipher.
#[derive(Debug, PartialEq, Eq)]
pub enum CipherError {
    /// The cipher was invoked with a zero-length key.
    EmptyKey,
}

impl fmt::Display for CipherError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CipherError::EmptyKey => write!(f, "Cipher key must not be empty"),
        }
    }
}

impl std::error::Error for CipherError {}

// === PersistenceError ===

/// Errors related to reading or writing export files.
#[derive(Debug)]
pub enum PersistenceError {
    /// Opening, reading or writing the file failed.
    Io(String),
    /// A category name would break the line format if written.
    InvalidName(String),
}

impl fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistenceError::Io(msg) => write!(f, "Export file I/O error: {}", msg),
            PersistenceError::InvalidName(name) => {
                write!(f, "Category name cannot be exported: {:?}", name)
            }
        }
    }
}

impl std::error::Error for PersistenceError {}

// === ParseWarning ===

/// A password line of an export file that had to be skipped.
///
/// Not an error: parsing continues with the next line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseWarning {
    /// 1-based line number within the file.
    pub line_number: usize,
    pub reason: String,
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Skipped line {}: {}", self.line_number, self.reason)
    }
}

// === SettingsError ===

/// Errors related to settings management.
#[derive(Debug)]
pub enum SettingsError {
    /// An I/O error occurred while reading or writing settings.
    IoError(String),
    /// Failed to serialize or deserialize settings.
    SerializationError(String),
    /// The provided settings key is invalid.
    InvalidKey(String),
    /// The provided settings value is invalid.
    InvalidValue(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::IoError(msg) => write!(f, "Settings I/O error: {}", msg),
            SettingsError::SerializationError(msg) => {
                write!(f, "Settings serialization error: {}", msg)
            }
            SettingsError::InvalidKey(key) => write!(f, "Invalid settings key: {}", key),
            SettingsError::InvalidValue(msg) => {
                write!(f, "Invalid settings value: {}", msg)
            }
        }
    }
}

impl std::error::Error for SettingsError {}

// === VaultError ===

/// Errors surfaced by a [`VaultSession`](crate::services::vault_session::VaultSession).
#[derive(Debug)]
pub enum VaultError {
    Store(StoreError),
    Generation(GenerationError),
    Cipher(CipherError),
    Persistence(PersistenceError),
    /// Export or import was requested before a key was provided.
    KeyNotSet,
    /// A replacement secret failed the strength policy.
    InsecurePassword,
    /// A decrypted secret was not valid UTF-8, usually because of a wrong key.
    InvalidUtf8 { category_id: u64, password_id: u64 },
}

impl fmt::Display for VaultError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VaultError::Store(e) => write!(f, "{}", e),
            VaultError::Generation(e) => write!(f, "{}", e),
            VaultError::Cipher(e) => write!(f, "{}", e),
            VaultError::Persistence(e) => write!(f, "{}", e),
            VaultError::KeyNotSet => write!(f, "No secret key has been set"),
            VaultError::InsecurePassword => write!(f, "Password is not secure"),
            VaultError::InvalidUtf8 {
                category_id,
                password_id,
            } => write!(
                f,
                "Password {} in category {} did not decrypt to valid text",
                password_id, category_id
            ),
        }
    }
}

impl std::error::Error for VaultError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            VaultError::Store(e) => Some(e),
            VaultError::Generation(e) => Some(e),
            VaultError::Cipher(e) => Some(e),
            VaultError::Persistence(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StoreError> for VaultError {
    fn from(e: StoreError) -> Self {
        VaultError::Store(e)
    }
}

impl From<GenerationError> for VaultError {
    fn from(e: GenerationError) -> Self {
        VaultError::Generation(e)
    }
}

impl From<CipherError> for VaultError {
    fn from(e: CipherError) -> Self {
        VaultError::Cipher(e)
    }
}

impl From<PersistenceError> for VaultError {
    fn from(e: PersistenceError) -> Self {
        VaultError::Persistence(e)
    }
}
