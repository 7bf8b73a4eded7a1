//! Line-oriented export file.
//!
//! ```text
//! ----------- Encrypted Categories -----------
//!
//! ID: 1 Name: Email
//! Passwords:
//! ID: 1 Pass: <ciphertext bytes>
//! ID: 2 Pass: <ciphertext bytes>
//!
//! ID: 2 Name: Work
//! Passwords:
//!
//! ```
//!
//! Nothing is escaped. A ciphertext byte equal to `\n` splits its line and
//! corrupts that entry; this is a known limitation of the format. Category
//! names are written raw as well, so [`PersistenceCodecTrait::write`] refuses
//! a name holding a newline or ` Pass: ` before touching the file. The file is
//! overwritten in place, so a crash mid-write can leave it truncated.
//!
//! Password ids restart at 1 in every category, so the reader keys each
//! ciphertext by [`EntryKey`]: the enclosing block's category id plus the
//! password id.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use crate::services::cipher::CipherTrait;
use crate::types::category::{Category, CategoryId};
use crate::types::errors::{CipherError, ParseWarning, PersistenceError};
use crate::types::snapshot::{EncryptedCategory, EncryptedPassword, EncryptedSnapshot, EntryKey};

/// First line of every export file.
pub const HEADER: &str = "----------- Encrypted Categories -----------";

const ID_TAG: &[u8] = b"ID: ";
const PASS_TAG: &[u8] = b" Pass: ";
const NAME_TAG: &[u8] = b" Name: ";
const PASSWORDS_LINE: &[u8] = b"Passwords:";

/// Everything recovered from an export file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedExport {
    /// Keyed ciphertext view. A later line with an already seen key is
    /// skipped with a warning.
    pub passwords: BTreeMap<EntryKey, Vec<u8>>,
    /// Category blocks in file order.
    pub categories: Vec<EncryptedCategory>,
    /// Password lines that had to be skipped.
    pub warnings: Vec<ParseWarning>,
}

/// Trait defining export file I/O.
pub trait PersistenceCodecTrait {
    /// Renders `snapshot` and overwrites `path` with it.
    fn write(&self, snapshot: &EncryptedSnapshot, path: &Path) -> Result<(), PersistenceError>;

    /// Reads `path` and returns the (category id, password id) -> ciphertext
    /// mapping.
    fn read(&self, path: &Path) -> Result<BTreeMap<EntryKey, Vec<u8>>, PersistenceError>;

    /// Reads `path` keeping the category structure and skipped-line warnings.
    fn read_export(&self, path: &Path) -> Result<ParsedExport, PersistenceError>;
}

/// File-backed codec for the export format.
#[derive(Debug, Clone, Copy, Default)]
pub struct PersistenceCodec;

impl PersistenceCodec {
    pub fn new() -> Self {
        Self
    }
}

impl PersistenceCodecTrait for PersistenceCodec {
    fn write(&self, snapshot: &EncryptedSnapshot, path: &Path) -> Result<(), PersistenceError> {
        for category in &snapshot.categories {
            check_name(&category.name)?;
        }

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                PersistenceError::Io(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }

        fs::write(path, render(snapshot)).map_err(|e| {
            PersistenceError::Io(format!("Failed to write {}: {}", path.display(), e))
        })?;

        tracing::info!(
            path = %path.display(),
            categories = snapshot.categories.len(),
            passwords = snapshot.password_count(),
            "wrote export file"
        );
        Ok(())
    }

    fn read(&self, path: &Path) -> Result<BTreeMap<EntryKey, Vec<u8>>, PersistenceError> {
        Ok(self.read_export(path)?.passwords)
    }

    fn read_export(&self, path: &Path) -> Result<ParsedExport, PersistenceError> {
        let bytes = fs::read(path).map_err(|e| {
            PersistenceError::Io(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Ok(parse(&bytes))
    }
}

/// Encrypts every password of `categories` with `key`, keeping ids and order.
pub fn seal<C: CipherTrait>(
    categories: &[Category],
    cipher: &C,
    key: &[u8],
) -> Result<EncryptedSnapshot, CipherError> {
    let mut sealed = Vec::with_capacity(categories.len());
    for category in categories {
        let mut passwords = Vec::with_capacity(category.passwords.len());
        for entry in &category.passwords {
            passwords.push(EncryptedPassword {
                id: entry.id,
                ciphertext: cipher.encrypt(entry.secret.as_bytes(), key)?,
            });
        }
        sealed.push(EncryptedCategory {
            id: category.id,
            name: category.name.clone(),
            passwords,
        });
    }
    Ok(EncryptedSnapshot { categories: sealed })
}

/// Serializes a snapshot into the export format.
pub fn render(snapshot: &EncryptedSnapshot) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(HEADER.as_bytes());
    out.extend_from_slice(b"\n\n");

    for category in &snapshot.categories {
        out.extend_from_slice(ID_TAG);
        out.extend_from_slice(category.id.to_string().as_bytes());
        out.extend_from_slice(NAME_TAG);
        out.extend_from_slice(category.name.as_bytes());
        out.push(b'\n');
        out.extend_from_slice(PASSWORDS_LINE);
        out.push(b'\n');

        for password in &category.passwords {
            out.extend_from_slice(ID_TAG);
            out.extend_from_slice(password.id.to_string().as_bytes());
            out.extend_from_slice(PASS_TAG);
            out.extend_from_slice(&password.ciphertext);
            out.push(b'\n');
        }
        out.push(b'\n');
    }
    out
}

/// Parses export bytes.
///
/// Lines that are neither category nor password lines are ignored. A password
/// or category line whose id is not a number is skipped with a warning and
/// parsing carries on. So is a password line whose key was already seen, and
/// a whole category block whose id repeats an earlier block's.
pub fn parse(bytes: &[u8]) -> ParsedExport {
    let mut parsed = ParsedExport::default();
    let mut current: Option<EncryptedCategory> = None;
    let mut seen_categories = BTreeSet::new();
    let mut in_repeated_block = false;

    for (index, line) in bytes.split(|&b| b == b'\n').enumerate() {
        let line_number = index + 1;
        let Some(id_start) = find(line, ID_TAG).map(|pos| pos + ID_TAG.len()) else {
            continue;
        };
        let rest = &line[id_start..];

        if let Some(pass_at) = find(rest, PASS_TAG) {
            if in_repeated_block {
                continue;
            }
            let ciphertext = rest[pass_at + PASS_TAG.len()..].to_vec();
            match parse_id(&rest[..pass_at]) {
                Ok(id) => {
                    let key = EntryKey::new(current.as_ref().map(|c| c.id), id);
                    if parsed.passwords.contains_key(&key) {
                        skip(
                            &mut parsed.warnings,
                            line_number,
                            format!("password id {} repeats in the same block", id),
                        );
                        continue;
                    }
                    if let Some(category) = current.as_mut() {
                        category.passwords.push(EncryptedPassword {
                            id,
                            ciphertext: ciphertext.clone(),
                        });
                    }
                    parsed.passwords.insert(key, ciphertext);
                }
                Err(reason) => skip(&mut parsed.warnings, line_number, reason),
            }
        } else if let Some(name_at) = find(rest, NAME_TAG).filter(|_| id_start == ID_TAG.len()) {
            if let Some(done) = current.take() {
                parsed.categories.push(done);
            }
            in_repeated_block = false;
            match parse_id(&rest[..name_at]) {
                Ok(id) if !seen_categories.insert(id) => {
                    in_repeated_block = true;
                    skip(
                        &mut parsed.warnings,
                        line_number,
                        format!("category id {} repeats, block ignored", id),
                    );
                }
                Ok(id) => {
                    let name = String::from_utf8_lossy(&rest[name_at + NAME_TAG.len()..]);
                    current = Some(EncryptedCategory {
                        id: id as CategoryId,
                        name: name.into_owned(),
                        passwords: Vec::new(),
                    });
                }
                Err(reason) => skip(&mut parsed.warnings, line_number, reason),
            }
        }
    }

    if let Some(done) = current {
        parsed.categories.push(done);
    }
    parsed
}

/// Rejects category names that the line format cannot carry intact.
pub fn check_name(name: &str) -> Result<(), PersistenceError> {
    let bytes = name.as_bytes();
    if bytes.contains(&b'\n') || find(bytes, PASS_TAG).is_some() {
        return Err(PersistenceError::InvalidName(name.to_string()));
    }
    Ok(())
}

fn skip(warnings: &mut Vec<ParseWarning>, line_number: usize, reason: String) {
    tracing::warn!(line_number, %reason, "skipping malformed export line");
    warnings.push(ParseWarning {
        line_number,
        reason,
    });
}

fn parse_id(raw: &[u8]) -> Result<u64, String> {
    let text = std::str::from_utf8(raw).map_err(|_| "id is not valid text".to_string())?;
    text.trim()
        .parse::<u64>()
        .map_err(|_| format!("invalid id '{}'", text.trim()))
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
