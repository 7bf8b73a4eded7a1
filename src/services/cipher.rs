//! Reversible per-byte obfuscation used for the export file.
//!
//! **This is not encryption in any cryptographic sense.** Each byte is shifted
//! by the matching key byte and then XORed with it, the key repeating
//! cyclically. Anyone holding a ciphertext and a little known plaintext can
//! recover the key. It keeps secrets from being readable at a glance on disk
//! and nothing more.

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::types::errors::CipherError;

/// Trait defining the reversible byte transform.
pub trait CipherTrait {
    /// Obfuscates `plaintext` with `key`. Fails on an empty key.
    fn encrypt(&self, plaintext: &[u8], key: &[u8]) -> Result<Vec<u8>, CipherError>;

    /// Exact inverse of [`CipherTrait::encrypt`] for the same key.
    fn decrypt(&self, ciphertext: &[u8], key: &[u8]) -> Result<Vec<u8>, CipherError>;
}

/// The add-then-XOR stream transform.
#[derive(Debug, Clone, Copy, Default)]
pub struct Cipher;

impl Cipher {
    pub fn new() -> Self {
        Self
    }
}

impl CipherTrait for Cipher {
    fn encrypt(&self, plaintext: &[u8], key: &[u8]) -> Result<Vec<u8>, CipherError> {
        if key.is_empty() {
            return Err(CipherError::EmptyKey);
        }
        Ok(plaintext
            .iter()
            .zip(key.iter().cycle())
            .map(|(&p, &k)| p.wrapping_add(k) ^ k)
            .collect())
    }

    fn decrypt(&self, ciphertext: &[u8], key: &[u8]) -> Result<Vec<u8>, CipherError> {
        if key.is_empty() {
            return Err(CipherError::EmptyKey);
        }
        Ok(ciphertext
            .iter()
            .zip(key.iter().cycle())
            .map(|(&c, &k)| (c ^ k).wrapping_sub(k))
            .collect())
    }
}

/// A non-empty cipher key, wiped from memory when dropped.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretKey {
    bytes: Vec<u8>,
}

impl SecretKey {
    /// Wraps raw key bytes, rejecting an empty key.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self, CipherError> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(CipherError::EmptyKey);
        }
        Ok(Self { bytes })
    }

    /// Builds a key from a line of user input, minus its line terminator.
    pub fn from_line(line: &str) -> Result<Self, CipherError> {
        Self::new(line.trim_end_matches(['\r', '\n']).as_bytes())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretKey([REDACTED; {}])", self.bytes.len())
    }
}
