//! Random password generation.
//!
//! Characters are drawn uniformly from the concatenation of the selected
//! classes. Digits are never part of the alphabet, so generated passwords do
//! not satisfy the strength policy on their own; callers that need a secure
//! password must check it separately.

use rand::Rng;

use crate::types::errors::GenerationError;
use crate::types::password::GeneratorOptions;

/// Longest password the generator will produce.
pub const MAX_LENGTH: usize = 50;

pub const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
pub const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const SPECIAL: &str = "!@#$%^&*()_+";

/// Trait defining password generation.
pub trait PasswordGeneratorTrait {
    fn generate(
        &self,
        length: usize,
        use_upper: bool,
        use_lower: bool,
        use_special: bool,
    ) -> Result<String, GenerationError>;

    fn generate_from(&self, options: &GeneratorOptions) -> Result<String, GenerationError> {
        self.generate(
            options.length,
            options.use_upper,
            options.use_lower,
            options.use_special,
        )
    }
}

/// Generator backed by the thread-local RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct PasswordGenerator;

impl PasswordGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Builds the alphabet for the requested classes, lower case first.
    pub fn alphabet(use_upper: bool, use_lower: bool, use_special: bool) -> String {
        let mut alphabet = String::new();
        if use_lower {
            alphabet.push_str(LOWERCASE);
        }
        if use_upper {
            alphabet.push_str(UPPERCASE);
        }
        if use_special {
            alphabet.push_str(SPECIAL);
        }
        alphabet
    }

    /// Same as [`PasswordGeneratorTrait::generate`] but with a caller-supplied
    /// RNG, so a seeded generator gives reproducible output.
    pub fn generate_with<R: Rng + ?Sized>(
        rng: &mut R,
        length: usize,
        use_upper: bool,
        use_lower: bool,
        use_special: bool,
    ) -> Result<String, GenerationError> {
        if length == 0 || length > MAX_LENGTH {
            return Err(GenerationError::InvalidLength(length));
        }

        let alphabet: Vec<char> = Self::alphabet(use_upper, use_lower, use_special)
            .chars()
            .collect();
        if alphabet.is_empty() {
            return Err(GenerationError::EmptyAlphabet);
        }

        Ok((0..length)
            .map(|_| alphabet[rng.random_range(0..alphabet.len())])
            .collect())
    }
}

impl PasswordGeneratorTrait for PasswordGenerator {
    fn generate(
        &self,
        length: usize,
        use_upper: bool,
        use_lower: bool,
        use_special: bool,
    ) -> Result<String, GenerationError> {
        Self::generate_with(&mut rand::rng(), length, use_upper, use_lower, use_special)
    }
}
