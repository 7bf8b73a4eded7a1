//! Password strength policy.
//!
//! A candidate is secure when it is at least [`MIN_LENGTH`] characters long,
//! mixes upper case, lower case and digits, contains one of
//! [`SPECIAL_CHARACTERS`], and has no run of three identical word characters
//! (`[A-Za-z0-9_]`) in a row.

/// Minimum number of characters a secure password needs.
pub const MIN_LENGTH: usize = 8;

/// Characters that satisfy the special-character rule.
pub const SPECIAL_CHARACTERS: &str = "!@#$%^&*()[]{}|;:'\",.<>/?";

/// Length at which a run of identical word characters disqualifies a password.
const MAX_RUN: usize = 3;

/// Stateless checker for the composition rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct StrengthPolicy;

impl StrengthPolicy {
    pub fn new() -> Self {
        Self
    }

    /// Returns `true` if `candidate` satisfies every rule.
    pub fn is_secure(&self, candidate: &str) -> bool {
        is_secure(candidate)
    }

    /// Walks the candidates in order and returns the first secure one.
    ///
    /// Lets an interactive caller keep prompting until it gets an acceptable
    /// password: hand it an iterator that reads one line per `next()`.
    /// Returns `None` once the candidates run out.
    pub fn first_secure<I>(&self, candidates: I) -> Option<String>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let mut rejected = 0usize;
        for candidate in candidates {
            let candidate = candidate.into();
            if is_secure(&candidate) {
                if rejected > 0 {
                    tracing::debug!(rejected, "accepted password after rejected attempts");
                }
                return Some(candidate);
            }
            rejected += 1;
        }
        None
    }
}

/// Returns `true` if `candidate` satisfies every composition rule.
pub fn is_secure(candidate: &str) -> bool {
    if candidate.chars().count() < MIN_LENGTH {
        return false;
    }

    let mut has_upper = false;
    let mut has_lower = false;
    let mut has_digit = false;
    let mut has_special = false;
    for c in candidate.chars() {
        has_upper |= c.is_ascii_uppercase();
        has_lower |= c.is_ascii_lowercase();
        has_digit |= c.is_ascii_digit();
        has_special |= SPECIAL_CHARACTERS.contains(c);
    }

    has_upper && has_lower && has_digit && has_special && !has_repeating_run(candidate)
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Detects `MAX_RUN` or more identical consecutive word characters.
fn has_repeating_run(candidate: &str) -> bool {
    let mut previous: Option<char> = None;
    let mut run = 0usize;
    for c in candidate.chars() {
        if Some(c) == previous && is_word_char(c) {
            run += 1;
            if run >= MAX_RUN {
                return true;
            }
        } else {
            run = 1;
        }
        previous = Some(c);
    }
    false
}
