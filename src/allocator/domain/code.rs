//! Validated code prefix and sequential code value types.

use super::AllocatorDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Validated prefix of a sequential code space (e.g. `T-`, `CG-`).
///
/// Prefix comparison against issued codes is always case-insensitive, so a
/// directory holding `t-7` still blocks allocation of `T-7`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CodePrefix(String);

impl CodePrefix {
    /// Creates a validated code prefix.
    ///
    /// # Errors
    ///
    /// Returns [`AllocatorDomainError::InvalidPrefix`] if the value is empty
    /// after trimming or contains interior whitespace.
    pub fn new(value: impl Into<String>) -> Result<Self, AllocatorDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty() || normalized.chars().any(char::is_whitespace) {
            return Err(AllocatorDomainError::InvalidPrefix(raw));
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Returns the prefix as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` when `code` starts with this prefix, ignoring ASCII
    /// case.
    #[must_use]
    pub fn matches(&self, code: &str) -> bool {
        code.get(..self.0.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(&self.0))
    }

    /// Parses the numeric suffix of a code carrying this prefix.
    ///
    /// Returns `None` when the prefix does not match or the remainder is not
    /// a plain decimal number. Unparseable suffixes are an expected input:
    /// manually seeded codes may not follow the `PREFIX-N` convention and
    /// are simply ignored by the max-suffix scan.
    #[must_use]
    pub fn numeric_suffix(&self, code: &str) -> Option<u64> {
        if !self.matches(code) {
            return None;
        }
        code.get(self.0.len()..)?.parse::<u64>().ok()
    }
}

impl AsRef<str> for CodePrefix {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for CodePrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A sequential `PREFIX-N` code issued by the allocator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SequentialCode {
    prefix: CodePrefix,
    number: u64,
}

impl SequentialCode {
    /// Assembles a code from its prefix and numeric suffix.
    #[must_use]
    pub const fn new(prefix: CodePrefix, number: u64) -> Self {
        Self { prefix, number }
    }

    /// Returns the code prefix.
    #[must_use]
    pub const fn prefix(&self) -> &CodePrefix {
        &self.prefix
    }

    /// Returns the numeric suffix.
    #[must_use]
    pub const fn number(&self) -> u64 {
        self.number
    }
}

impl fmt::Display for SequentialCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.prefix, self.number)
    }
}
