//! Ledger identifiers.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Width of an allocated identifier (zero-padded decimal).
pub const IDENTIFIER_WIDTH: usize = 10;

/// Accepted length range for caller-supplied identifiers.
const MIN_LEN: usize = 4;
const MAX_LEN: usize = 32;

/// Identifier of a record in the world state.
///
/// Allocated identifiers are the decimal value of a per-type counter, padded
/// to [`IDENTIFIER_WIDTH`] digits so keys stay lexically sortable. Identifiers
/// parsed from caller input must be 4 to 32 ASCII digits.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identifier(String);

impl Identifier {
    /// Build the identifier for a counter value.
    pub fn from_sequence(sequence: u64) -> Self {
        Self(format!("{sequence:0width$}", width = IDENTIFIER_WIDTH))
    }

    /// Parse and shape-check a caller-supplied identifier.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        if !(MIN_LEN..=MAX_LEN).contains(&s.len()) {
            return Err(DomainError::invalid_id(format!(
                "'{s}' must be {MIN_LEN} to {MAX_LEN} digits long"
            )));
        }
        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DomainError::invalid_id(format!(
                "'{s}' must contain decimal digits only"
            )));
        }
        Ok(Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Counter value encoded in this identifier.
    pub fn sequence(&self) -> Option<u64> {
        self.0.parse().ok()
    }
}

impl core::fmt::Display for Identifier {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Identifier {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
