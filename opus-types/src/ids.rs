//! Identifier types used throughout the OPUS core.
//!
//! Identifiers are assigned by the persistence layer when a model is first
//! stored; a model that has never been stored has no id.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of a stored model instance, unique per model type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelId(u64);

impl ModelId {
    /// Creates a model ID from its raw value.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }

    /// Parses a model ID from a string.
    pub fn parse(s: &str) -> Result<Self, std::num::ParseIntError> {
        Ok(Self(s.trim().parse()?))
    }
}

impl From<u64> for ModelId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ModelId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
