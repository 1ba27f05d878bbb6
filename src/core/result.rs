//! Typed answers produced by a single solver invocation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Global classification of a single-output function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    /// All entries are equal.
    Constant,
    /// Under the promise, exactly half the entries are true.
    Balanced,
}

impl Classification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Constant => "constant",
            Classification::Balanced => "balanced",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The answer of one solver invocation. Never mutated after creation.
///
/// Failures are carried by the `Err` side of [`crate::Result`]; the response
/// layer reports them with kind `"error"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RecoveryResult {
    /// "constant" or "balanced".
    Classification(Classification),
    /// A recovered secret, MSB first, left-zero-padded to the domain width.
    Secret(String),
}

impl RecoveryResult {
    /// `"classification"` or `"string"`.
    pub fn kind(&self) -> &'static str {
        match self {
            RecoveryResult::Classification(_) => "classification",
            RecoveryResult::Secret(_) => "string",
        }
    }

    /// The answer rendered the way the `{"answer": ...}` response carries it.
    pub fn answer(&self) -> &str {
        match self {
            RecoveryResult::Classification(c) => c.as_str(),
            RecoveryResult::Secret(s) => s,
        }
    }

    pub fn classification(&self) -> Option<Classification> {
        match self {
            RecoveryResult::Classification(c) => Some(*c),
            RecoveryResult::Secret(_) => None,
        }
    }

    pub fn secret(&self) -> Option<&str> {
        match self {
            RecoveryResult::Secret(s) => Some(s),
            RecoveryResult::Classification(_) => None,
        }
    }
}

impl fmt::Display for RecoveryResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.kind(), self.answer())
    }
}
