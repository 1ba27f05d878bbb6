//! Error handling logic

use std::fmt;
use thiserror::Error;

/// Identifier of a qubit wire inside a query circuit.
/// Wire `i` corresponds to bit `i` of a basis-state index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QubitId(pub u32);

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q[{}]", self.0)
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, OracleError>;

/// Failures raised while normalizing, solving or evaluating an oracle.
///
/// Every failure is a value; a malformed request never aborts the process.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OracleError {
    /// Input length is not a power of two, or disagrees with a supplied bit width.
    #[error("Shape Error: {message}")]
    Shape {
        /// Shape failure message
        message: String,
    },

    /// The structural promise of the problem does not hold for this table.
    #[error("Promise Violation: {message}")]
    PromiseViolation {
        /// PromiseViolation failure message
        message: String,
    },

    /// A generator or command-line argument is out of range.
    #[error("Invalid Argument: {message}")]
    InvalidArgument {
        /// InvalidArgument failure message
        message: String,
    },

    /// The evaluator backend failed; surfaced unchanged, never retried.
    #[error("Backend Error ({backend}): {message}")]
    Backend {
        /// Name of the backend that failed
        backend: String,
        /// Backend failure message
        message: String,
    },

    /// A measurement outcome could not be decoded into an answer.
    #[error("Decode Error: {message}")]
    Decode {
        /// Decode failure message
        message: String,
    },
}

impl OracleError {
    pub fn shape(message: impl Into<String>) -> Self {
        OracleError::Shape { message: message.into() }
    }

    pub fn promise(message: impl Into<String>) -> Self {
        OracleError::PromiseViolation { message: message.into() }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        OracleError::InvalidArgument { message: message.into() }
    }

    pub fn backend(backend: impl Into<String>, message: impl Into<String>) -> Self {
        OracleError::Backend {
            backend: backend.into(),
            message: message.into(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        OracleError::Decode { message: message.into() }
    }

    /// The message without the variant prefix.
    pub fn message(&self) -> &str {
        match self {
            OracleError::Shape { message }
            | OracleError::PromiseViolation { message }
            | OracleError::InvalidArgument { message }
            | OracleError::Backend { message, .. }
            | OracleError::Decode { message } => message,
        }
    }

    /// True for the two input-driven failures (`Shape`, `PromiseViolation`).
    pub fn is_input_error(&self) -> bool {
        matches!(self, OracleError::Shape { .. } | OracleError::PromiseViolation { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_carries_variant_prefix() {
        let err = OracleError::shape("function length is not power of 2");
        assert_eq!(err.to_string(), "Shape Error: function length is not power of 2");

        let err = OracleError::backend("state-vector", "too many qubits");
        assert_eq!(err.to_string(), "Backend Error (state-vector): too many qubits");
        assert!(!err.is_input_error());
        assert!(OracleError::promise("x").is_input_error());
    }
}
