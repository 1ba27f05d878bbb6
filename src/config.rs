//! Solver and evaluator configuration.
//!
//! Every struct deserializes from JSON with all fields optional, so a caller
//! can supply only what it wants to change:
//!
//! ```
//! use oracle_solvers::config::{BackendKind, QueryPath, SolverConfig};
//!
//! let config = SolverConfig::from_json(r#"{"path": "quantum", "evaluator": {"seed": 7}}"#).unwrap();
//! assert_eq!(config.path, QueryPath::Quantum);
//! assert_eq!(config.evaluator.backend, BackendKind::StateVector);
//! assert_eq!(config.evaluator.seed, Some(7));
//! ```

use crate::core::{OracleError, Result};
use serde::{Deserialize, Serialize};

/// Default qubit budget of the state-vector backend.
pub const DEFAULT_MAX_QUBITS: usize = 20;

/// Default input-width limit for simulated truth-table oracles. Such an
/// oracle takes one multi-controlled flip per true input, each a pass over
/// the whole state vector, so the cost grows as `4^n`.
pub const DEFAULT_MAX_TABLE_ORACLE_BITS: u32 = 12;

/// Whether a solver inspects the table itself or delegates to an evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QueryPath {
    #[default]
    Classical,
    Quantum,
}

/// How much a promise-trusting solver verifies before answering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PromiseMode {
    /// Rely on the promise; answer without checking it.
    #[default]
    Trusted,
    /// Verify the promise and fail with `PromiseViolation` when it does not hold.
    Checked,
}

/// Which evaluator backend serves the quantum path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackendKind {
    /// Direct table lookup (Walsh-Hadamard spectrum of the table).
    TableLookup,
    /// Dense state-vector simulation of the query circuit.
    #[default]
    StateVector,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluatorConfig {
    pub backend: BackendKind,
    /// Fixed measurement seed; `None` seeds from the state itself.
    pub seed: Option<u64>,
    pub max_qubits: usize,
    /// Widest truth-table oracle the state-vector backend will simulate.
    pub max_table_oracle_bits: u32,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::default(),
            seed: None,
            max_qubits: DEFAULT_MAX_QUBITS,
            max_table_oracle_bits: DEFAULT_MAX_TABLE_ORACLE_BITS,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    pub path: QueryPath,
    pub promise: PromiseMode,
    pub evaluator: EvaluatorConfig,
}

impl SolverConfig {
    /// Parses a JSON configuration document; missing fields take defaults.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text)
            .map_err(|e| OracleError::invalid_argument(format!("invalid solver configuration: {}", e)))
    }

    pub fn quantum() -> Self {
        Self {
            path: QueryPath::Quantum,
            ..Self::default()
        }
    }

    pub fn checked() -> Self {
        Self {
            promise: PromiseMode::Checked,
            ..Self::default()
        }
    }
}
