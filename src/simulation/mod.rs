// src/simulation/mod.rs

//! Runs [`Circuit`]s on a dense state vector.
//!
//! This is the quantum-path backend behind
//! [`StateVectorEvaluator`](crate::evaluator::StateVectorEvaluator); the
//! solvers never reach into it directly.

mod results;
pub(crate) mod engine;

pub use results::SimulationResult;

use crate::circuits::Circuit;
use crate::config::EvaluatorConfig;
use crate::core::{OracleError, Result};
use crate::operations::Operation;
use engine::SimulationEngine;
use tracing::debug;

/// Executes circuits with a fixed qubit budget and seed source.
#[derive(Debug, Clone)]
pub struct Simulator {
    /// Fixed PRNG seed for measurement; `None` derives it from the state.
    seed: Option<u64>,
    /// Circuits wider than this are rejected before allocating.
    max_qubits: usize,
}

impl Default for Simulator {
    fn default() -> Self {
        Self::from_config(&EvaluatorConfig::default())
    }
}

impl Simulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &EvaluatorConfig) -> Self {
        Self {
            seed: config.seed,
            max_qubits: config.max_qubits,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn max_qubits(&self) -> usize {
        self.max_qubits
    }

    /// Runs `circuit` from |0...0> and returns every recorded measurement.
    pub fn run(&self, circuit: &Circuit) -> Result<SimulationResult> {
        if circuit.is_empty() {
            return Ok(SimulationResult::new());
        }

        let width = circuit.width();
        if width > self.max_qubits {
            return Err(OracleError::backend(
                "state-vector",
                format!(
                    "circuit needs {} qubits but the simulator is limited to {}",
                    width, self.max_qubits
                ),
            ));
        }
        debug!(qubits = width, operations = circuit.len(), "running circuit");

        let mut engine = SimulationEngine::init(width)?;
        let mut result = SimulationResult::new();

        for op in circuit.operations() {
            match op {
                Operation::Measure { targets } => {
                    let outcome = engine.measure(targets, self.seed)?;
                    result.record(targets, outcome);
                }
                _ => engine.apply_operation(op)?,
            }
        }

        let norm = engine.state().norm_sqr();
        if (norm - 1.0).abs() > 1e-9 {
            return Err(OracleError::backend(
                "state-vector",
                format!("state vector norm deviated from 1: {}", norm),
            ));
        }

        Ok(result)
    }
}
