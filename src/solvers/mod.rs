// src/solvers/mod.rs

//! One solver per problem family.
//!
//! Every solver answers from an [`OracleTable`] ([`Solver::solve`]); the three
//! phase-kickback families can also answer through an [`OracleEvaluator`]
//! ([`QuantumQuery::solve_with`]). Solvers hold only configuration, never
//! mutate their input, and are safe to share across threads.

mod bernstein_vazirani;
mod deutsch;
mod deutsch_jozsa;
mod simon;

pub use bernstein_vazirani::BernsteinVaziraniSolver;
pub use deutsch::DeutschSolver;
pub use deutsch_jozsa::DeutschJozsaSolver;
pub use simon::SimonSolver;

use crate::core::{OracleTable, RecoveryResult, Result};
use crate::evaluator::{Measurement, OracleDescription, OracleEvaluator};
use crate::input::RawInput;
use tracing::debug;

/// A classical solver for one problem family.
pub trait Solver {
    /// Family name, used in logs and error messages.
    fn name(&self) -> &'static str;

    /// Answers by inspecting the table directly.
    fn solve(&self, table: &OracleTable) -> Result<RecoveryResult>;
}

/// An answer together with the circuit text produced on the quantum path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    pub result: RecoveryResult,
    pub circuit: Option<String>,
}

impl From<RecoveryResult> for Solution {
    fn from(result: RecoveryResult) -> Self {
        Self { result, circuit: None }
    }
}

/// A family whose answer can be read off one evaluator query.
pub trait QuantumQuery: Solver {
    /// Encodes the promised function for the evaluator.
    fn describe(&self, table: &OracleTable) -> Result<OracleDescription>;

    /// Classically decodes the measurement into the family's answer.
    fn decode(&self, table: &OracleTable, measurement: &Measurement) -> Result<RecoveryResult>;

    /// Runs the single query and decodes it, keeping the circuit text.
    fn query(&self, table: &OracleTable, evaluator: &dyn OracleEvaluator) -> Result<Solution> {
        let description = self.describe(table)?;
        let measurement = evaluator.evaluate(&description)?;
        debug!(
            solver = self.name(),
            backend = evaluator.name(),
            measured = %measurement.bits,
            "decoding measurement"
        );
        let result = self.decode(table, &measurement)?;
        Ok(Solution {
            result,
            circuit: measurement.circuit,
        })
    }

    /// Quantum-path counterpart of [`Solver::solve`].
    fn solve_with(&self, table: &OracleTable, evaluator: &dyn OracleEvaluator) -> Result<RecoveryResult> {
        Ok(self.query(table, evaluator)?.result)
    }
}

/// Normalizes a raw single-output input and solves it classically.
pub fn solve_raw<S: Solver + ?Sized>(solver: &S, input: RawInput) -> Result<RecoveryResult> {
    let table = input.into_table()?;
    solver.solve(&table)
}
