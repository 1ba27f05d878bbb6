// src/lib.rs

//! `oracle_solvers` - Solvers for hidden Boolean function problems
//!
//! This library recovers hidden structure from black-box functions given as
//! truth tables: Deutsch and Deutsch-Jozsa classification, the
//! Bernstein-Vazirani mask and Simon's period. The promise-based families can
//! also be answered through a single simulated oracle query.

pub mod core;
pub mod operations;
pub mod circuits;
pub mod simulation;
pub mod config;
pub mod evaluator;
pub mod solvers;
pub mod input;
pub mod generator;
pub mod api;

// Re-export the most common types for easier top-level use
pub use self::core::{Classification, OracleError, OracleTable, QubitId, RecoveryResult, Result};
pub use operations::Operation;
pub use circuits::{Circuit, CircuitBuilder};
pub use simulation::{SimulationResult, Simulator};
pub use config::{BackendKind, EvaluatorConfig, PromiseMode, QueryPath, SolverConfig};
pub use evaluator::{Measurement, OracleDescription, OracleEvaluator, StateVectorEvaluator, TableLookupEvaluator};
pub use solvers::{
    BernsteinVaziraniSolver, DeutschJozsaSolver, DeutschSolver, QuantumQuery, SimonSolver, Solution, Solver,
};
pub use input::{RawInput, SimonInput};
pub use generator::{DrawStrategy, GeneratedInstance};

// Example 1: Classical answers from one truth table
// Both single-output encodings normalize to the same table, so the
// Bernstein-Vazirani and Deutsch-Jozsa solvers see identical input.
/// ```
/// use oracle_solvers::{BernsteinVaziraniSolver, DeutschJozsaSolver, OracleTable, Solver};
///
/// let table = OracleTable::from_true_set(3, [1, 3, 4, 6]).unwrap();
/// assert_eq!(table, OracleTable::from_bits(vec![false, true, false, true, true, false, true, false]).unwrap());
///
/// assert_eq!(BernsteinVaziraniSolver::new().solve(&table).unwrap().answer(), "101");
/// assert_eq!(DeutschJozsaSolver::new().solve(&table).unwrap().answer(), "balanced");
/// ```
#[doc(hidden)]
const _: () = ();

// Example 2: One simulated oracle query
// The mask is read off a single measurement of the phase-kickback circuit.
/// ```
/// use oracle_solvers::{BernsteinVaziraniSolver, OracleTable, QuantumQuery, StateVectorEvaluator};
///
/// let table = OracleTable::from_true_set(3, [1, 3, 4, 6]).unwrap();
/// let solution = BernsteinVaziraniSolver::new()
///     .query(&table, &StateVectorEvaluator::default())
///     .unwrap();
///
/// assert_eq!(solution.result.answer(), "101");
/// println!("{}", solution.circuit.unwrap_or_default());
/// ```
#[doc(hidden)]
const _: () = ();
