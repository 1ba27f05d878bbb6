// src/evaluator/mod.rs

//! The black-box oracle evaluator capability used on the quantum path.
//!
//! A solver describes the promised function ([`OracleDescription`]), hands it
//! to an [`OracleEvaluator`], and classically decodes the single
//! [`Measurement`] it gets back. Two backends are provided:
//!
//! * [`TableLookupEvaluator`] answers from the table itself, returning the
//!   most likely outcome of the query circuit (computed with a fast
//!   Walsh-Hadamard transform).
//! * [`StateVectorEvaluator`] builds the query circuit and runs it on the
//!   [`Simulator`].
//!
//! Backend failures are returned unchanged; nothing here retries.

use crate::circuits::{Circuit, CircuitBuilder};
use crate::config::{BackendKind, DEFAULT_MAX_TABLE_ORACLE_BITS, EvaluatorConfig};
use crate::core::bits::to_bit_string;
use crate::core::{OracleError, OracleTable, Result};
use crate::simulation::Simulator;
use std::fmt;
use tracing::debug;

/// Algorithm-specific encoding of a promised function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OracleDescription {
    /// `f(x) = mask . x (mod 2)` over `bits` input bits; the mask is read off
    /// the unit-weight truth bits (Bernstein-Vazirani).
    InnerProduct { bits: u32, mask: u64 },
    /// The full single-output truth table (Deutsch, Deutsch-Jozsa).
    TruthTable(OracleTable),
}

impl OracleDescription {
    /// Number of input bits, which is also the width of the measurement.
    pub fn input_bits(&self) -> u32 {
        match self {
            OracleDescription::InnerProduct { bits, .. } => *bits,
            OracleDescription::TruthTable(table) => table.domain_bits(),
        }
    }

    /// The phase-kickback circuit that queries this oracle once.
    pub fn query_circuit(&self) -> Result<Circuit> {
        let n = self.input_bits();
        let builder = CircuitBuilder::new().prepare_query(n);
        let builder = match self {
            OracleDescription::InnerProduct { mask, .. } => builder.inner_product_oracle(n, *mask),
            OracleDescription::TruthTable(table) => {
                table.require_boolean()?;
                builder.truth_table_oracle(n, &table.true_indices())
            }
        };
        Ok(builder.finish_query(n).build())
    }
}

/// A single measurement sample returned by an evaluator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Measurement {
    /// Measured input register, most-significant bit first.
    pub bits: String,
    /// Optional side-channel description of the executed circuit.
    pub circuit: Option<String>,
}

impl Measurement {
    pub fn new(bits: String) -> Self {
        Self { bits, circuit: None }
    }

    /// True when at least one measured bit is `1`.
    pub fn any_set(&self) -> bool {
        self.bits.contains('1')
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Measurement({})", self.bits)
    }
}

/// Runs one oracle query and reports one measurement.
pub trait OracleEvaluator: Send + Sync {
    /// Evaluate the described oracle with the algorithm's query circuit.
    fn evaluate(&self, description: &OracleDescription) -> Result<Measurement>;

    /// The name of this backend
    fn name(&self) -> &str;
}

/// Builds the backend selected by `config`.
pub fn evaluator_from_config(config: &EvaluatorConfig) -> Box<dyn OracleEvaluator> {
    match config.backend {
        BackendKind::TableLookup => Box::new(TableLookupEvaluator),
        BackendKind::StateVector => Box::new(StateVectorEvaluator::from_config(config)),
    }
}

//-------------------------------------------------------------------------
// Classical backend
//-------------------------------------------------------------------------

/// Answers queries by direct table lookup.
#[derive(Debug, Clone, Copy, Default)]
pub struct TableLookupEvaluator;

impl OracleEvaluator for TableLookupEvaluator {
    fn evaluate(&self, description: &OracleDescription) -> Result<Measurement> {
        let n = description.input_bits();
        let outcome = match description {
            OracleDescription::InnerProduct { mask, .. } => *mask,
            OracleDescription::TruthTable(table) => {
                table.require_boolean()?;
                let trues = table.true_count();
                if trues == 0 || trues == table.len() {
                    0
                } else {
                    dominant_nonzero_frequency(table)
                }
            }
        };
        debug!(backend = self.name(), bits = n, outcome, "table lookup");
        Ok(Measurement::new(to_bit_string(outcome, n)))
    }

    fn name(&self) -> &str {
        "table-lookup"
    }
}

/// Index `y != 0` with the largest `|sum_x (-1)^(f(x) + x.y)|`, i.e. the most
/// likely non-zero outcome of the query circuit. Ties go to the lowest index.
fn dominant_nonzero_frequency(table: &OracleTable) -> u64 {
    let mut spectrum: Vec<i64> = table
        .entries()
        .iter()
        .map(|v| if *v != 0 { -1 } else { 1 })
        .collect();
    let len = spectrum.len();
    let mut half = 1;
    while half < len {
        for block in (0..len).step_by(half * 2) {
            for i in block..block + half {
                let (a, b) = (spectrum[i], spectrum[i + half]);
                spectrum[i] = a + b;
                spectrum[i + half] = a - b;
            }
        }
        half *= 2;
    }
    spectrum
        .iter()
        .enumerate()
        .skip(1)
        .fold((1usize, -1i64), |(best, best_abs), (y, w)| {
            if w.abs() > best_abs { (y, w.abs()) } else { (best, best_abs) }
        })
        .0 as u64
}

//-------------------------------------------------------------------------
// Simulation backend
//-------------------------------------------------------------------------

/// Answers queries by simulating the query circuit on a state vector.
#[derive(Debug, Clone)]
pub struct StateVectorEvaluator {
    simulator: Simulator,
    max_table_oracle_bits: u32,
}

impl Default for StateVectorEvaluator {
    fn default() -> Self {
        Self::new(Simulator::default())
    }
}

impl StateVectorEvaluator {
    pub fn new(simulator: Simulator) -> Self {
        Self {
            simulator,
            max_table_oracle_bits: DEFAULT_MAX_TABLE_ORACLE_BITS,
        }
    }

    pub fn from_config(config: &EvaluatorConfig) -> Self {
        Self {
            simulator: Simulator::from_config(config),
            max_table_oracle_bits: config.max_table_oracle_bits,
        }
    }
}

impl OracleEvaluator for StateVectorEvaluator {
    fn evaluate(&self, description: &OracleDescription) -> Result<Measurement> {
        let n = description.input_bits();
        if n as usize + 1 > self.simulator.max_qubits() {
            return Err(OracleError::backend(
                self.name(),
                format!(
                    "query on {} input bits needs {} qubits, limit is {}",
                    n,
                    n + 1,
                    self.simulator.max_qubits()
                ),
            ));
        }
        if matches!(description, OracleDescription::TruthTable(_)) && n > self.max_table_oracle_bits {
            return Err(OracleError::backend(
                self.name(),
                format!(
                    "truth-table oracle on {} input bits exceeds the simulated limit of {}",
                    n, self.max_table_oracle_bits
                ),
            ));
        }
        let circuit = description.query_circuit()?;
        let result = self.simulator.run(&circuit)?;
        let bits = result.bit_string();
        debug!(backend = self.name(), bits = n, outcome = %bits, "simulated query");
        Ok(Measurement {
            bits,
            circuit: Some(circuit.to_qasm()),
        })
    }

    fn name(&self) -> &str {
        "state-vector"
    }
}
