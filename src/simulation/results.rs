// src/simulation/results.rs
use crate::core::QubitId;
use std::collections::BTreeMap;
use std::fmt;

/// Outcome of running a circuit: the measured value of every measured qubit,
/// plus the classical register in measurement order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SimulationResult {
    measured: BTreeMap<QubitId, u8>,
    /// `clbits[j]` is the value written to classical bit `c[j]`.
    clbits: Vec<u8>,
}

impl SimulationResult {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Records the outcome of one measurement over `targets`.
    /// Bit `j` of `outcome` is the value of `targets[j]`.
    pub(crate) fn record(&mut self, targets: &[QubitId], outcome: u64) {
        if self.clbits.len() < targets.len() {
            self.clbits.resize(targets.len(), 0);
        }
        for (j, qubit) in targets.iter().enumerate() {
            let bit = ((outcome >> j) & 1) as u8;
            self.measured.insert(*qubit, bit);
            self.clbits[j] = bit;
        }
    }

    /// The measured value of `qubit`, if it was measured.
    pub fn get(&self, qubit: &QubitId) -> Option<u8> {
        self.measured.get(qubit).copied()
    }

    pub fn all_measurements(&self) -> &BTreeMap<QubitId, u8> {
        &self.measured
    }

    /// Classical register as a bit string, highest classical bit first
    /// (the order a simulator's memory dump prints it).
    pub fn bit_string(&self) -> String {
        self.clbits
            .iter()
            .rev()
            .map(|b| if *b == 1 { '1' } else { '0' })
            .collect()
    }
}

impl fmt::Display for SimulationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Simulation Results:")?;
        if self.measured.is_empty() {
            writeln!(f, "  No qubits were measured.")?;
        } else {
            for (id, bit) in &self.measured {
                writeln!(f, "    {}: {}", id, bit)?;
            }
            writeln!(f, "  Register: {}", self.bit_string())?;
        }
        Ok(())
    }
}
