//! Simon's problem: recover `s` from a function with `f(x) = f(y)` iff
//! `x == y` or `x == y XOR s`.

use super::Solver;
use crate::core::bits::to_bit_string;
use crate::core::{OracleError, OracleTable, RecoveryResult, Result};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, warn};

/// Brute-force classical solver, O(2^n) time and space.
///
/// Unlike the promise-trusting solvers this one validates the promise and
/// reports why it fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimonSolver;

impl SimonSolver {
    pub fn new() -> Self {
        Self
    }

    /// Solves directly from a raw list of outputs; the length must be a power of two.
    pub fn solve_entries(&self, values: Vec<u64>) -> Result<RecoveryResult> {
        let table = OracleTable::from_values(values, None)?;
        self.solve(&table)
    }

    /// Groups inputs by output value, inputs in increasing order.
    fn pairing(table: &OracleTable) -> BTreeMap<u64, Vec<usize>> {
        let mut groups: BTreeMap<u64, Vec<usize>> = BTreeMap::new();
        for (x, y) in table.entries().iter().enumerate() {
            groups.entry(*y).or_default().push(x);
        }
        groups
    }
}

impl Solver for SimonSolver {
    fn name(&self) -> &'static str {
        "simon"
    }

    fn solve(&self, table: &OracleTable) -> Result<RecoveryResult> {
        let n = table.domain_bits();
        let groups = Self::pairing(table);

        // One-to-one: the secret is all zeros.
        if groups.len() == table.len() {
            debug!(solver = self.name(), bits = n, "function is one-to-one");
            return Ok(RecoveryResult::Secret(to_bit_string(0, n)));
        }

        let mut candidates = BTreeSet::new();
        for (output, inputs) in &groups {
            if inputs.len() != 2 {
                warn!(solver = self.name(), output, preimages = inputs.len(), "irregular grouping");
                return Err(OracleError::promise(format!(
                    "invalid f: more than two inputs map to the same output \
                     (output {} has {} preimage{})",
                    output,
                    inputs.len(),
                    if inputs.len() == 1 { "" } else { "s" }
                )));
            }
            candidates.insert((inputs[0] ^ inputs[1]) as u64);
        }

        let mut iter = candidates.iter();
        match (iter.next(), iter.next()) {
            (Some(secret), None) => {
                let secret = to_bit_string(*secret, n);
                debug!(solver = self.name(), bits = n, %secret, "recovered period");
                Ok(RecoveryResult::Secret(secret))
            }
            _ => {
                let found: Vec<String> = candidates.iter().map(|c| to_bit_string(*c, n)).collect();
                warn!(solver = self.name(), candidates = ?found, "inconsistent candidates");
                Err(OracleError::promise(format!(
                    "invalid f: inconsistent secret strings found ({})",
                    found.join(", ")
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_is_one_to_one() -> Result<()> {
        let table = OracleTable::from_values((0..16).collect(), None)?;
        assert_eq!(SimonSolver.solve(&table)?.answer(), "0000");
        Ok(())
    }

    #[test]
    fn recovers_period_from_pairs() -> Result<()> {
        // s = 110: pairs {0,6}, {1,7}, {2,4}, {3,5}
        let result = SimonSolver.solve_entries(vec![9, 3, 5, 1, 5, 1, 9, 3])?;
        assert_eq!(result.answer(), "110");
        assert_eq!(result.kind(), "string");
        Ok(())
    }

    #[test]
    fn triple_preimage_violates_promise() {
        let err = SimonSolver.solve_entries(vec![0, 0, 0, 1]).unwrap_err();
        match err {
            OracleError::PromiseViolation { message } => {
                assert!(message.contains("more than two inputs map to the same output"))
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn inconsistent_pairs_violate_promise() {
        // {0,1} -> candidate 01, {2,3} -> 01, {4,6} -> 010, {5,7} -> 010
        let err = SimonSolver.solve_entries(vec![0, 0, 1, 1, 2, 3, 2, 3]).unwrap_err();
        match err {
            OracleError::PromiseViolation { message } => {
                assert!(message.contains("inconsistent secret strings found"))
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn non_power_of_two_length_is_a_shape_error() {
        let err = SimonSolver.solve_entries(vec![0, 1, 2]).unwrap_err();
        assert!(matches!(err, OracleError::Shape { .. }));
    }
}
