//! Bernstein-Vazirani: recover the mask `S` of `f(x) = S . x (mod 2)`.

use super::{QuantumQuery, Solver};
use crate::config::PromiseMode;
use crate::core::bits::{inner_product, to_bit_string};
use crate::core::{OracleError, OracleTable, RecoveryResult, Result};
use crate::evaluator::{Measurement, OracleDescription};
use tracing::{debug, warn};

/// Reads bit `i` of the mask from `f(2^i)`.
///
/// Only the `n` unit-weight entries are inspected. In [`PromiseMode::Trusted`]
/// (the default) a table that is not an inner-product function still yields
/// some string; [`PromiseMode::Checked`] verifies every entry first.
#[derive(Debug, Clone, Copy, Default)]
pub struct BernsteinVaziraniSolver {
    promise: PromiseMode,
}

impl BernsteinVaziraniSolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_promise(promise: PromiseMode) -> Self {
        Self { promise }
    }

    /// The mask assembled from the unit-weight truth bits.
    pub fn unit_weight_mask(table: &OracleTable) -> u64 {
        (0..table.domain_bits())
            .filter(|i| table.is_true(1usize << i))
            .fold(0u64, |s, i| s | (1u64 << i))
    }

    fn check_promise(&self, table: &OracleTable, mask: u64) -> Result<()> {
        if self.promise == PromiseMode::Trusted {
            return Ok(());
        }
        let violation = (0..table.len()).find(|x| table.is_true(*x) != inner_product(mask, *x as u64));
        match violation {
            None => Ok(()),
            Some(x) => {
                warn!(solver = self.name(), input = x, "inner-product promise does not hold");
                Err(OracleError::promise(format!(
                    "f({}) = {} but the inner product with mask {} is {}",
                    to_bit_string(x as u64, table.domain_bits()),
                    u8::from(table.is_true(x)),
                    to_bit_string(mask, table.domain_bits()),
                    u8::from(inner_product(mask, x as u64))
                )))
            }
        }
    }
}

impl Solver for BernsteinVaziraniSolver {
    fn name(&self) -> &'static str {
        "bernstein-vazirani"
    }

    fn solve(&self, table: &OracleTable) -> Result<RecoveryResult> {
        table.require_boolean()?;
        let mask = Self::unit_weight_mask(table);
        self.check_promise(table, mask)?;
        let secret = to_bit_string(mask, table.domain_bits());
        debug!(solver = self.name(), bits = table.domain_bits(), %secret, "recovered mask");
        Ok(RecoveryResult::Secret(secret))
    }
}

impl QuantumQuery for BernsteinVaziraniSolver {
    fn describe(&self, table: &OracleTable) -> Result<OracleDescription> {
        table.require_boolean()?;
        let mask = Self::unit_weight_mask(table);
        self.check_promise(table, mask)?;
        Ok(OracleDescription::InnerProduct {
            bits: table.domain_bits(),
            mask,
        })
    }

    fn decode(&self, table: &OracleTable, measurement: &Measurement) -> Result<RecoveryResult> {
        let width = table.domain_bits() as usize;
        let well_formed = measurement.bits.len() == width
            && measurement.bits.chars().all(|c| c == '0' || c == '1');
        if !well_formed {
            return Err(OracleError::decode(format!(
                "expected a {}-bit measurement, got '{}'",
                width, measurement.bits
            )));
        }
        Ok(RecoveryResult::Secret(measurement.bits.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::{StateVectorEvaluator, TableLookupEvaluator};

    fn secret_of(table: &OracleTable) -> Result<String> {
        Ok(BernsteinVaziraniSolver::new().solve(table)?.answer().to_string())
    }

    #[test]
    fn reference_cases() -> Result<()> {
        assert_eq!(secret_of(&OracleTable::from_true_set(3, [1, 3, 4, 6])?)?, "101");
        assert_eq!(secret_of(&OracleTable::from_true_set(3, [1, 2, 4, 7])?)?, "111");
        assert_eq!(secret_of(&OracleTable::from_true_set(3, [])?)?, "000");
        assert_eq!(secret_of(&OracleTable::from_true_set(3, [1, 3, 5, 7])?)?, "001");
        Ok(())
    }

    #[test]
    fn trusted_mode_answers_for_non_linear_tables() -> Result<()> {
        // Only f(0b011) is true: not an inner product, yet unit-weight bits are all false.
        let table = OracleTable::from_true_set(2, [3])?;
        assert_eq!(secret_of(&table)?, "00");

        let err = BernsteinVaziraniSolver::with_promise(PromiseMode::Checked)
            .solve(&table)
            .unwrap_err();
        assert!(matches!(err, OracleError::PromiseViolation { .. }));
        Ok(())
    }

    #[test]
    fn quantum_path_agrees_with_table_path() -> Result<()> {
        let table = OracleTable::from_bits(
            [0, 1, 1, 0, 1, 0, 0, 1].iter().map(|b| *b == 1).collect(),
        )?;
        let solver = BernsteinVaziraniSolver::new();
        assert_eq!(solver.solve_with(&table, &StateVectorEvaluator::default())?.answer(), "111");
        assert_eq!(solver.solve_with(&table, &TableLookupEvaluator)?.answer(), "111");
        Ok(())
    }

    #[test]
    fn malformed_measurements_fail_to_decode() -> Result<()> {
        let table = OracleTable::from_true_set(2, [1, 3])?;
        let err = BernsteinVaziraniSolver::new()
            .decode(&table, &Measurement::new("1".to_string()))
            .unwrap_err();
        assert!(matches!(err, OracleError::Decode { .. }));
        Ok(())
    }
}
