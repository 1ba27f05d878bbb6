//! Deutsch-Jozsa: classify an n-bit function promised constant or balanced.

use super::{QuantumQuery, Solver};
use crate::config::PromiseMode;
use crate::core::{Classification, OracleError, OracleTable, RecoveryResult, Result};
use crate::evaluator::{Measurement, OracleDescription};
use tracing::debug;

/// Counts the true entries: none or all is constant, anything else is balanced.
///
/// The default [`PromiseMode::Trusted`] does not check that a balanced table
/// is exactly half true, so a table with a single true entry among many is
/// reported as balanced. [`PromiseMode::Checked`] rejects such tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeutschJozsaSolver {
    promise: PromiseMode,
}

impl DeutschJozsaSolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_promise(promise: PromiseMode) -> Self {
        Self { promise }
    }

    fn check_promise(&self, table: &OracleTable) -> Result<()> {
        if self.promise == PromiseMode::Trusted {
            return Ok(());
        }
        let trues = table.true_count();
        let size = table.len();
        if trues == 0 || trues == size || 2 * trues == size {
            Ok(())
        } else {
            Err(OracleError::promise(format!(
                "function is neither constant nor balanced: {} of {} entries are true",
                trues, size
            )))
        }
    }
}

impl Solver for DeutschJozsaSolver {
    fn name(&self) -> &'static str {
        "deutsch-jozsa"
    }

    fn solve(&self, table: &OracleTable) -> Result<RecoveryResult> {
        table.require_boolean()?;
        self.check_promise(table)?;
        let trues = table.true_count();
        let class = if trues == 0 || trues == table.len() {
            Classification::Constant
        } else {
            Classification::Balanced
        };
        debug!(solver = self.name(), trues, size = table.len(), %class, "classified");
        Ok(RecoveryResult::Classification(class))
    }
}

impl QuantumQuery for DeutschJozsaSolver {
    fn describe(&self, table: &OracleTable) -> Result<OracleDescription> {
        table.require_boolean()?;
        self.check_promise(table)?;
        Ok(OracleDescription::TruthTable(table.clone()))
    }

    fn decode(&self, table: &OracleTable, measurement: &Measurement) -> Result<RecoveryResult> {
        if measurement.bits.len() != table.domain_bits() as usize {
            return Err(OracleError::decode(format!(
                "expected a {}-bit measurement, got '{}'",
                table.domain_bits(),
                measurement.bits
            )));
        }
        let class = if measurement.any_set() {
            Classification::Balanced
        } else {
            Classification::Constant
        };
        Ok(RecoveryResult::Classification(class))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::StateVectorEvaluator;

    fn classify(nbits: u32, values: &[u64]) -> Result<Classification> {
        let table = OracleTable::from_true_set(nbits, values.iter().copied())?;
        Ok(DeutschJozsaSolver::new()
            .solve(&table)?
            .classification()
            .expect("classification result"))
    }

    #[test]
    fn reference_cases() -> Result<()> {
        assert_eq!(classify(3, &[])?, Classification::Constant);
        assert_eq!(classify(3, &[0, 1, 2, 3, 4, 5, 6, 7])?, Classification::Constant);
        assert_eq!(classify(3, &[1, 3, 4, 6])?, Classification::Balanced);
        assert_eq!(classify(3, &[1, 2, 4, 7])?, Classification::Balanced);
        Ok(())
    }

    #[test]
    fn trusted_mode_calls_lopsided_tables_balanced() -> Result<()> {
        assert_eq!(classify(3, &[5])?, Classification::Balanced);
        let table = OracleTable::from_true_set(3, [5])?;
        let err = DeutschJozsaSolver::with_promise(PromiseMode::Checked)
            .solve(&table)
            .unwrap_err();
        assert!(matches!(err, OracleError::PromiseViolation { .. }));
        Ok(())
    }

    #[test]
    fn simulated_query_classifies_promise_tables() -> Result<()> {
        let evaluator = StateVectorEvaluator::default();
        let solver = DeutschJozsaSolver::new();
        for values in [vec![], vec![0, 1, 2, 3], vec![0, 3], vec![1, 2]] {
            let table = OracleTable::from_true_set(2, values.clone())?;
            assert_eq!(
                solver.solve_with(&table, &evaluator)?,
                solver.solve(&table)?,
                "true set {:?}",
                values
            );
        }
        Ok(())
    }
}
