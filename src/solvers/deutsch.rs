//! Deutsch's problem: classify a function on one input bit.

use super::{QuantumQuery, Solver};
use crate::core::{Classification, OracleError, OracleTable, RecoveryResult, Result};
use crate::evaluator::{Measurement, OracleDescription};
use tracing::debug;

/// `"constant"` iff `f(0) == f(1)`, `"balanced"` otherwise.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeutschSolver;

impl DeutschSolver {
    pub fn new() -> Self {
        Self
    }

    fn require_one_bit(table: &OracleTable) -> Result<()> {
        if table.domain_bits() == 1 {
            Ok(())
        } else {
            Err(OracleError::shape(format!(
                "Deutsch's problem takes exactly two entries, got {}",
                table.len()
            )))
        }
    }
}

impl Solver for DeutschSolver {
    fn name(&self) -> &'static str {
        "deutsch"
    }

    fn solve(&self, table: &OracleTable) -> Result<RecoveryResult> {
        Self::require_one_bit(table)?;
        let class = if table.value(0) == table.value(1) {
            Classification::Constant
        } else {
            Classification::Balanced
        };
        debug!(solver = self.name(), f0 = table.value(0), f1 = table.value(1), %class, "classified");
        Ok(RecoveryResult::Classification(class))
    }
}

impl QuantumQuery for DeutschSolver {
    fn describe(&self, table: &OracleTable) -> Result<OracleDescription> {
        Self::require_one_bit(table)?;
        table.require_boolean()?;
        Ok(OracleDescription::TruthTable(table.clone()))
    }

    fn decode(&self, _table: &OracleTable, measurement: &Measurement) -> Result<RecoveryResult> {
        if measurement.bits.len() != 1 {
            return Err(OracleError::decode(format!(
                "expected a one-bit measurement, got '{}'",
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

    fn classify(f0: bool, f1: bool) -> Result<RecoveryResult> {
        DeutschSolver.solve(&OracleTable::from_bits(vec![f0, f1])?)
    }

    #[test]
    fn all_four_functions() -> Result<()> {
        let constant = RecoveryResult::Classification(Classification::Constant);
        let balanced = RecoveryResult::Classification(Classification::Balanced);
        assert_eq!(classify(true, true)?, constant);
        assert_eq!(classify(false, false)?, constant);
        assert_eq!(classify(true, false)?, balanced);
        assert_eq!(classify(false, true)?, balanced);
        Ok(())
    }

    #[test]
    fn rejects_wider_domains() -> Result<()> {
        let err = DeutschSolver.solve(&OracleTable::from_bits(vec![true; 4])?).unwrap_err();
        assert!(matches!(err, OracleError::Shape { .. }));
        Ok(())
    }

    #[test]
    fn simulated_query_matches_classical_answer() -> Result<()> {
        let evaluator = StateVectorEvaluator::default();
        for (f0, f1) in [(false, false), (false, true), (true, false), (true, true)] {
            let table = OracleTable::from_bits(vec![f0, f1])?;
            assert_eq!(
                DeutschSolver.solve_with(&table, &evaluator)?,
                DeutschSolver.solve(&table)?,
                "f = [{}, {}]",
                f0,
                f1
            );
        }
        Ok(())
    }
}
