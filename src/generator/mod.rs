// src/generator/mod.rs

//! Promise-satisfying problem instances for tests and the command line.
//!
//! Every generated table solves back to the secret it was built from:
//!
//! ```
//! use oracle_solvers::generator::{self, DrawStrategy};
//! use oracle_solvers::solvers::{BernsteinVaziraniSolver, SimonSolver, Solver};
//!
//! let bv = generator::bernstein_vazirani(4, "1011").unwrap();
//! assert_eq!(BernsteinVaziraniSolver::new().solve(&bv.table).unwrap().answer(), "1011");
//!
//! let simon = generator::seeded_simon(3, 5, "110", DrawStrategy::PerIndex, 42).unwrap();
//! assert_eq!(SimonSolver.solve(&simon.table).unwrap().answer(), "110");
//! ```

use crate::core::bits::{inner_product, parse_bit_string, to_bit_string};
use crate::core::{MAX_DOMAIN_BITS, OracleError, OracleTable, Result};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::ser::{Serialize, Serializer};
use tracing::debug;

/// Which family an instance was generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstanceKind {
    /// Single-output inner-product function.
    InnerProduct,
    /// Multi-output periodic function.
    Periodic,
}

/// A generated table together with the secret it hides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedInstance {
    pub kind: InstanceKind,
    pub domain_bits: u32,
    pub codomain_bits: u32,
    pub table: OracleTable,
    /// MSB-first, length `domain_bits`.
    pub secret: String,
}

#[derive(serde::Serialize)]
struct WireInstance<'a> {
    nbits: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    mbits: Option<u32>,
    f: Vec<u64>,
    s: &'a str,
}

/// Serializes in the shape the solvers accept back: inner-product instances as
/// `{"nbits", "f": [true inputs], "s"}`, periodic instances as
/// `{"nbits", "mbits", "f": [outputs], "s"}`.
impl Serialize for GeneratedInstance {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let (mbits, f): (Option<u32>, Vec<u64>) = if self.kind == InstanceKind::InnerProduct {
            (None, self.table.true_indices().into_iter().collect())
        } else {
            (Some(self.codomain_bits), self.table.entries().to_vec())
        };
        WireInstance {
            nbits: self.domain_bits,
            mbits,
            f,
            s: &self.secret,
        }
        .serialize(serializer)
    }
}

/// How the Simon generator draws output values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawStrategy {
    /// One draw per domain index, written to both `i` and `i ^ s`; the second
    /// visit of a pair overwrites the first.
    #[default]
    PerIndex,
    /// One draw per pair `{i, i ^ s}`.
    PerPair,
}

/// The inner-product function `f(x) = s . x (mod 2)`.
pub fn bernstein_vazirani(nbits: u32, secret: &str) -> Result<GeneratedInstance> {
    check_domain(nbits)?;
    let mask = parse_bit_string(secret, nbits)?;
    let table = OracleTable::from_fn(nbits, |x| inner_product(mask, x))?;
    debug!(nbits, secret, trues = table.true_count(), "generated inner-product instance");
    Ok(GeneratedInstance {
        kind: InstanceKind::InnerProduct,
        domain_bits: nbits,
        codomain_bits: 1,
        table,
        secret: secret.to_string(),
    })
}

/// Every inner-product instance on `nbits` inputs, in increasing secret order.
pub fn all_bernstein_vazirani(nbits: u32) -> Result<impl Iterator<Item = Result<GeneratedInstance>>> {
    check_domain(nbits)?;
    Ok((0..1u64 << nbits).map(move |s| bernstein_vazirani(nbits, &to_bit_string(s, nbits))))
}

/// A uniformly random `nbits`-wide secret.
pub fn random_secret<R: Rng + ?Sized>(nbits: u32, rng: &mut R) -> String {
    let mask = if nbits == 0 { 0 } else { rng.random::<u64>() >> (64 - nbits.min(64)) };
    to_bit_string(mask, nbits)
}

/// A 2-to-1 (or 1-to-1 for the zero secret) function with period `secret`.
///
/// Outputs are distinct values drawn from a shuffle of `[0, 2^mbits)`, so
/// `mbits >= nbits` is required.
pub fn simon<R: Rng + ?Sized>(
    nbits: u32,
    mbits: u32,
    secret: &str,
    strategy: DrawStrategy,
    rng: &mut R,
) -> Result<GeneratedInstance> {
    check_domain(nbits)?;
    if mbits < nbits {
        return Err(OracleError::invalid_argument(format!(
            "output bit size {} must be >= input bit size {}",
            mbits, nbits
        )));
    }
    if mbits > MAX_DOMAIN_BITS {
        return Err(OracleError::invalid_argument(format!(
            "output bit size {} exceeds the supported maximum of {}",
            mbits, MAX_DOMAIN_BITS
        )));
    }
    let period = parse_bit_string(secret, nbits)? as usize;

    let mut field: Vec<u64> = (0..1u64 << mbits).collect();
    field.shuffle(rng);

    let size = 1usize << nbits;
    let mut entries = vec![0u64; size];
    for i in 0..size {
        let partner = i ^ period;
        if strategy == DrawStrategy::PerPair && partner < i {
            continue;
        }
        // field holds 2^mbits >= 2^nbits values, and at most 2^nbits are drawn
        let draw = field.pop().ok_or_else(|| OracleError::invalid_argument("output field exhausted"))?;
        entries[i] = draw;
        entries[partner] = draw;
    }

    let table = OracleTable::from_values_with_width(nbits, Some(mbits), entries)?;
    debug!(nbits, mbits, secret, ?strategy, "generated periodic instance");
    Ok(GeneratedInstance {
        kind: InstanceKind::Periodic,
        domain_bits: nbits,
        codomain_bits: mbits,
        table,
        secret: secret.to_string(),
    })
}

/// [`simon`] with a reproducible [`StdRng`] seeded from `seed`.
pub fn seeded_simon(
    nbits: u32,
    mbits: u32,
    secret: &str,
    strategy: DrawStrategy,
    seed: u64,
) -> Result<GeneratedInstance> {
    let mut rng = StdRng::seed_from_u64(seed);
    simon(nbits, mbits, secret, strategy, &mut rng)
}

fn check_domain(nbits: u32) -> Result<()> {
    if nbits > MAX_DOMAIN_BITS {
        return Err(OracleError::invalid_argument(format!(
            "input bit size {} exceeds the supported maximum of {}",
            nbits, MAX_DOMAIN_BITS
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inner_product_true_set() -> Result<()> {
        let instance = bernstein_vazirani(3, "101")?;
        let trues: Vec<u64> = instance.table.true_indices().into_iter().collect();
        assert_eq!(trues, vec![1, 3, 4, 6]);
        Ok(())
    }

    #[test]
    fn secret_length_must_match() {
        let err = bernstein_vazirani(3, "10").unwrap_err();
        assert!(matches!(err, OracleError::InvalidArgument { .. }));
    }

    #[test]
    fn enumerates_every_secret() -> Result<()> {
        let secrets: Vec<String> = all_bernstein_vazirani(2)?
            .map(|instance| instance.map(|i| i.secret))
            .collect::<Result<_>>()?;
        assert_eq!(secrets, vec!["00", "01", "10", "11"]);
        Ok(())
    }

    #[test]
    fn random_secrets_have_the_requested_width() {
        let mut rng = StdRng::seed_from_u64(3);
        for nbits in [0, 1, 5, 24] {
            assert_eq!(random_secret(nbits, &mut rng).len(), nbits as usize);
        }
    }

    #[test]
    fn output_width_below_input_width_is_rejected() {
        let err = seeded_simon(4, 3, "0001", DrawStrategy::PerIndex, 0).unwrap_err();
        assert!(matches!(err, OracleError::InvalidArgument { .. }));
    }

    #[test]
    fn periodic_pairs_share_outputs() -> Result<()> {
        for strategy in [DrawStrategy::PerIndex, DrawStrategy::PerPair] {
            let instance = seeded_simon(3, 4, "011", strategy, 9)?;
            let entries = instance.table.entries();
            for i in 0..8 {
                assert_eq!(entries[i], entries[i ^ 0b011], "{:?} at {}", strategy, i);
            }
            assert_eq!(instance.table.codomain_bits(), 4);
        }
        Ok(())
    }

    #[test]
    fn seeded_generation_is_reproducible() -> Result<()> {
        let a = seeded_simon(4, 6, "1001", DrawStrategy::PerPair, 17)?;
        let b = seeded_simon(4, 6, "1001", DrawStrategy::PerPair, 17)?;
        assert_eq!(a, b);
        Ok(())
    }

    #[test]
    fn serializes_in_the_accepted_input_shape() -> Result<()> {
        let bv = serde_json::to_value(bernstein_vazirani(2, "11")?).map_err(|e| OracleError::decode(e.to_string()))?;
        assert_eq!(bv, serde_json::json!({"nbits": 2, "f": [1, 2], "s": "11"}));

        let simon = serde_json::to_value(seeded_simon(1, 1, "1", DrawStrategy::PerIndex, 0)?)
            .map_err(|e| OracleError::decode(e.to_string()))?;
        assert_eq!(simon["mbits"], 1);
        assert_eq!(simon["s"], "1");
        Ok(())
    }
}
