// src/input/mod.rs

//! Wire encodings accepted at the input boundary.
//!
//! Each encoding is a variant of a tagged union that is normalized into an
//! [`OracleTable`] before any solver logic runs, so the solvers never sniff
//! formats themselves.
//!
//! ```
//! use oracle_solvers::input::RawInput;
//!
//! let sparse = RawInput::from_json(r#"{"nbits": 3, "f": [1, 3, 4, 6]}"#).unwrap();
//! let dense = RawInput::from_json("[0, 1, 0, 1, 1, 0, 1, 0]").unwrap();
//! assert_eq!(sparse.into_table().unwrap(), dense.into_table().unwrap());
//! ```

use crate::core::{OracleError, OracleTable, Result};
use serde::{Deserialize, Serialize};

/// One truth value, accepted as a JSON boolean or an integer (non-zero is true).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "BitRepr")]
pub struct Bit(pub bool);

#[derive(Deserialize)]
#[serde(untagged)]
enum BitRepr {
    Bool(bool),
    Int(u64),
}

impl From<BitRepr> for Bit {
    fn from(repr: BitRepr) -> Self {
        match repr {
            BitRepr::Bool(b) => Bit(b),
            BitRepr::Int(i) => Bit(i != 0),
        }
    }
}

impl From<bool> for Bit {
    fn from(b: bool) -> Self {
        Bit(b)
    }
}

/// Encodings of a single-output function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawInput {
    /// `[f(0), f(1), ...]`; the length must be a power of two.
    Bits(Vec<Bit>),
    /// `{"nbits": n, "bits": [...]}`; the length must equal `2^n`.
    TruthTable { nbits: u32, bits: Vec<Bit> },
    /// `{"nbits": n, "f": [x, ...]}` or `{"nbits": n, "values": [x, ...]}`:
    /// the inputs where the function is true.
    TrueSet {
        nbits: u32,
        #[serde(alias = "values")]
        f: Vec<u64>,
    },
}

impl RawInput {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| OracleError::shape(format!("malformed input: {}", e)))
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| OracleError::shape(format!("malformed input: {}", e)))
    }

    /// Normalizes into the canonical table.
    pub fn into_table(self) -> Result<OracleTable> {
        match self {
            RawInput::Bits(bits) => OracleTable::from_bits(unwrap_bits(bits)),
            RawInput::TruthTable { nbits, bits } => OracleTable::from_bits_with_width(nbits, unwrap_bits(bits)),
            RawInput::TrueSet { nbits, f } => OracleTable::from_true_set(nbits, f),
        }
    }

    /// Like [`RawInput::into_table`], but reads `{"nbits", "f"}` as the full
    /// bit array `f[x] = f(x)`, whose length must equal `2^nbits`.
    pub fn into_bit_table(self) -> Result<OracleTable> {
        match self {
            RawInput::TrueSet { nbits, f } => {
                OracleTable::from_bits_with_width(nbits, f.into_iter().map(|v| v != 0).collect())
            }
            other => other.into_table(),
        }
    }
}

impl From<Vec<bool>> for RawInput {
    fn from(bits: Vec<bool>) -> Self {
        RawInput::Bits(bits.into_iter().map(Bit).collect())
    }
}

fn unwrap_bits(bits: Vec<Bit>) -> Vec<bool> {
    bits.into_iter().map(|b| b.0).collect()
}

/// Encodings of a multi-output (Simon) function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SimonInput {
    /// `[f(0), f(1), ...]`; the length must be a power of two.
    Values(Vec<u64>),
    /// `{"nbits": n, "mbits": m, "f": [...]}` with both widths optional.
    Described {
        nbits: Option<u32>,
        mbits: Option<u32>,
        f: Vec<u64>,
    },
}

impl SimonInput {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| OracleError::shape(format!("malformed input: {}", e)))
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| OracleError::shape(format!("malformed input: {}", e)))
    }

    pub fn into_table(self) -> Result<OracleTable> {
        match self {
            SimonInput::Values(values) => OracleTable::from_values(values, None),
            SimonInput::Described { nbits: None, mbits, f } => OracleTable::from_values(f, mbits),
            SimonInput::Described {
                nbits: Some(n),
                mbits,
                f,
            } => OracleTable::from_values_with_width(n, mbits, f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bits_accept_booleans_and_integers() -> Result<()> {
        let from_bools = RawInput::from_json("[true, false]")?.into_table()?;
        let from_ints = RawInput::from_json("[1, 0]")?.into_table()?;
        assert_eq!(from_bools, from_ints);
        Ok(())
    }

    #[test]
    fn values_alias_reads_as_true_set() -> Result<()> {
        let input = RawInput::from_json(r#"{"nbits": 2, "values": [0, 3]}"#)?;
        assert_eq!(input, RawInput::TrueSet { nbits: 2, f: vec![0, 3] });
        Ok(())
    }

    #[test]
    fn truth_table_width_mismatch_is_a_shape_error() -> Result<()> {
        let input = RawInput::from_json(r#"{"nbits": 3, "bits": [0, 1, 1, 0]}"#)?;
        assert!(matches!(input.into_table(), Err(OracleError::Shape { .. })));
        Ok(())
    }

    #[test]
    fn bit_table_reads_f_densely() -> Result<()> {
        let dense = RawInput::from_json(r#"{"nbits": 3, "f": [0, 1, 0, 1, 1, 0, 1, 0]}"#)?.into_bit_table()?;
        assert_eq!(dense, OracleTable::from_true_set(3, [1, 3, 4, 6])?);

        let short = RawInput::from_json(r#"{"nbits": 3, "f": [0, 1, 1, 0]}"#)?.into_bit_table();
        match short {
            Err(OracleError::Shape { message }) => assert_eq!(message, "invalid function length 4 != 2^nbits 8"),
            other => panic!("unexpected {:?}", other),
        }
        Ok(())
    }

    #[test]
    fn unknown_shapes_are_rejected() {
        assert!(matches!(RawInput::from_json(r#"{"f": 3}"#), Err(OracleError::Shape { .. })));
    }

    #[test]
    fn simon_generator_output_is_accepted() -> Result<()> {
        let input = SimonInput::from_json(r#"{"nbits": 2, "mbits": 3, "f": [4, 6, 4, 6], "s": "10"}"#)?;
        let table = input.into_table()?;
        assert_eq!(table.domain_bits(), 2);
        assert_eq!(table.codomain_bits(), 3);
        Ok(())
    }

    #[test]
    fn simon_width_mismatch_is_a_shape_error() -> Result<()> {
        let input = SimonInput::from_json(r#"{"nbits": 3, "f": [0, 1, 0, 1]}"#)?;
        assert!(matches!(input.into_table(), Err(OracleError::Shape { .. })));
        Ok(())
    }
}
