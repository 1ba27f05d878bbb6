// src/core/table.rs

use super::bits::{bit_length, power_of_two_exponent};
use super::error::{OracleError, Result};
use std::collections::BTreeSet;
use std::fmt;

/// Largest supported domain width. A table of this width holds 2^24 entries.
pub const MAX_DOMAIN_BITS: u32 = 24;

/// Canonical, enumerable representation of a black-box function
/// `f: {0,1}^n -> {0,1}^m`.
///
/// Single-output functions are stored with `codomain_bits == 1` and entries
/// `0`/`1`; Simon functions store arbitrary integers in `[0, 2^m)`.
/// The table always holds exactly `2^n` entries and is immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OracleTable {
    domain_bits: u32,
    codomain_bits: u32,
    entries: Vec<u64>,
}

impl OracleTable {
    /// Builds a single-output table from an explicit bit array indexed by input.
    /// The domain width is inferred; the length must be a power of two.
    pub fn from_bits(bits: Vec<bool>) -> Result<Self> {
        let domain_bits = infer_domain_bits(bits.len())?;
        Self::boolean(domain_bits, bits)
    }

    /// Builds a single-output table from an explicit bit array whose length
    /// must equal `2^domain_bits`.
    pub fn from_bits_with_width(domain_bits: u32, bits: Vec<bool>) -> Result<Self> {
        let expected = domain_size(domain_bits)?;
        if bits.len() != expected {
            return Err(OracleError::shape(format!(
                "invalid function length {} != 2^nbits {}",
                bits.len(),
                expected
            )));
        }
        Self::boolean(domain_bits, bits)
    }

    /// Builds a single-output table from a bit width and the set of inputs
    /// where the function is true: `entries[x] = x in true_set`.
    pub fn from_true_set<I>(domain_bits: u32, true_set: I) -> Result<Self>
    where
        I: IntoIterator<Item = u64>,
    {
        let size = domain_size(domain_bits)?;
        let mut entries = vec![0u64; size];
        for index in true_set {
            let slot = usize::try_from(index)
                .ok()
                .filter(|i| *i < size)
                .ok_or_else(|| {
                    OracleError::shape(format!(
                        "true index {} is outside the domain [0, {})",
                        index, size
                    ))
                })?;
            entries[slot] = 1;
        }
        Ok(Self {
            domain_bits,
            codomain_bits: 1,
            entries,
        })
    }

    /// Builds a single-output table by evaluating `f` on every input.
    pub fn from_fn<F>(domain_bits: u32, f: F) -> Result<Self>
    where
        F: Fn(u64) -> bool,
    {
        let size = domain_size(domain_bits)?;
        let entries = (0..size as u64).map(|x| u64::from(f(x))).collect();
        Ok(Self {
            domain_bits,
            codomain_bits: 1,
            entries,
        })
    }

    /// Builds a multi-output table (Simon) from integer entries.
    /// The domain width is inferred from the length, which must be a power of two.
    /// When `codomain_bits` is `None` it is the bit length of the largest entry.
    pub fn from_values(values: Vec<u64>, codomain_bits: Option<u32>) -> Result<Self> {
        let domain_bits = infer_domain_bits(values.len())?;
        Self::integer(domain_bits, codomain_bits, values)
    }

    /// Builds a multi-output table whose length must equal `2^domain_bits`.
    pub fn from_values_with_width(
        domain_bits: u32,
        codomain_bits: Option<u32>,
        values: Vec<u64>,
    ) -> Result<Self> {
        let expected = domain_size(domain_bits)?;
        if values.len() != expected {
            return Err(OracleError::shape(format!(
                "invalid function length {} != 2^nbits {}",
                values.len(),
                expected
            )));
        }
        Self::integer(domain_bits, codomain_bits, values)
    }

    fn boolean(domain_bits: u32, bits: Vec<bool>) -> Result<Self> {
        Ok(Self {
            domain_bits,
            codomain_bits: 1,
            entries: bits.into_iter().map(u64::from).collect(),
        })
    }

    fn integer(domain_bits: u32, codomain_bits: Option<u32>, values: Vec<u64>) -> Result<Self> {
        let max = values.iter().copied().max().unwrap_or(0);
        let codomain_bits = match codomain_bits {
            Some(m) if m > 63 => {
                return Err(OracleError::shape(format!(
                    "codomain width {} exceeds the supported 63 bits",
                    m
                )));
            }
            Some(m) => {
                if max >> m != 0 {
                    return Err(OracleError::shape(format!(
                        "entry {} does not fit in {} output bits",
                        max, m
                    )));
                }
                m
            }
            None => bit_length(max),
        };
        Ok(Self {
            domain_bits,
            codomain_bits,
            entries: values,
        })
    }

    /// Input width `n`.
    pub fn domain_bits(&self) -> u32 {
        self.domain_bits
    }

    /// Output width `m` (1 for single-output tables).
    pub fn codomain_bits(&self) -> u32 {
        self.codomain_bits
    }

    /// Number of entries, always `2^domain_bits`.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Never true for a constructed table; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True when every entry is `0` or `1` and the codomain is one bit wide.
    pub fn is_boolean(&self) -> bool {
        self.codomain_bits == 1
    }

    /// The raw entries, indexed by input.
    pub fn entries(&self) -> &[u64] {
        &self.entries
    }

    /// `f(x)` as an integer. Out-of-domain inputs read as `0`.
    pub fn value(&self, x: usize) -> u64 {
        self.entries.get(x).copied().unwrap_or(0)
    }

    /// `f(x) != 0`. Out-of-domain inputs read as false.
    pub fn is_true(&self, x: usize) -> bool {
        self.value(x) != 0
    }

    /// Number of inputs where the function is true.
    pub fn true_count(&self) -> usize {
        self.entries.iter().filter(|v| **v != 0).count()
    }

    /// The set of inputs where the function is true.
    pub fn true_indices(&self) -> BTreeSet<u64> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, v)| **v != 0)
            .map(|(x, _)| x as u64)
            .collect()
    }

    /// Requires a single-output table; `Shape` error otherwise.
    pub fn require_boolean(&self) -> Result<()> {
        if self.is_boolean() {
            Ok(())
        } else {
            Err(OracleError::shape(format!(
                "expected a single-output function but the table has {} output bits",
                self.codomain_bits
            )))
        }
    }
}

impl fmt::Display for OracleTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OracleTable[{} -> {} bits](", self.domain_bits, self.codomain_bits)?;
        for (i, v) in self.entries.iter().enumerate() {
            write!(f, "{}{}", if i > 0 { ", " } else { "" }, v)?;
        }
        write!(f, ")")
    }
}

/// `2^domain_bits`, bounded by [`MAX_DOMAIN_BITS`].
pub(crate) fn domain_size(domain_bits: u32) -> Result<usize> {
    if domain_bits > MAX_DOMAIN_BITS {
        return Err(OracleError::shape(format!(
            "domain width {} exceeds the supported maximum of {} bits",
            domain_bits, MAX_DOMAIN_BITS
        )));
    }
    Ok(1usize << domain_bits)
}

fn infer_domain_bits(len: usize) -> Result<u32> {
    let bits = power_of_two_exponent(len).ok_or_else(|| {
        OracleError::shape(format!("function length is not power of 2 ({})", len))
    })?;
    domain_size(bits)?;
    Ok(bits)
}
