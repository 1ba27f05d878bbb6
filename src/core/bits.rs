//! Bit-vector helpers shared by the solvers, generators and evaluators.

use super::error::{OracleError, Result};

/// Returns `Some(k)` when `len == 2^k`, `None` otherwise (including `len == 0`).
pub fn power_of_two_exponent(len: usize) -> Option<u32> {
    if len.is_power_of_two() {
        Some(len.trailing_zeros())
    } else {
        None
    }
}

/// Renders `value` as a binary string of exactly `width` characters,
/// most-significant bit first, left-zero-padded. Positions at or above 64
/// render as `0`.
pub fn to_bit_string(value: u64, width: u32) -> String {
    (0..width)
        .rev()
        .map(|i| if bit_at(value, i) { '1' } else { '0' })
        .collect()
}

/// Bit `i` of `value`; false for `i >= 64`.
pub fn bit_at(value: u64, i: u32) -> bool {
    value.checked_shr(i).is_some_and(|v| v & 1 == 1)
}

/// Parses a binary string (most-significant bit first) of exactly `width` characters.
pub fn parse_bit_string(s: &str, width: u32) -> Result<u64> {
    if s.len() != width as usize {
        return Err(OracleError::invalid_argument(format!(
            "secret string '{}' has length {} but {} bits are required",
            s,
            s.len(),
            width
        )));
    }
    if width > 64 {
        return Err(OracleError::invalid_argument(format!(
            "secret strings wider than 64 bits are not supported (got {})",
            width
        )));
    }
    s.chars().try_fold(0u64, |acc, c| match c {
        '0' => Ok(acc << 1),
        '1' => Ok((acc << 1) | 1),
        other => Err(OracleError::invalid_argument(format!(
            "secret string '{}' contains non-binary character '{}'",
            s, other
        ))),
    })
}

/// Inner product of two bit-vectors modulo 2.
pub fn inner_product(a: u64, b: u64) -> bool {
    (a & b).count_ones() % 2 == 1
}

/// Number of bits needed to represent `value` (at least one).
pub fn bit_length(value: u64) -> u32 {
    (u64::BITS - value.leading_zeros()).max(1)
}
