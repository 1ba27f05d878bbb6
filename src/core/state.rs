// src/core/state.rs

use num_complex::Complex;
use num_traits::Zero;
use std::fmt;

/// Amplitudes of a register of qubits before measurement.
///
/// Basis index `k` encodes qubit `i` in bit `i` of `k`, so the vector has
/// `2^num_qubits` entries.
#[derive(Debug, Clone, PartialEq)] // Avoid Eq for floating-point complex numbers
pub struct StateVector {
    amplitudes: Vec<Complex<f64>>,
}

impl StateVector {
    /// The all-zero basis state |0...0> on `dim` amplitudes.
    pub(crate) fn zero_state(dim: usize) -> Self {
        let mut amplitudes = vec![Complex::zero(); dim];
        if let Some(first) = amplitudes.first_mut() {
            *first = Complex::new(1.0, 0.0);
        }
        Self { amplitudes }
    }

    /// Wraps an explicit amplitude vector. Normalization is not enforced.
    pub fn new(amplitudes: Vec<Complex<f64>>) -> Self {
        Self { amplitudes }
    }

    /// Read-only access to the amplitudes.
    pub fn vector(&self) -> &[Complex<f64>] {
        &self.amplitudes
    }

    pub(crate) fn vector_mut(&mut self) -> &mut [Complex<f64>] {
        &mut self.amplitudes
    }

    /// Number of basis states.
    pub fn dim(&self) -> usize {
        self.amplitudes.len()
    }

    /// Sum of squared magnitudes; 1.0 for a normalized state.
    pub fn norm_sqr(&self) -> f64 {
        self.amplitudes.iter().map(|c| c.norm_sqr()).sum()
    }
}

impl fmt::Display for StateVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StateVector[")?;
        for (i, c) in self.amplitudes.iter().enumerate() {
            write!(f, "{}{:.4}", if i > 0 { ", " } else { "" }, c)?;
        }
        write!(f, "]")
    }
}
