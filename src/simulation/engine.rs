// src/simulation/engine.rs
use crate::core::{OracleError, QubitId, Result, StateVector};
use crate::operations::Operation;
use num_complex::Complex;
use num_traits::Zero;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use tracing::trace;

/// Amplitudes below this squared magnitude are treated as exactly zero.
const AMPLITUDE_TOLERANCE: f64 = 1e-12;

const BACKEND: &str = "state-vector";

/// Dense state-vector engine over `num_qubits` qubits.
/// (Internal visibility)
pub(crate) struct SimulationEngine {
    state: StateVector,
    num_qubits: usize,
}

impl SimulationEngine {
    /// Initializes the register in |0...0>.
    pub(crate) fn init(num_qubits: usize) -> Result<Self> {
        if num_qubits == 0 {
            return Err(OracleError::backend(
                BACKEND,
                "cannot initialize simulation engine with zero qubits",
            ));
        }
        let dim = u32::try_from(num_qubits)
            .ok()
            .and_then(|n| 1usize.checked_shl(n))
            .ok_or_else(|| {
                OracleError::backend(
                    BACKEND,
                    "number of qubits too large, state vector dimension overflows usize",
                )
            })?;
        Ok(Self {
            state: StateVector::zero_state(dim),
            num_qubits,
        })
    }

    #[cfg(test)]
    pub(crate) fn set_state(&mut self, state: StateVector) -> Result<()> {
        if state.dim() != self.state.dim() {
            return Err(OracleError::backend(
                BACKEND,
                format!(
                    "cannot set state: provided dimension {} does not match engine dimension {}",
                    state.dim(),
                    self.state.dim()
                ),
            ));
        }
        self.state = state;
        Ok(())
    }

    pub(crate) fn state(&self) -> &StateVector {
        &self.state
    }

    /// Applies a single non-measurement operation to the register.
    pub(crate) fn apply_operation(&mut self, op: &Operation) -> Result<()> {
        match op {
            Operation::Flip { target } => {
                let mask = self.bit_mask(target)?;
                self.controlled_flip(0, mask);
            }
            Operation::Superposition { target } => {
                let k = self.bit_position(target)?;
                self.apply_single_qubit_gate(k, &hadamard_matrix());
            }
            Operation::ControlledFlip { controls, target } => {
                let target_mask = self.bit_mask(target)?;
                let mut control_mask = 0usize;
                for control in controls {
                    let mask = self.bit_mask(control)?;
                    if mask == target_mask {
                        return Err(OracleError::backend(
                            BACKEND,
                            format!("{} cannot control itself", control),
                        ));
                    }
                    control_mask |= mask;
                }
                self.controlled_flip(control_mask, target_mask);
            }
            Operation::Measure { .. } => {
                return Err(OracleError::backend(
                    BACKEND,
                    "measure operation should not be passed directly to apply_operation",
                ));
            }
        }
        Ok(())
    }

    /// Samples a joint outcome for `targets` and collapses the register onto it.
    ///
    /// Returns the outcome with bit `j` holding the value measured on `targets[j]`.
    /// Sampling is deterministic: the PRNG is seeded from `seed` when given and
    /// from a hash of the amplitudes otherwise.
    pub(crate) fn measure(&mut self, targets: &[QubitId], seed: Option<u64>) -> Result<u64> {
        if targets.is_empty() {
            return Ok(0);
        }
        let positions: Vec<usize> = targets
            .iter()
            .map(|t| self.bit_position(t))
            .collect::<Result<_>>()?;

        let amplitudes = self.state.vector();
        let mut weights = vec![0.0f64; 1usize << positions.len()];
        for (k, amp) in amplitudes.iter().enumerate() {
            let p = amp.norm_sqr();
            if p > AMPLITUDE_TOLERANCE {
                weights[project(k, &positions)] += p;
            }
        }

        let candidates: Vec<(u64, f64)> = weights
            .iter()
            .enumerate()
            .filter(|(_, w)| **w > AMPLITUDE_TOLERANCE)
            .map(|(outcome, w)| (outcome as u64, *w))
            .collect();
        let total: f64 = candidates.iter().map(|(_, w)| w).sum();
        if candidates.is_empty() || total < AMPLITUDE_TOLERANCE {
            return Err(OracleError::backend(
                BACKEND,
                "measurement failed: state has negligible norm",
            ));
        }

        let seed = seed.unwrap_or_else(|| {
            let mut hasher = DefaultHasher::new();
            for c in amplitudes {
                c.re.to_ne_bytes().hash(&mut hasher);
                c.im.to_ne_bytes().hash(&mut hasher);
            }
            hasher.finish()
        });
        let mut rng = StdRng::seed_from_u64(seed);
        let sample: f64 = rng.random::<f64>() * total;

        let mut chosen = candidates[candidates.len() - 1].0;
        let mut cumulative = 0.0;
        for (outcome, weight) in &candidates {
            cumulative += weight;
            if sample < cumulative {
                chosen = *outcome;
                break;
            }
        }
        trace!(outcome = chosen, candidates = candidates.len(), "measured register");

        // Collapse onto the chosen outcome and renormalize.
        let kept: f64 = candidates
            .iter()
            .find(|(o, _)| *o == chosen)
            .map(|(_, w)| *w)
            .unwrap_or(total);
        let scale = 1.0 / kept.sqrt();
        for (k, amp) in self.state.vector_mut().iter_mut().enumerate() {
            if project(k, &positions) as u64 == chosen {
                *amp *= scale;
            } else {
                *amp = Complex::zero();
            }
        }
        Ok(chosen)
    }

    fn bit_position(&self, qubit: &QubitId) -> Result<usize> {
        let k = qubit.0 as usize;
        if k < self.num_qubits {
            Ok(k)
        } else {
            Err(OracleError::backend(
                BACKEND,
                format!("{} not found in a register of {} qubits", qubit, self.num_qubits),
            ))
        }
    }

    fn bit_mask(&self, qubit: &QubitId) -> Result<usize> {
        Ok(1usize << self.bit_position(qubit)?)
    }

    /// Applies a 2x2 matrix to the qubit at bit position `k`.
    fn apply_single_qubit_gate(&mut self, k: usize, matrix: &[[Complex<f64>; 2]; 2]) {
        let k_mask = 1usize << k;
        let lower_mask = k_mask - 1;
        let upper_mask = !lower_mask;
        let dim = self.state.dim();
        let amplitudes = self.state.vector_mut();

        // Visit each pair of basis states differing only at bit k.
        for i in 0..dim / 2 {
            let i0 = ((i & upper_mask) << 1) | (i & lower_mask);
            let i1 = i0 | k_mask;
            let psi_0 = amplitudes[i0];
            let psi_1 = amplitudes[i1];
            amplitudes[i0] = matrix[0][0] * psi_0 + matrix[0][1] * psi_1;
            amplitudes[i1] = matrix[1][0] * psi_0 + matrix[1][1] * psi_1;
        }
    }

    /// Swaps the amplitudes of `|..0..>` and `|..1..>` at `target_mask` for
    /// every basis state where all `control_mask` bits are set.
    fn controlled_flip(&mut self, control_mask: usize, target_mask: usize) {
        let amplitudes = self.state.vector_mut();
        for k in 0..amplitudes.len() {
            if k & target_mask == 0 && k & control_mask == control_mask {
                amplitudes.swap(k, k | target_mask);
            }
        }
    }
}

/// Gathers the bits of `k` at `positions` into a compact outcome index.
fn project(k: usize, positions: &[usize]) -> usize {
    positions
        .iter()
        .enumerate()
        .fold(0, |acc, (j, pos)| acc | (((k >> pos) & 1) << j))
}

fn hadamard_matrix() -> [[Complex<f64>; 2]; 2] {
    let h = Complex::new(std::f64::consts::FRAC_1_SQRT_2, 0.0);
    [[h, h], [h, -h]]
}
