// src/operations/mod.rs

//! Gate-level operations that make up an oracle query circuit.
//!
//! Covers the Deutsch, Deutsch-Jozsa and Bernstein-Vazirani query circuits.
//! Oracles `U_f|x>|y> = |x>|y XOR f(x)>` are built from (multi-)controlled flips.

use crate::core::QubitId;
use std::fmt;

/// A single step of a query circuit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Bit flip on one qubit (Pauli X).
    Flip {
        /// The qubit to flip.
        target: QubitId,
    },

    /// Hadamard transform on one qubit, mapping basis states to equal superpositions.
    Superposition {
        /// The qubit to transform.
        target: QubitId,
    },

    /// Flips `target` when every qubit in `controls` is `1`.
    /// One control is a CNOT; an empty control list is an unconditional flip.
    ControlledFlip {
        /// Qubits that must all read `1`.
        controls: Vec<QubitId>,
        /// The qubit that is flipped.
        target: QubitId,
    },

    /// Measures the listed qubits in the computational basis.
    Measure {
        /// Qubits to measure, in classical-bit order.
        targets: Vec<QubitId>,
    },
}

impl Operation {
    /// Returns every qubit mentioned by the operation.
    pub fn involved_qubits(&self) -> Vec<QubitId> {
        match self {
            Operation::Flip { target } => vec![*target],
            Operation::Superposition { target } => vec![*target],
            Operation::ControlledFlip { controls, target } => {
                let mut qubits = controls.clone();
                qubits.push(*target);
                qubits
            }
            Operation::Measure { targets } => targets.clone(),
        }
    }

    /// Short gate mnemonic used in diagrams and QASM text. Flips with three
    /// or more controls print as `mcx<k>`, a gate the circuit's QASM header
    /// defines.
    pub fn mnemonic(&self) -> &'static str {
        match self {
            Operation::Flip { .. } => "x",
            Operation::Superposition { .. } => "h",
            Operation::ControlledFlip { controls, .. } => match controls.len() {
                0 => "x",
                1 => "cx",
                2 => "ccx",
                _ => "mcx",
            },
            Operation::Measure { .. } => "measure",
        }
    }
}

impl fmt::Display for Operation {
    /// OpenQASM-flavoured single line, e.g. `cx q[0],q[3];`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Flip { target } | Operation::Superposition { target } => {
                write!(f, "{} {};", self.mnemonic(), target)
            }
            Operation::ControlledFlip { controls, target } => {
                if controls.len() > 2 {
                    write!(f, "{}{} ", self.mnemonic(), controls.len())?;
                } else {
                    write!(f, "{} ", self.mnemonic())?;
                }
                for c in controls {
                    write!(f, "{},", c)?;
                }
                write!(f, "{};", target)
            }
            Operation::Measure { targets } => {
                for (i, t) in targets.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "measure {} -> c[{}];", t, i)?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn controlled_flip_lists_controls_then_target() {
        let op = Operation::ControlledFlip {
            controls: vec![QubitId(0), QubitId(2)],
            target: QubitId(3),
        };
        assert_eq!(op.involved_qubits(), vec![QubitId(0), QubitId(2), QubitId(3)]);
        assert_eq!(op.to_string(), "ccx q[0],q[2],q[3];");
    }

    #[test]
    fn wide_controlled_flip_names_its_arity() {
        let op = Operation::ControlledFlip {
            controls: (0..4).map(QubitId).collect(),
            target: QubitId(4),
        };
        assert_eq!(op.mnemonic(), "mcx");
        assert_eq!(op.to_string(), "mcx4 q[0],q[1],q[2],q[3],q[4];");
    }

    #[test]
    fn measure_renders_one_line_per_qubit() {
        let op = Operation::Measure {
            targets: vec![QubitId(0), QubitId(1)],
        };
        assert_eq!(op.to_string(), "measure q[0] -> c[0];\nmeasure q[1] -> c[1];");
    }
}
