// src/circuits/mod.rs

//! Ordered sequences of [`Operation`]s and a builder for the standard
//! phase-kickback query circuits.
//!
//! Every query circuit has the same shape: `n` input qubits `q[0..n)`, one
//! ancilla `q[n]` prepared in `|->`, a Hadamard layer, the oracle, a second
//! Hadamard layer on the inputs, and a measurement of the inputs.

use crate::core::QubitId;
use crate::core::bits::bit_at;
use crate::operations::Operation;
use std::collections::BTreeSet;
use std::fmt;

/// An ordered sequence of operations applied to a set of qubits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Circuit {
    /// The unique set of qubits touched by any operation.
    qubits: BTreeSet<QubitId>,
    /// The ordered operations; order is significant.
    operations: Vec<Operation>,
}

impl Circuit {
    /// Creates a new, empty circuit.
    pub fn new() -> Self {
        Self {
            qubits: BTreeSet::new(),
            operations: Vec::new(),
        }
    }

    /// Appends an operation, registering the qubits it involves.
    pub fn add_operation(&mut self, op: Operation) {
        self.qubits.extend(op.involved_qubits());
        self.operations.push(op);
    }

    /// Appends every operation yielded by `ops`.
    pub fn add_operations<I>(&mut self, ops: I)
    where
        I: IntoIterator<Item = Operation>,
    {
        for op in ops {
            self.add_operation(op);
        }
    }

    /// The qubits involved in this circuit, in ascending order.
    pub fn qubits(&self) -> &BTreeSet<QubitId> {
        &self.qubits
    }

    /// Register width needed to simulate the circuit: highest qubit index + 1.
    pub fn width(&self) -> usize {
        self.qubits.iter().next_back().map(|q| q.0 as usize + 1).unwrap_or(0)
    }

    /// The ordered operations.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Number of classical bits written by measurements.
    pub fn measured_bits(&self) -> usize {
        self.operations
            .iter()
            .filter_map(|op| match op {
                Operation::Measure { targets } => Some(targets.len()),
                _ => None,
            })
            .max()
            .unwrap_or(0)
    }

    /// Largest control count of any controlled flip.
    fn max_controls(&self) -> usize {
        self.operations
            .iter()
            .map(|op| match op {
                Operation::ControlledFlip { controls, .. } => controls.len(),
                _ => 0,
            })
            .max()
            .unwrap_or(0)
    }

    /// OpenQASM 2 text of the circuit, the side-channel description returned
    /// on the quantum path.
    pub fn to_qasm(&self) -> String {
        let mut out = String::from("OPENQASM 2.0;\ninclude \"qelib1.inc\";\n");
        out.push_str(&multi_control_definitions(self.max_controls()));
        out.push_str(&format!("qreg q[{}];\n", self.width()));
        let clbits = self.measured_bits();
        if clbits > 0 {
            out.push_str(&format!("creg c[{}];\n", clbits));
        }
        for op in &self.operations {
            out.push_str(&op.to_string());
            out.push('\n');
        }
        out
    }
}

/// `gate` definitions for `mcx3..=mcx<max_controls>` over qelib1 gates.
///
/// `mcp<k>(lam)` is the `k`-controlled phase, built from `cu1` and
/// `(k-1)`-controlled flips by the square-root construction
/// (`V = u1(lam/2)`, `V^2 = u1(lam)`); `mcx<k>` conjugates `mcp<k>(pi)` with `h`.
fn multi_control_definitions(max_controls: usize) -> String {
    let mut out = String::new();
    if max_controls < 3 {
        return out;
    }
    let flip = |k: usize| match k {
        1 => "cx".to_string(),
        2 => "ccx".to_string(),
        _ => format!("mcx{}", k),
    };
    let phase = |k: usize| if k == 1 { "cu1".to_string() } else { format!("mcp{}", k) };
    for k in 2..=max_controls {
        let controls: Vec<String> = (0..k).map(|i| format!("c{}", i)).collect();
        let all = controls.join(",");
        let last = &controls[k - 1];
        let rest = controls[..k - 1].join(",");
        out.push_str(&format!(
            "gate mcp{k}(lam) {all},tgt {{ cu1(lam/2) {last},tgt; {fx} {rest},{last}; cu1(-lam/2) {last},tgt; \
             {fx} {rest},{last}; {ph}(lam/2) {rest},tgt; }}\n",
            k = k,
            all = all,
            last = last,
            rest = rest,
            fx = flip(k - 1),
            ph = phase(k - 1),
        ));
        if k >= 3 {
            out.push_str(&format!("gate mcx{k} {all},tgt {{ h tgt; mcp{k}(pi) {all},tgt; h tgt; }}\n", k = k, all = all));
        }
    }
    out
}

impl Default for Circuit {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Circuit[{} operations on {} qubits]",
            self.operations.len(),
            self.qubits.len()
        )?;
        for (t, op) in self.operations.iter().enumerate() {
            writeln!(f, "  {:>3}: {}", t, op)?;
        }
        Ok(())
    }
}

//-------------------------------------------------------------------------
// Circuit Builder
//-------------------------------------------------------------------------

/// Method-chaining construction of [`Circuit`]s.
pub struct CircuitBuilder {
    circuit: Circuit,
}

impl CircuitBuilder {
    pub fn new() -> Self {
        Self { circuit: Circuit::new() }
    }

    /// Adds a single operation.
    pub fn add_op(mut self, op: Operation) -> Self {
        self.circuit.add_operation(op);
        self
    }

    /// Adds every operation yielded by `ops`.
    pub fn add_ops<I>(mut self, ops: I) -> Self
    where
        I: IntoIterator<Item = Operation>,
    {
        self.circuit.add_operations(ops);
        self
    }

    /// Prepares the ancilla `q[n]` in `|->` and puts all `n + 1` qubits through
    /// a Hadamard layer.
    pub fn prepare_query(self, input_bits: u32) -> Self {
        let ancilla = QubitId(input_bits);
        self.add_op(Operation::Flip { target: ancilla })
            .add_ops((0..=input_bits).map(|q| Operation::Superposition { target: QubitId(q) }))
    }

    /// Closes the query: Hadamard on the inputs, then measure them.
    pub fn finish_query(self, input_bits: u32) -> Self {
        let inputs: Vec<QubitId> = (0..input_bits).map(QubitId).collect();
        self.add_ops(inputs.iter().map(|q| Operation::Superposition { target: *q }))
            .add_op(Operation::Measure { targets: inputs })
    }

    /// Oracle for `f(x) = mask . x (mod 2)`: one CNOT from every input qubit
    /// whose mask bit is set into the ancilla.
    pub fn inner_product_oracle(self, input_bits: u32, mask: u64) -> Self {
        let ancilla = QubitId(input_bits);
        self.add_ops((0..input_bits).filter(|i| bit_at(mask, *i)).map(|i| {
            Operation::ControlledFlip {
                controls: vec![QubitId(i)],
                target: ancilla,
            }
        }))
    }

    /// Oracle for an arbitrary truth table given by its true inputs.
    ///
    /// An empty set is the constant-false oracle (no gates); a full set is
    /// the constant-true oracle (flip the ancilla). Otherwise each true input
    /// `x` contributes `X` on its zero bits, a multi-controlled flip into the
    /// ancilla, and the `X` layer again.
    pub fn truth_table_oracle(self, input_bits: u32, true_inputs: &BTreeSet<u64>) -> Self {
        let ancilla = QubitId(input_bits);
        let size = 1u64 << input_bits;
        if true_inputs.is_empty() {
            return self;
        }
        if true_inputs.len() as u64 == size {
            return self.add_op(Operation::Flip { target: ancilla });
        }
        let controls: Vec<QubitId> = (0..input_bits).map(QubitId).collect();
        let mut builder = self;
        for x in true_inputs {
            let zero_bits: Vec<Operation> = (0..input_bits)
                .filter(|i| !bit_at(*x, *i))
                .map(|i| Operation::Flip { target: QubitId(i) })
                .collect();
            builder = builder
                .add_ops(zero_bits.clone())
                .add_op(Operation::ControlledFlip {
                    controls: controls.clone(),
                    target: ancilla,
                })
                .add_ops(zero_bits);
        }
        builder
    }

    pub fn build(self) -> Circuit {
        self.circuit
    }
}

impl Default for CircuitBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inner_product_oracle_places_one_cnot_per_set_bit() {
        let circuit = CircuitBuilder::new()
            .prepare_query(3)
            .inner_product_oracle(3, 0b101)
            .finish_query(3)
            .build();
        let cnots = circuit
            .operations()
            .iter()
            .filter(|op| matches!(op, Operation::ControlledFlip { .. }))
            .count();
        assert_eq!(cnots, 2);
        assert_eq!(circuit.width(), 4);
        assert_eq!(circuit.measured_bits(), 3);
    }

    #[test]
    fn constant_truth_tables_need_no_controlled_gates() {
        let all: BTreeSet<u64> = (0..4).collect();
        let circuit = CircuitBuilder::new().truth_table_oracle(2, &all).build();
        assert_eq!(circuit.operations(), &[Operation::Flip { target: QubitId(2) }]);

        let none = CircuitBuilder::new().truth_table_oracle(2, &BTreeSet::new()).build();
        assert!(none.is_empty());
    }

    #[test]
    fn qasm_defines_wide_controlled_flips() {
        let trues: BTreeSet<u64> = [1, 6].into_iter().collect();
        let qasm = CircuitBuilder::new()
            .prepare_query(3)
            .truth_table_oracle(3, &trues)
            .finish_query(3)
            .build()
            .to_qasm();
        assert!(qasm.contains("gate mcp2(lam) c0,c1,tgt { cu1(lam/2) c1,tgt; cx c0,c1; cu1(-lam/2) c1,tgt; cx c0,c1; cu1(lam/2) c0,tgt; }"));
        assert!(qasm.contains("gate mcp3(lam) c0,c1,c2,tgt { cu1(lam/2) c2,tgt; ccx c0,c1,c2;"));
        assert!(qasm.contains("gate mcx3 c0,c1,c2,tgt { h tgt; mcp3(pi) c0,c1,c2,tgt; h tgt; }"));
        assert!(qasm.contains("mcx3 q[0],q[1],q[2],q[3];"));
        assert!(!qasm.contains("mcx4"));
        let definition = qasm.find("gate mcx3").unwrap_or(usize::MAX);
        let first_use = qasm.find("mcx3 q[").unwrap_or(0);
        assert!(definition < first_use);
    }

    #[test]
    fn narrow_circuits_need_no_gate_definitions() {
        let circuit = CircuitBuilder::new().prepare_query(2).inner_product_oracle(2, 0b11).build();
        assert!(!circuit.to_qasm().contains("gate "));
    }

    #[test]
    fn qasm_declares_registers() {
        let circuit = CircuitBuilder::new().prepare_query(1).finish_query(1).build();
        let qasm = circuit.to_qasm();
        assert!(qasm.starts_with("OPENQASM 2.0;"));
        assert!(qasm.contains("qreg q[2];"));
        assert!(qasm.contains("creg c[1];"));
        assert!(qasm.contains("measure q[0] -> c[0];"));
    }
}
