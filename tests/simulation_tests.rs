// tests/simulation_tests.rs

// Import necessary types from the oracle_solvers crate
use oracle_solvers::{Circuit, CircuitBuilder, OracleError, Operation, QubitId, Simulator};

// Helper function to create QubitId for tests
fn qid(id: u32) -> QubitId {
    QubitId(id)
}

#[test]
fn test_empty_circuit() -> Result<(), OracleError> {
    let result = Simulator::new().run(&Circuit::new())?;
    assert!(result.all_measurements().is_empty(), "Empty circuit should yield empty results");
    assert_eq!(result.bit_string(), "");
    Ok(())
}

#[test]
fn test_initial_state_measures_zero() -> Result<(), OracleError> {
    let circuit = CircuitBuilder::new()
        .add_op(Operation::Measure { targets: vec![qid(0), qid(1)] })
        .build();
    let result = Simulator::new().run(&circuit)?;
    assert_eq!(result.get(&qid(0)), Some(0));
    assert_eq!(result.get(&qid(1)), Some(0));
    assert_eq!(result.bit_string(), "00");
    Ok(())
}

#[test]
fn test_flip_then_controlled_flip() -> Result<(), OracleError> {
    // |00> -> X q0 -> |01> -> CX q0,q1 -> |11>
    let circuit = CircuitBuilder::new()
        .add_op(Operation::Flip { target: qid(0) })
        .add_op(Operation::ControlledFlip {
            controls: vec![qid(0)],
            target: qid(1),
        })
        .add_op(Operation::Measure { targets: vec![qid(0), qid(1)] })
        .build();
    let result = Simulator::new().run(&circuit)?;
    assert_eq!(result.bit_string(), "11");
    Ok(())
}

#[test]
fn test_double_superposition_is_identity() -> Result<(), OracleError> {
    let circuit = CircuitBuilder::new()
        .add_op(Operation::Flip { target: qid(0) })
        .add_op(Operation::Superposition { target: qid(0) })
        .add_op(Operation::Superposition { target: qid(0) })
        .add_op(Operation::Measure { targets: vec![qid(0)] })
        .build();
    for seed in 0..8 {
        let result = Simulator::new().with_seed(seed).run(&circuit)?;
        assert_eq!(result.get(&qid(0)), Some(1), "seed {}", seed);
    }
    Ok(())
}

#[test]
fn test_toffoli_needs_both_controls() -> Result<(), OracleError> {
    let ccx = Operation::ControlledFlip {
        controls: vec![qid(0), qid(1)],
        target: qid(2),
    };
    let only_one = CircuitBuilder::new()
        .add_op(Operation::Flip { target: qid(0) })
        .add_op(ccx.clone())
        .add_op(Operation::Measure { targets: vec![qid(2)] })
        .build();
    assert_eq!(Simulator::new().run(&only_one)?.get(&qid(2)), Some(0));

    let both = CircuitBuilder::new()
        .add_op(Operation::Flip { target: qid(0) })
        .add_op(Operation::Flip { target: qid(1) })
        .add_op(ccx)
        .add_op(Operation::Measure { targets: vec![qid(2)] })
        .build();
    assert_eq!(Simulator::new().run(&both)?.get(&qid(2)), Some(1));
    Ok(())
}

#[test]
fn test_seeded_superposition_is_reproducible() -> Result<(), OracleError> {
    let circuit = CircuitBuilder::new()
        .add_ops((0..4).map(|q| Operation::Superposition { target: qid(q) }))
        .add_op(Operation::Measure {
            targets: (0..4).map(qid).collect(),
        })
        .build();
    let simulator = Simulator::new().with_seed(1234);
    assert_eq!(simulator.run(&circuit)?, simulator.run(&circuit)?);
    Ok(())
}

#[test]
fn test_width_limit_is_a_backend_error() {
    let circuit = CircuitBuilder::new()
        .add_op(Operation::Flip { target: qid(30) })
        .build();
    match Simulator::new().run(&circuit) {
        Err(OracleError::Backend { backend, .. }) => assert_eq!(backend, "state-vector"),
        other => panic!("expected a backend error, got {:?}", other),
    }
}
