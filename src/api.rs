// src/api.rs

//! Per-family dispatch from a JSON request body to a response.
//!
//! ```
//! use oracle_solvers::api::{self, Problem};
//! use oracle_solvers::config::SolverConfig;
//!
//! let body = serde_json::json!({"nbits": 3, "f": [1, 3, 4, 6]});
//! let config = SolverConfig::default();
//! assert_eq!(api::respond(Problem::BernsteinVazirani, body.clone(), &config).answer, "101");
//! assert_eq!(api::respond(Problem::DeutschJozsa, body, &config).answer, "balanced");
//! ```

use crate::config::{QueryPath, SolverConfig};
use crate::core::{OracleError, OracleTable, Result};
use crate::evaluator::evaluator_from_config;
use crate::input::{RawInput, SimonInput};
use crate::solvers::{
    BernsteinVaziraniSolver, DeutschJozsaSolver, DeutschSolver, QuantumQuery, SimonSolver, Solution, Solver,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info_span};

/// The problem families served.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Problem {
    Deutsch,
    DeutschJozsa,
    BernsteinVazirani,
    Simon,
}

impl Problem {
    pub fn as_str(&self) -> &'static str {
        match self {
            Problem::Deutsch => "deutsch",
            Problem::DeutschJozsa => "deutsch-jozsa",
            Problem::BernsteinVazirani => "bernstein-vazirani",
            Problem::Simon => "simon",
        }
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The `{"answer": ...}` body returned to a caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Response {
    /// `"classification"`, `"string"` or `"error"`. Not serialized.
    #[serde(skip)]
    pub kind: &'static str,
    pub answer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub circuit: Option<String>,
}

impl Response {
    pub fn is_error(&self) -> bool {
        self.kind == "error"
    }
}

impl From<Solution> for Response {
    fn from(solution: Solution) -> Self {
        Self {
            kind: solution.result.kind(),
            answer: solution.result.answer().to_string(),
            circuit: solution.circuit,
        }
    }
}

impl From<OracleError> for Response {
    fn from(err: OracleError) -> Self {
        Self {
            kind: "error",
            answer: err.message().to_string(),
            circuit: None,
        }
    }
}

/// Normalizes `body` for `problem` and solves it along the configured path.
pub fn solve(problem: Problem, body: serde_json::Value, config: &SolverConfig) -> Result<Solution> {
    let _span = info_span!("solve", problem = problem.as_str()).entered();
    match problem {
        Problem::Deutsch => dispatch(&DeutschSolver::new(), RawInput::from_value(body)?.into_table()?, config),
        Problem::DeutschJozsa => dispatch(
            &DeutschJozsaSolver::with_promise(config.promise),
            RawInput::from_value(body)?.into_table()?,
            config,
        ),
        Problem::BernsteinVazirani => {
            // The quantum endpoint takes `f` as the full bit array.
            let input = RawInput::from_value(body)?;
            let table = match config.path {
                QueryPath::Classical => input.into_table()?,
                QueryPath::Quantum => input.into_bit_table()?,
            };
            dispatch(&BernsteinVaziraniSolver::with_promise(config.promise), table, config)
        }
        Problem::Simon => {
            let table = SimonInput::from_value(body)?.into_table()?;
            if config.path == QueryPath::Quantum {
                debug!("no single-query circuit for this family; answering classically");
            }
            Ok(SimonSolver::new().solve(&table)?.into())
        }
    }
}

/// Parses `text` as JSON and solves it.
pub fn solve_json(problem: Problem, text: &str, config: &SolverConfig) -> Result<Solution> {
    let body = serde_json::from_str(text).map_err(|e| OracleError::shape(format!("malformed input: {}", e)))?;
    solve(problem, body, config)
}

/// [`solve`] with failures folded into the response body.
pub fn respond(problem: Problem, body: serde_json::Value, config: &SolverConfig) -> Response {
    solve(problem, body, config).map_or_else(Response::from, Response::from)
}

fn dispatch<S: QuantumQuery>(solver: &S, table: OracleTable, config: &SolverConfig) -> Result<Solution> {
    match config.path {
        QueryPath::Classical => Ok(solver.solve(&table)?.into()),
        QueryPath::Quantum => {
            let evaluator = evaluator_from_config(&config.evaluator);
            solver.query(&table, &*evaluator)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deutsch_accepts_a_bit_array() {
        let response = respond(Problem::Deutsch, json!([true, false]), &SolverConfig::default());
        assert_eq!(response.answer, "balanced");
        assert_eq!(response.kind, "classification");
    }

    #[test]
    fn errors_become_answers() {
        let response = respond(Problem::Simon, json!([0, 0, 0, 1]), &SolverConfig::default());
        assert!(response.is_error());
        assert!(response.answer.starts_with("invalid f: more than two inputs map to the same output"));
    }

    #[test]
    fn quantum_path_returns_circuit_text() -> Result<()> {
        let solution = solve(
            Problem::BernsteinVazirani,
            json!({"nbits": 2, "f": [0, 0, 1, 1]}),
            &SolverConfig::quantum(),
        )?;
        assert_eq!(solution.result.answer(), "10");
        assert!(solution.circuit.is_some());
        Ok(())
    }

    #[test]
    fn bernstein_vazirani_reads_f_per_path() -> Result<()> {
        let classical = solve(
            Problem::BernsteinVazirani,
            json!({"nbits": 3, "f": [1, 3, 4, 6]}),
            &SolverConfig::default(),
        )?;
        assert_eq!(classical.result.answer(), "101");

        let quantum = solve(
            Problem::BernsteinVazirani,
            json!({"nbits": 3, "f": [0, 1, 0, 1, 1, 0, 1, 0]}),
            &SolverConfig::quantum(),
        )?;
        assert_eq!(quantum.result.answer(), "101");
        Ok(())
    }

    #[test]
    fn quantum_bernstein_vazirani_checks_length() {
        let response = respond(
            Problem::BernsteinVazirani,
            json!({"nbits": 3, "f": [0, 1, 1, 0]}),
            &SolverConfig::quantum(),
        );
        assert!(response.is_error());
        assert_eq!(response.answer, "invalid function length 4 != 2^nbits 8");
    }

    #[test]
    fn simon_ignores_the_quantum_path() -> Result<()> {
        let solution = solve(Problem::Simon, json!([1, 0, 0, 1]), &SolverConfig::quantum())?;
        assert_eq!(solution.result.answer(), "11");
        assert_eq!(solution.circuit, None);
        Ok(())
    }

    #[test]
    fn response_serializes_answer_only() {
        let response = respond(Problem::Deutsch, json!([1, 1]), &SolverConfig::default());
        assert_eq!(serde_json::to_value(&response).ok(), Some(json!({"answer": "constant"})));
    }

    #[test]
    fn problem_names_are_kebab_case() {
        assert_eq!(serde_json::to_value(Problem::DeutschJozsa).ok(), Some(json!("deutsch-jozsa")));
        assert_eq!(Problem::BernsteinVazirani.to_string(), "bernstein-vazirani");
    }
}
