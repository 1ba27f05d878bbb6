//! `oracle-gen`: generate problem instances and solve JSON bodies.
//!
//! **Usage:**
//! ```text
//! oracle-gen bv --nbits 3 [--secret 101]
//! oracle-gen simon --nbits 3 --mbits 5 [--secret 110] [--seed 7] [--per-pair]
//! echo '{"nbits": 3, "f": [1, 3, 4, 6]}' | oracle-gen solve --problem bernstein-vazirani
//! ```
//!
//! Logs go to stderr and are filtered with `RUST_LOG`.

use std::io::{self, Read};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use oracle_solvers::api::{self, Problem, Response};
use oracle_solvers::config::{PromiseMode, QueryPath, SolverConfig};
use oracle_solvers::generator::{self, DrawStrategy};
use oracle_solvers::solvers::{SimonSolver, Solver};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "oracle-gen", about = "Generate and solve hidden Boolean function instances")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print inner-product instances, one JSON object per line.
    Bv {
        /// Number of input bits.
        #[arg(long, default_value_t = 3)]
        nbits: u32,
        /// Secret string; every secret is printed when omitted.
        #[arg(long)]
        secret: Option<String>,
    },
    /// Print a periodic instance and check that it solves back to its secret.
    Simon {
        /// Number of input bits.
        #[arg(long, default_value_t = 3)]
        nbits: u32,
        /// Number of output bits (must be >= nbits).
        #[arg(long, default_value_t = 5)]
        mbits: u32,
        /// Secret string; drawn at random when omitted.
        #[arg(long)]
        secret: Option<String>,
        /// Seed for reproducible output.
        #[arg(long)]
        seed: Option<u64>,
        /// Draw one output per pair instead of one per index.
        #[arg(long)]
        per_pair: bool,
    },
    /// Solve a JSON body read from stdin and print the response.
    Solve {
        #[arg(long, value_enum)]
        problem: Problem,
        /// Answer through the simulated query circuit.
        #[arg(long)]
        quantum: bool,
        /// Verify the promise before answering.
        #[arg(long)]
        checked: bool,
        /// Measurement seed for the simulator.
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    match Args::parse().command {
        Command::Bv { nbits, secret } => bv(nbits, secret),
        Command::Simon {
            nbits,
            mbits,
            secret,
            seed,
            per_pair,
        } => simon(nbits, mbits, secret, seed, per_pair),
        Command::Solve {
            problem,
            quantum,
            checked,
            seed,
        } => solve(problem, quantum, checked, seed),
    }
}

/// Left-pads a short secret with zeros; longer secrets are rejected downstream.
fn pad_secret(secret: &str, nbits: u32) -> String {
    format!("{:0>width$}", secret, width = nbits as usize)
}

fn bv(nbits: u32, secret: Option<String>) -> Result<()> {
    match secret {
        Some(s) => {
            let instance = generator::bernstein_vazirani(nbits, &pad_secret(&s, nbits))?;
            println!("{}", serde_json::to_string(&instance)?);
        }
        None => {
            for instance in generator::all_bernstein_vazirani(nbits)? {
                println!("{}", serde_json::to_string(&instance?)?);
            }
        }
    }
    Ok(())
}

fn simon(nbits: u32, mbits: u32, secret: Option<String>, seed: Option<u64>, per_pair: bool) -> Result<()> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let secret = match secret {
        Some(s) => pad_secret(&s, nbits),
        None => generator::random_secret(nbits, &mut rng),
    };
    let strategy = if per_pair {
        DrawStrategy::PerPair
    } else {
        DrawStrategy::PerIndex
    };

    let instance = generator::simon(nbits, mbits, &secret, strategy, &mut rng)?;
    println!("{}", serde_json::to_string_pretty(&instance)?);

    let recovered = SimonSolver::new()
        .solve(&instance.table)
        .context("generated instance does not solve")?;
    info!(recovered = recovered.answer(), secret = %instance.secret, "self-check");
    if recovered.answer() != instance.secret {
        bail!(
            "generated instance solves to {} instead of {}",
            recovered.answer(),
            instance.secret
        );
    }
    Ok(())
}

fn solve(problem: Problem, quantum: bool, checked: bool, seed: Option<u64>) -> Result<()> {
    let mut body = String::new();
    io::stdin()
        .read_to_string(&mut body)
        .context("failed to read request body from stdin")?;

    let mut config = SolverConfig::default();
    if quantum {
        config.path = QueryPath::Quantum;
    }
    if checked {
        config.promise = PromiseMode::Checked;
    }
    config.evaluator.seed = seed;

    let response = match api::solve_json(problem, &body, &config) {
        Ok(solution) => Response::from(solution),
        Err(e) => Response::from(e),
    };
    println!("{}", serde_json::to_string(&response)?);
    Ok(())
}
