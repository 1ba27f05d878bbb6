// src/core/mod.rs

//! Core data structures and types

pub mod bits;
pub mod error;
pub mod result;
pub mod state;
pub mod table;

// Re-export public types for convenient access via `oracle_solvers::core::TypeName`
pub use error::{OracleError, QubitId, Result};
pub use result::{Classification, RecoveryResult};
pub use state::StateVector;
pub use table::{MAX_DOMAIN_BITS, OracleTable};
