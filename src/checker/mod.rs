//! Checker execution framework
//!
//! The lifecycle every check goes through: resolve the check from the
//! registry, bind a runner against the check's metadata registration, gate on
//! activation, execute the domain hook, and persist the outcome. Concrete
//! checks only implement the hook; persistence and lifecycle tracing are
//! runner responsibilities so every check leaves a consistent audit trail.

pub mod error;
pub mod params;
pub mod registry;
pub mod runner;
pub mod status;

pub use error::CheckerError;
pub use params::{CheckParams, ParamValue};
pub use registry::{CheckerContext, CheckerFactory, CheckerRegistry};
pub use runner::{CheckRunner, Checker, RunDisposition};
pub use status::{CheckOutcome, CheckStatus};
