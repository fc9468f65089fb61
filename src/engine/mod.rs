//! Validation engine for envgate.
//!
//! # Design Principles
//!
//! - One synchronous pass, invoked once at startup
//! - Configuration errors are detected before any validator runs
//! - Failure reports are complete: every failing variable, one pass
//! - No partial result ever escapes a failing pass
//! - Server values never reach a client-side result

mod errors;
mod options;
mod result;
mod validate;

pub use errors::{ConfigError, EnvError, EnvResult, KeyIssues, ValidationReport};
pub use options::{EnvOptions, OnInvalidAccess, OnValidationError};
pub use result::ValidatedEnv;
pub use validate::validate;
