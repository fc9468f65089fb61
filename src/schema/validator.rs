//! The validator plug-in contract.
//!
//! The engine is polymorphic over anything that can turn a raw value into
//! a typed value or a list of issues. Validators never observe each
//! other's values and never read ambient state.

use serde::Serialize;
use std::fmt;

use super::types::EnvValue;

/// One validation failure produced by a validator.
///
/// The variable name is attached by the engine; a validator only reports
/// what it expected and what it saw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    /// Expected type or condition
    pub expected: String,
    /// Actual value or condition found
    pub actual: String,
}

impl Issue {
    pub fn new(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// A required value was not set.
    pub fn missing(expected: impl Into<String>) -> Self {
        Self {
            expected: expected.into(),
            actual: "unset".into(),
        }
    }

    /// A raw value did not have the expected shape.
    pub fn type_mismatch(expected: impl Into<String>, raw: &str) -> Self {
        Self {
            expected: expected.into(),
            actual: format!("'{}'", raw),
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expected {}, got {}", self.expected, self.actual)
    }
}

/// Parses one raw environment value into a typed value.
///
/// `raw` is `None` when the variable is unset (or was normalized to
/// unset by the engine). Implementations must be pure: same input, same
/// output, no I/O.
pub trait EnvValidator: Send + Sync {
    /// Parse a raw value, yielding a typed value or the list of issues.
    fn parse(&self, raw: Option<&str>) -> Result<EnvValue, Vec<Issue>>;
}
