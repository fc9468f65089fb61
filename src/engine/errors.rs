//! Engine error types.
//!
//! Two kinds, reported distinctly:
//! - configuration errors: the caller's setup violates a structural
//!   invariant (source mode, prefix, duplicate or strict-shape rules);
//!   detected before or independent of any per-value validation
//! - validation errors: one or more declared values failed their
//!   validator; always reported as a complete aggregate, never one at a
//!   time

use serde::Serialize;
use std::fmt;
use thiserror::Error;

use crate::schema::Issue;

/// Result type for engine operations
pub type EnvResult<T> = Result<T, EnvError>;

/// A structural invariant violation in the caller's setup.
///
/// Every variant that involves keys names all offending keys at once.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Both or neither of the two source modes were supplied
    #[error("exactly one of runtime_env or runtime_env_strict must be supplied")]
    InvalidRuntimeSource,

    /// Client variables are declared but no prefix was configured
    #[error("client_prefix is required when client variables are declared")]
    MissingClientPrefix,

    /// The configured prefix is the empty string
    #[error("client_prefix must be a non-empty string")]
    EmptyClientPrefix,

    /// A name is declared more than once across the two groups
    #[error("variable(s) declared more than once: {}", .keys.join(", "))]
    DuplicateKeys { keys: Vec<String> },

    /// Client variables whose names lack the configured prefix
    #[error("client variable(s) not prefixed with '{prefix}': {}", .keys.join(", "))]
    UnprefixedClientKeys { prefix: String, keys: Vec<String> },

    /// Server variables whose names carry the client prefix
    #[error("server variable(s) must not use the client prefix '{prefix}': {}", .keys.join(", "))]
    PrefixedServerKeys { prefix: String, keys: Vec<String> },

    /// Strict source keys do not match the declared union exactly
    #[error(
        "strict source key mismatch: missing [{}], undeclared [{}]",
        .missing.join(", "),
        .undeclared.join(", ")
    )]
    StrictKeyMismatch {
        missing: Vec<String>,
        undeclared: Vec<String>,
    },
}

/// All issues collected for one variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyIssues {
    /// Variable name
    pub key: String,
    /// Issues reported by the variable's validator
    pub issues: Vec<Issue>,
}

/// The complete per-variable failure report for one validation pass.
///
/// Entries appear in declaration order (server group first, then
/// client). A report is only ever surfaced whole; there is no partial
/// success.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    entries: Vec<KeyIssues>,
}

impl ValidationReport {
    /// Creates an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, key: impl Into<String>, issues: Vec<Issue>) {
        self.entries.push(KeyIssues {
            key: key.into(),
            issues,
        });
    }

    /// Whether any variable failed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of failing variables.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Per-variable entries in declaration order.
    pub fn entries(&self) -> &[KeyIssues] {
        &self.entries
    }

    /// Names of the failing variables in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|entry| entry.key.as_str())
    }

    /// Issues for one variable, if it failed.
    pub fn issues_for(&self, key: &str) -> Option<&[Issue]> {
        self.entries
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| entry.issues.as_slice())
    }

    /// JSON rendering for structured consumers.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid environment variables:")?;
        for entry in &self.entries {
            for issue in &entry.issues {
                write!(f, "\n  {}: {}", entry.key, issue)?;
            }
        }
        Ok(())
    }
}

/// Unified error type for the engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EnvError {
    /// The caller's setup is invalid
    #[error("invalid environment configuration: {0}")]
    Config(#[from] ConfigError),

    /// One or more declared values failed validation
    #[error("{0}")]
    Validation(ValidationReport),

    /// A server-only variable was read from a client context
    #[error("attempted to access server-only variable '{0}' from a client context")]
    InvalidAccess(String),

    /// A variable was read that no group declares
    #[error("variable '{0}' was never declared")]
    Undeclared(String),
}
