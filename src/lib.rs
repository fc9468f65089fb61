//! envgate - a strict, runtime-checked environment variable validator
//!
//! Declared variables are split into a server group and a client group.
//! Client variables carry a mandatory name prefix so they may be exposed
//! to untrusted bundles; server variables must never carry it. A single
//! synchronous validation pass checks the declarations, parses every raw
//! value, and returns either one flattened typed result or a complete
//! per-variable failure report.

pub mod engine;
pub mod observability;
pub mod schema;
pub mod source;
