//! Observability for envgate.
//!
//! Structured JSON logging used by the engine's default handlers.

mod logger;

pub use logger::{Logger, Severity};
