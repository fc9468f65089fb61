//! Runtime source acquisition.
//!
//! Two modes, one contract: the engine asks a source for the raw value
//! of a declared key and nothing more.

mod process;
mod runtime;

pub use process::{permissive_from_process, skip_requested};
pub use runtime::RuntimeSource;
