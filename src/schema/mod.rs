//! Schema subsystem: declarations, typed values, and validators.
//!
//! # Design Principles
//!
//! - Validators are pure: raw value in, typed value or issues out
//! - The engine is polymorphic over the `EnvValidator` trait
//! - Declaration order is preserved end to end
//! - No coercion between value types after parsing

mod builtins;
mod types;
mod validator;

pub use builtins::{
    boolean, custom, float, int, non_empty_string, one_of, pattern, port, string, url, BoolVar,
    FloatVar, FnValidator, IntVar, OneOf, OptionalVar, PatternVar, PortVar, StringVar, UrlVar,
    ValidatorExt, WithDefault,
};
pub use types::{EnvValue, SchemaGroup};
pub use validator::{EnvValidator, Issue};
