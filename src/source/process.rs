//! Process-environment adapter.
//!
//! The only place the crate touches `std::env`, and only when a caller
//! asks for it. The engine itself stays pure.

use std::env;

use super::runtime::RuntimeSource;

/// Snapshots the ambient process environment as a permissive source.
pub fn permissive_from_process() -> RuntimeSource {
    RuntimeSource::Permissive(env::vars().collect())
}

/// Reads a truthy skip toggle (`1`, `true`, `yes`, case-insensitive)
/// from the process environment. Unset or anything else is `false`.
pub fn skip_requested(flag: &str) -> bool {
    match env::var(flag) {
        Ok(value) => matches!(
            value.trim().to_ascii_lowercase().as_str(),
            "1" | "true" | "yes"
        ),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permissive_from_process_sees_set_variable() {
        env::set_var("ENVGATE_TEST_PRESENT", "yes");
        let source = permissive_from_process();
        assert_eq!(source.raw("ENVGATE_TEST_PRESENT"), Some("yes"));
        env::remove_var("ENVGATE_TEST_PRESENT");
    }

    #[test]
    fn test_skip_requested_truthy_spellings() {
        for value in ["1", "true", "TRUE", "yes", " Yes "] {
            env::set_var("ENVGATE_TEST_SKIP", value);
            assert!(skip_requested("ENVGATE_TEST_SKIP"), "value {:?}", value);
        }
        for value in ["0", "false", "no", "", "off"] {
            env::set_var("ENVGATE_TEST_SKIP", value);
            assert!(!skip_requested("ENVGATE_TEST_SKIP"), "value {:?}", value);
        }
        env::remove_var("ENVGATE_TEST_SKIP");
    }

    #[test]
    fn test_skip_requested_unset() {
        env::remove_var("ENVGATE_TEST_SKIP_UNSET");
        assert!(!skip_requested("ENVGATE_TEST_SKIP_UNSET"));
    }
}
