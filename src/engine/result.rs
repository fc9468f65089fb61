//! The validated result object.
//!
//! One flat mapping from declared name to typed value. In a client
//! context the server values are physically dropped before assembly;
//! reading a server-declared name still fails loudly instead of
//! returning a plausible-looking `None`.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::observability::Logger;
use crate::schema::EnvValue;

use super::errors::{EnvError, EnvResult};
use super::options::OnInvalidAccess;

/// The outcome of a successful (or skipped) validation pass.
pub struct ValidatedEnv {
    values: BTreeMap<String, EnvValue>,
    server_keys: BTreeSet<String>,
    is_server: bool,
    skipped: bool,
    on_invalid_access: Option<OnInvalidAccess>,
}

impl ValidatedEnv {
    pub(crate) fn assemble(
        values: BTreeMap<String, EnvValue>,
        server_keys: BTreeSet<String>,
        is_server: bool,
        skipped: bool,
        on_invalid_access: Option<OnInvalidAccess>,
    ) -> Self {
        Self {
            values,
            server_keys,
            is_server,
            skipped,
            on_invalid_access,
        }
    }

    /// Reads the validated value for `key`.
    ///
    /// # Errors
    ///
    /// - `EnvError::InvalidAccess` when a server-declared name is read
    ///   in a client context (the invalid-access handler observes the
    ///   read first)
    /// - `EnvError::Undeclared` when no group declares `key`
    pub fn get(&self, key: &str) -> EnvResult<&EnvValue> {
        if !self.skipped && !self.is_server && self.server_keys.contains(key) {
            match &self.on_invalid_access {
                Some(handler) => handler(key),
                None => Logger::fatal("ENV_INVALID_ACCESS", &[("variable", key)]),
            }
            return Err(EnvError::InvalidAccess(key.to_string()));
        }
        self.values
            .get(key)
            .ok_or_else(|| EnvError::Undeclared(key.to_string()))
    }

    /// Whether `key` has a readable value.
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Readable names in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.values.keys().map(String::as_str)
    }

    /// Number of readable values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no values are readable.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Whether validation was bypassed for this result.
    pub fn is_skipped(&self) -> bool {
        self.skipped
    }
}

impl fmt::Debug for ValidatedEnv {
    // Values never appear in Debug output; server values may be secrets.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatedEnv")
            .field("keys", &self.values.keys().collect::<Vec<_>>())
            .field("server_keys", &self.server_keys)
            .field("is_server", &self.is_server)
            .field("skipped", &self.skipped)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ValidatedEnv {
        let mut values = BTreeMap::new();
        values.insert("PORT".to_string(), EnvValue::Int(3000));
        values.insert("PUBLIC_URL".to_string(), EnvValue::Str("https://x".into()));
        let server_keys: BTreeSet<String> = ["PORT".to_string()].into_iter().collect();
        ValidatedEnv::assemble(values, server_keys, true, false, None)
    }

    #[test]
    fn test_get_on_server() {
        let env = sample();
        assert_eq!(env.get("PORT").unwrap(), &EnvValue::Int(3000));
        assert_eq!(
            env.get("PUBLIC_URL").unwrap(),
            &EnvValue::Str("https://x".into())
        );
    }

    #[test]
    fn test_undeclared_read() {
        let env = sample();
        assert_eq!(
            env.get("MISSING").unwrap_err(),
            EnvError::Undeclared("MISSING".to_string())
        );
    }

    #[test]
    fn test_server_key_guarded_on_client() {
        let mut values = BTreeMap::new();
        values.insert("PUBLIC_URL".to_string(), EnvValue::Str("https://x".into()));
        let server_keys: BTreeSet<String> = ["PORT".to_string()].into_iter().collect();
        let env = ValidatedEnv::assemble(values, server_keys, false, false, None);

        assert_eq!(
            env.get("PORT").unwrap_err(),
            EnvError::InvalidAccess("PORT".to_string())
        );
        assert!(env.get("PUBLIC_URL").is_ok());
        assert!(!env.contains("PORT"));
    }

    #[test]
    fn test_debug_withholds_values() {
        let env = sample();
        let debug = format!("{:?}", env);
        assert!(debug.contains("PORT"));
        assert!(!debug.contains("3000"));
        assert!(!debug.contains("https://x"));
    }

    #[test]
    fn test_keys_and_len() {
        let env = sample();
        assert_eq!(env.len(), 2);
        assert!(!env.is_empty());
        let keys: Vec<&str> = env.keys().collect();
        assert_eq!(keys, vec!["PORT", "PUBLIC_URL"]);
    }
}
