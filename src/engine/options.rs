//! One-shot engine configuration.
//!
//! Constructed once, consumed once by `validate`, never mutated after.
//! The two source modes are separate fields so that supplying both (or
//! neither) is representable and rejected, rather than silently
//! resolved.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::schema::SchemaGroup;

use super::errors::ValidationReport;

/// Observes the complete failure report before the engine returns it.
///
/// Replaces the default structured-summary logging. The engine still
/// returns the validation error afterwards; callers that want to exit
/// with a specific code do so inside the handler.
pub type OnValidationError = Arc<dyn Fn(&ValidationReport) + Send + Sync>;

/// Observes a forbidden client-side read of a server variable, given
/// the variable name, before the accessor returns the access error.
pub type OnInvalidAccess = Arc<dyn Fn(&str) + Send + Sync>;

/// Configuration for one validation pass.
pub struct EnvOptions {
    /// Server-only variable declarations (may be empty)
    pub server: SchemaGroup,
    /// Client-exposable variable declarations (may be empty)
    pub client: SchemaGroup,
    /// Required name prefix for client variables; mandatory whenever
    /// the client group is non-empty
    pub client_prefix: Option<String>,
    /// Permissive source: the whole ambient mapping
    pub runtime_env: Option<BTreeMap<String, String>>,
    /// Strict source: caller-enumerated, must cover exactly the
    /// declared keys; individual values may still be unset
    pub runtime_env_strict: Option<BTreeMap<String, Option<String>>>,
    /// Treat a raw `""` as unset before validation
    pub empty_string_as_undefined: bool,
    /// Bypass every check and return the raw source verbatim
    pub skip_validation: bool,
    /// Whether server values may appear in the result
    pub is_server: bool,
    /// Replaces the default failure-report logging
    pub on_validation_error: Option<OnValidationError>,
    /// Replaces the default invalid-access logging
    pub on_invalid_access: Option<OnInvalidAccess>,
}

impl Default for EnvOptions {
    fn default() -> Self {
        Self {
            server: SchemaGroup::new(),
            client: SchemaGroup::new(),
            client_prefix: None,
            runtime_env: None,
            runtime_env_strict: None,
            empty_string_as_undefined: false,
            skip_validation: false,
            is_server: true,
            on_validation_error: None,
            on_invalid_access: None,
        }
    }
}

impl EnvOptions {
    /// Creates an empty configuration: no declarations, no source,
    /// server context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the server declarations.
    pub fn server(mut self, group: SchemaGroup) -> Self {
        self.server = group;
        self
    }

    /// Sets the client declarations.
    pub fn client(mut self, group: SchemaGroup) -> Self {
        self.client = group;
        self
    }

    /// Sets the client name prefix.
    pub fn client_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.client_prefix = Some(prefix.into());
        self
    }

    /// Supplies the permissive source mapping.
    pub fn runtime_env(mut self, map: BTreeMap<String, String>) -> Self {
        self.runtime_env = Some(map);
        self
    }

    /// Supplies the strict source mapping.
    pub fn runtime_env_strict(mut self, map: BTreeMap<String, Option<String>>) -> Self {
        self.runtime_env_strict = Some(map);
        self
    }

    /// Treat raw `""` values as unset before validation.
    pub fn empty_string_as_undefined(mut self, enabled: bool) -> Self {
        self.empty_string_as_undefined = enabled;
        self
    }

    /// Bypass validation entirely.
    pub fn skip_validation(mut self, enabled: bool) -> Self {
        self.skip_validation = enabled;
        self
    }

    /// Declares whether the result is consumed in a server context.
    pub fn is_server(mut self, is_server: bool) -> Self {
        self.is_server = is_server;
        self
    }

    /// Installs a validation-failure observer.
    pub fn on_validation_error(
        mut self,
        handler: impl Fn(&ValidationReport) + Send + Sync + 'static,
    ) -> Self {
        self.on_validation_error = Some(Arc::new(handler));
        self
    }

    /// Installs an invalid-access observer.
    pub fn on_invalid_access(mut self, handler: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.on_invalid_access = Some(Arc::new(handler));
        self
    }
}

impl fmt::Debug for EnvOptions {
    // Raw source values may hold secrets; Debug shows key counts only.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvOptions")
            .field("server", &self.server)
            .field("client", &self.client)
            .field("client_prefix", &self.client_prefix)
            .field("runtime_env_keys", &self.runtime_env.as_ref().map(BTreeMap::len))
            .field(
                "runtime_env_strict_keys",
                &self.runtime_env_strict.as_ref().map(BTreeMap::len),
            )
            .field("empty_string_as_undefined", &self.empty_string_as_undefined)
            .field("skip_validation", &self.skip_validation)
            .field("is_server", &self.is_server)
            .finish()
    }
}
