//! The validation engine.
//!
//! A single synchronous pass over the declared variables:
//! skip check, source-mode check, declaration invariants, strict-shape
//! check, then every validator, collecting all issues before reporting.
//! No partial result ever escapes a failing pass.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use crate::observability::Logger;
use crate::schema::{EnvValue, SchemaGroup};
use crate::source::RuntimeSource;

use super::errors::{ConfigError, EnvError, EnvResult, ValidationReport};
use super::options::{EnvOptions, OnInvalidAccess};
use super::result::ValidatedEnv;

/// Validates the configured environment and assembles the flattened
/// result.
///
/// Declared keys are processed in declaration order, server group
/// first. All validator issues are collected before the pass fails, so
/// the report is complete in one run.
///
/// # Errors
///
/// - `EnvError::Config` for structural invariant violations in the
///   caller's setup, detected before any validator runs
/// - `EnvError::Validation` with the complete per-variable report when
///   any declared value fails its validator
pub fn validate(options: EnvOptions) -> EnvResult<ValidatedEnv> {
    let EnvOptions {
        server,
        client,
        client_prefix,
        runtime_env,
        runtime_env_strict,
        empty_string_as_undefined,
        skip_validation,
        is_server,
        on_validation_error,
        on_invalid_access,
    } = options;

    if skip_validation {
        return Ok(skip(runtime_env, runtime_env_strict, is_server, on_invalid_access));
    }

    let source = match (runtime_env, runtime_env_strict) {
        (Some(map), None) => RuntimeSource::permissive(map),
        (None, Some(map)) => RuntimeSource::strict(map),
        _ => return Err(ConfigError::InvalidRuntimeSource.into()),
    };

    check_unique(&server, &client)?;
    check_prefix(&server, &client, client_prefix.as_deref())?;
    if let RuntimeSource::Strict(map) = &source {
        check_strict_shape(&server, &client, map)?;
    }

    let mut values = BTreeMap::new();
    let mut report = ValidationReport::new();
    for (key, validator) in server.iter().chain(client.iter()) {
        let raw = resolve_raw(&source, key, empty_string_as_undefined);
        match validator.parse(raw) {
            Ok(value) => {
                values.insert(key.to_string(), value);
            }
            Err(issues) => report.push(key, issues),
        }
    }

    if !report.is_empty() {
        match &on_validation_error {
            Some(handler) => handler(&report),
            None => log_report(&report),
        }
        return Err(EnvError::Validation(report));
    }

    let server_keys: BTreeSet<String> = server.keys().map(str::to_string).collect();
    if !is_server {
        // Server values never reach a client-side result object
        for key in &server_keys {
            values.remove(key);
        }
    }

    Ok(ValidatedEnv::assemble(
        values,
        server_keys,
        is_server,
        false,
        on_invalid_access,
    ))
}

/// Bypass path: the raw source, verbatim, with no checks of any kind.
///
/// The permissive source wins when both modes were supplied; an absent
/// source yields an empty result. Strict entries with unset values are
/// dropped rather than surfaced as empty strings.
fn skip(
    runtime_env: Option<BTreeMap<String, String>>,
    runtime_env_strict: Option<BTreeMap<String, Option<String>>>,
    is_server: bool,
    on_invalid_access: Option<OnInvalidAccess>,
) -> ValidatedEnv {
    let values: BTreeMap<String, EnvValue> = if let Some(map) = runtime_env {
        map.into_iter().map(|(k, v)| (k, EnvValue::Str(v))).collect()
    } else if let Some(map) = runtime_env_strict {
        map.into_iter()
            .filter_map(|(k, v)| v.map(|v| (k, EnvValue::Str(v))))
            .collect()
    } else {
        BTreeMap::new()
    };

    // No server-key set: a skipped result guards nothing
    ValidatedEnv::assemble(values, BTreeSet::new(), is_server, true, on_invalid_access)
}

/// Names must be globally unique across both groups.
fn check_unique(server: &SchemaGroup, client: &SchemaGroup) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    let mut duplicates: Vec<String> = Vec::new();
    for key in server.keys().chain(client.keys()) {
        if !seen.insert(key) && !duplicates.iter().any(|k| k == key) {
            duplicates.push(key.to_string());
        }
    }
    if duplicates.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::DuplicateKeys { keys: duplicates })
    }
}

/// Client names must carry the prefix; server names must not.
fn check_prefix(
    server: &SchemaGroup,
    client: &SchemaGroup,
    prefix: Option<&str>,
) -> Result<(), ConfigError> {
    let prefix = match prefix {
        Some(p) if p.is_empty() => return Err(ConfigError::EmptyClientPrefix),
        Some(p) => p,
        None if client.is_empty() => return Ok(()),
        None => return Err(ConfigError::MissingClientPrefix),
    };

    let unprefixed: Vec<String> = client
        .keys()
        .filter(|key| !key.starts_with(prefix))
        .map(str::to_string)
        .collect();
    if !unprefixed.is_empty() {
        return Err(ConfigError::UnprefixedClientKeys {
            prefix: prefix.to_string(),
            keys: unprefixed,
        });
    }

    let prefixed: Vec<String> = server
        .keys()
        .filter(|key| key.starts_with(prefix))
        .map(str::to_string)
        .collect();
    if !prefixed.is_empty() {
        return Err(ConfigError::PrefixedServerKeys {
            prefix: prefix.to_string(),
            keys: prefixed,
        });
    }

    Ok(())
}

/// A strict source must cover exactly the declared union.
fn check_strict_shape(
    server: &SchemaGroup,
    client: &SchemaGroup,
    source: &BTreeMap<String, Option<String>>,
) -> Result<(), ConfigError> {
    let declared: BTreeSet<&str> = server.keys().chain(client.keys()).collect();

    let missing: Vec<String> = declared
        .iter()
        .filter(|key| !source.contains_key(**key))
        .map(|key| key.to_string())
        .collect();
    let undeclared: Vec<String> = source
        .keys()
        .filter(|key| !declared.contains(key.as_str()))
        .map(|key| key.to_string())
        .collect();

    if missing.is_empty() && undeclared.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::StrictKeyMismatch { missing, undeclared })
    }
}

/// Resolves one raw value, applying the empty-string normalization.
fn resolve_raw<'a>(
    source: &'a RuntimeSource,
    key: &str,
    empty_string_as_undefined: bool,
) -> Option<&'a str> {
    match source.raw(key) {
        Some("") if empty_string_as_undefined => None,
        raw => raw,
    }
}

/// Default failure handler: one structured log line per issue.
fn log_report(report: &ValidationReport) {
    for entry in report.entries() {
        for issue in &entry.issues {
            Logger::error(
                "ENV_VALIDATION_FAILED",
                &[
                    ("variable", entry.key.as_str()),
                    ("issue", &issue.to_string()),
                ],
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{int, non_empty_string, string, ValidatorExt};

    fn permissive(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_neither_source_mode_rejected() {
        let result = validate(EnvOptions::new());
        assert_eq!(
            result.unwrap_err(),
            EnvError::Config(ConfigError::InvalidRuntimeSource)
        );
    }

    #[test]
    fn test_both_source_modes_rejected() {
        let options = EnvOptions::new()
            .runtime_env(BTreeMap::new())
            .runtime_env_strict(BTreeMap::new());
        let result = validate(options);
        assert_eq!(
            result.unwrap_err(),
            EnvError::Config(ConfigError::InvalidRuntimeSource)
        );
    }

    #[test]
    fn test_duplicate_across_groups_rejected() {
        let options = EnvOptions::new()
            .server(SchemaGroup::new().declare("SHARED", int()))
            .client(SchemaGroup::new().declare("SHARED", string()))
            .client_prefix("SHARED")
            .runtime_env(permissive(&[("SHARED", "1")]));
        let result = validate(options);
        assert_eq!(
            result.unwrap_err(),
            EnvError::Config(ConfigError::DuplicateKeys {
                keys: vec!["SHARED".to_string()]
            })
        );
    }

    #[test]
    fn test_duplicate_within_group_rejected() {
        let options = EnvOptions::new()
            .server(
                SchemaGroup::new()
                    .declare("PORT", int())
                    .declare("PORT", int()),
            )
            .runtime_env(permissive(&[("PORT", "1")]));
        let result = validate(options);
        assert!(matches!(
            result.unwrap_err(),
            EnvError::Config(ConfigError::DuplicateKeys { .. })
        ));
    }

    #[test]
    fn test_empty_prefix_rejected() {
        let options = EnvOptions::new()
            .client(SchemaGroup::new().declare("URL", string()))
            .client_prefix("")
            .runtime_env(permissive(&[("URL", "x")]));
        assert_eq!(
            validate(options).unwrap_err(),
            EnvError::Config(ConfigError::EmptyClientPrefix)
        );
    }

    #[test]
    fn test_empty_declarations_succeed() {
        let env = validate(EnvOptions::new().runtime_env(BTreeMap::new())).unwrap();
        assert!(env.is_empty());
        assert!(!env.is_skipped());
    }

    #[test]
    fn test_declaration_order_in_report() {
        // Server issues precede client issues regardless of name order
        let options = EnvOptions::new()
            .server(
                SchemaGroup::new()
                    .declare("ZPORT", int())
                    .declare("APORT", int()),
            )
            .client(SchemaGroup::new().declare("PUBLIC_URL", non_empty_string()))
            .client_prefix("PUBLIC_")
            .runtime_env(permissive(&[]));
        let err = validate(options).unwrap_err();
        let EnvError::Validation(report) = err else {
            panic!("expected validation error");
        };
        let keys: Vec<&str> = report.keys().collect();
        assert_eq!(keys, vec!["ZPORT", "APORT", "PUBLIC_URL"]);
    }

    #[test]
    fn test_defaulted_key_survives_empty_source() {
        let options = EnvOptions::new()
            .server(SchemaGroup::new().declare("PORT", int().with_default(3000i64)))
            .runtime_env(permissive(&[]));
        let env = validate(options).unwrap();
        assert_eq!(env.get("PORT").unwrap(), &EnvValue::Int(3000));
    }
}
