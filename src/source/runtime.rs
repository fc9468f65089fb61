//! Runtime sources: where raw values come from.
//!
//! The engine never reads ambient process state. Callers hand it a
//! finished mapping in one of two acquisition modes:
//! - permissive: the whole ambient mapping; declared keys are extracted,
//!   everything else is ignored
//! - strict: a caller-enumerated mapping that must cover exactly the
//!   declared keys (individual values may still be unset)

use std::collections::BTreeMap;

/// A key/value mapping supplying raw variable values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeSource {
    /// Whole ambient mapping; extras are ignored, absences are normal.
    Permissive(BTreeMap<String, String>),
    /// Exact caller-enumerated mapping; key coverage is checked by the
    /// engine before any validator runs.
    Strict(BTreeMap<String, Option<String>>),
}

impl RuntimeSource {
    /// Wraps a whole ambient mapping.
    pub fn permissive(map: BTreeMap<String, String>) -> Self {
        RuntimeSource::Permissive(map)
    }

    /// Wraps a caller-enumerated mapping.
    pub fn strict(map: BTreeMap<String, Option<String>>) -> Self {
        RuntimeSource::Strict(map)
    }

    /// Resolves the raw value for `key`, `None` when unset.
    pub fn raw(&self, key: &str) -> Option<&str> {
        match self {
            RuntimeSource::Permissive(map) => map.get(key).map(String::as_str),
            RuntimeSource::Strict(map) => map.get(key).and_then(|v| v.as_deref()),
        }
    }

    /// Whether `key` appears in the mapping (even with an unset value).
    pub fn contains(&self, key: &str) -> bool {
        match self {
            RuntimeSource::Permissive(map) => map.contains_key(key),
            RuntimeSource::Strict(map) => map.contains_key(key),
        }
    }

    /// Number of keys in the mapping.
    pub fn len(&self) -> usize {
        match self {
            RuntimeSource::Permissive(map) => map.len(),
            RuntimeSource::Strict(map) => map.len(),
        }
    }

    /// Whether the mapping is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
