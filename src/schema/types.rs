//! Schema type definitions: typed values and declaration groups.
//!
//! Supported value types:
//! - string: UTF-8 string
//! - int: 64-bit signed integer
//! - float: 64-bit floating point
//! - bool: Boolean
//! - absent: declared optional and not set

use serde::Serialize;
use std::fmt;

use super::validator::EnvValidator;

/// A validated, typed environment value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum EnvValue {
    /// UTF-8 string
    Str(String),
    /// 64-bit signed integer
    Int(i64),
    /// 64-bit floating point
    Float(f64),
    /// Boolean
    Bool(bool),
    /// Declared optional and not set
    Absent,
}

impl EnvValue {
    /// Returns the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            EnvValue::Str(_) => "string",
            EnvValue::Int(_) => "int",
            EnvValue::Float(_) => "float",
            EnvValue::Bool(_) => "bool",
            EnvValue::Absent => "absent",
        }
    }

    /// Returns the string value, if this is a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            EnvValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the integer value, if this is an int
    pub fn as_int(&self) -> Option<i64> {
        match self {
            EnvValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the float value, if this is a float
    pub fn as_float(&self) -> Option<f64> {
        match self {
            EnvValue::Float(x) => Some(*x),
            _ => None,
        }
    }

    /// Returns the boolean value, if this is a bool
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            EnvValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Whether this value represents "declared but not set"
    pub fn is_absent(&self) -> bool {
        matches!(self, EnvValue::Absent)
    }
}

impl fmt::Display for EnvValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnvValue::Str(s) => write!(f, "{}", s),
            EnvValue::Int(n) => write!(f, "{}", n),
            EnvValue::Float(x) => write!(f, "{}", x),
            EnvValue::Bool(b) => write!(f, "{}", b),
            EnvValue::Absent => write!(f, "<absent>"),
        }
    }
}

impl From<&str> for EnvValue {
    fn from(s: &str) -> Self {
        EnvValue::Str(s.to_string())
    }
}

impl From<String> for EnvValue {
    fn from(s: String) -> Self {
        EnvValue::Str(s)
    }
}

impl From<i64> for EnvValue {
    fn from(n: i64) -> Self {
        EnvValue::Int(n)
    }
}

impl From<f64> for EnvValue {
    fn from(x: f64) -> Self {
        EnvValue::Float(x)
    }
}

impl From<bool> for EnvValue {
    fn from(b: bool) -> Self {
        EnvValue::Bool(b)
    }
}

/// An ordered collection of variable declarations.
///
/// Declaration order is preserved: it is the order validators run in and
/// the order failures are reported in. Duplicate names are rejected when
/// the engine runs, not when the group is built.
pub struct SchemaGroup {
    entries: Vec<(String, Box<dyn EnvValidator>)>,
}

impl SchemaGroup {
    /// Creates an empty group.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Declares a variable with its validator, preserving order.
    pub fn declare(
        mut self,
        name: impl Into<String>,
        validator: impl EnvValidator + 'static,
    ) -> Self {
        self.entries.push((name.into(), Box::new(validator)));
        self
    }

    /// Number of declared variables.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the group declares nothing.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `name` is declared in this group.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    /// Declared names in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Declarations in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &dyn EnvValidator)> + '_ {
        self.entries
            .iter()
            .map(|(name, validator)| (name.as_str(), validator.as_ref()))
    }
}

impl Default for SchemaGroup {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SchemaGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.keys()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::builtins::{int, string};

    #[test]
    fn test_value_type_names() {
        assert_eq!(EnvValue::Str("x".into()).type_name(), "string");
        assert_eq!(EnvValue::Int(1).type_name(), "int");
        assert_eq!(EnvValue::Float(1.5).type_name(), "float");
        assert_eq!(EnvValue::Bool(true).type_name(), "bool");
        assert_eq!(EnvValue::Absent.type_name(), "absent");
    }

    #[test]
    fn test_value_accessors() {
        assert_eq!(EnvValue::Str("x".into()).as_str(), Some("x"));
        assert_eq!(EnvValue::Int(42).as_int(), Some(42));
        assert_eq!(EnvValue::Float(2.5).as_float(), Some(2.5));
        assert_eq!(EnvValue::Bool(true).as_bool(), Some(true));
        assert!(EnvValue::Absent.is_absent());

        // Accessors never coerce across types
        assert_eq!(EnvValue::Int(42).as_str(), None);
        assert_eq!(EnvValue::Str("42".into()).as_int(), None);
    }

    #[test]
    fn test_value_from_conversions() {
        assert_eq!(EnvValue::from("x"), EnvValue::Str("x".into()));
        assert_eq!(EnvValue::from(3i64), EnvValue::Int(3));
        assert_eq!(EnvValue::from(1.5f64), EnvValue::Float(1.5));
        assert_eq!(EnvValue::from(true), EnvValue::Bool(true));
    }

    #[test]
    fn test_value_serializes_untagged() {
        let json = serde_json::to_value(EnvValue::Int(3)).unwrap();
        assert_eq!(json, serde_json::json!(3));
        let json = serde_json::to_value(EnvValue::Absent).unwrap();
        assert_eq!(json, serde_json::Value::Null);
    }

    #[test]
    fn test_group_preserves_declaration_order() {
        let group = SchemaGroup::new()
            .declare("ZEBRA", string())
            .declare("APPLE", int())
            .declare("MANGO", string());

        let keys: Vec<&str> = group.keys().collect();
        assert_eq!(keys, vec!["ZEBRA", "APPLE", "MANGO"]);
    }

    #[test]
    fn test_group_contains() {
        let group = SchemaGroup::new().declare("PORT", int());
        assert!(group.contains("PORT"));
        assert!(!group.contains("HOST"));
    }

    #[test]
    fn test_empty_group() {
        let group = SchemaGroup::new();
        assert!(group.is_empty());
        assert_eq!(group.len(), 0);
    }
}
