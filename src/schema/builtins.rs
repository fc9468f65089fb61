//! Stock validators and combinators.
//!
//! The trait in `validator.rs` is the contract; these are the
//! implementations callers reach for when they do not bring their own.
//! Every builtin reports an unset required value as a `missing` issue and
//! a malformed value as a `type_mismatch` issue, so aggregate reports
//! read uniformly.

use regex::Regex;

use super::types::EnvValue;
use super::validator::{EnvValidator, Issue};

/// Any present string. `non_empty_string()` additionally rejects `""`.
pub struct StringVar {
    allow_empty: bool,
}

/// Accepts any string, including the empty string.
pub fn string() -> StringVar {
    StringVar { allow_empty: true }
}

/// Accepts any string except the empty string.
pub fn non_empty_string() -> StringVar {
    StringVar { allow_empty: false }
}

impl EnvValidator for StringVar {
    fn parse(&self, raw: Option<&str>) -> Result<EnvValue, Vec<Issue>> {
        match raw {
            None => Err(vec![Issue::missing("string")]),
            Some(s) if s.is_empty() && !self.allow_empty => {
                Err(vec![Issue::new("non-empty string", "empty string")])
            }
            Some(s) => Ok(EnvValue::Str(s.to_string())),
        }
    }
}

/// 64-bit signed integer.
pub struct IntVar;

/// Parses a 64-bit signed integer.
pub fn int() -> IntVar {
    IntVar
}

impl EnvValidator for IntVar {
    fn parse(&self, raw: Option<&str>) -> Result<EnvValue, Vec<Issue>> {
        match raw {
            None => Err(vec![Issue::missing("int")]),
            Some(s) => match s.parse::<i64>() {
                Ok(n) => Ok(EnvValue::Int(n)),
                Err(_) => Err(vec![Issue::type_mismatch("int", s)]),
            },
        }
    }
}

/// 64-bit floating point number.
pub struct FloatVar;

/// Parses a 64-bit floating point number.
pub fn float() -> FloatVar {
    FloatVar
}

impl EnvValidator for FloatVar {
    fn parse(&self, raw: Option<&str>) -> Result<EnvValue, Vec<Issue>> {
        match raw {
            None => Err(vec![Issue::missing("float")]),
            Some(s) => match s.parse::<f64>() {
                Ok(x) => Ok(EnvValue::Float(x)),
                Err(_) => Err(vec![Issue::type_mismatch("float", s)]),
            },
        }
    }
}

/// Boolean in the common textual spellings.
pub struct BoolVar;

/// Parses `true/false`, `1/0`, `yes/no` (case-insensitive).
pub fn boolean() -> BoolVar {
    BoolVar
}

impl EnvValidator for BoolVar {
    fn parse(&self, raw: Option<&str>) -> Result<EnvValue, Vec<Issue>> {
        match raw {
            None => Err(vec![Issue::missing("bool")]),
            Some(s) => match s.to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" => Ok(EnvValue::Bool(true)),
                "false" | "0" | "no" => Ok(EnvValue::Bool(false)),
                _ => Err(vec![Issue::type_mismatch("bool", s)]),
            },
        }
    }
}

/// TCP/UDP port number.
pub struct PortVar;

/// Parses an integer in `1..=65535`.
pub fn port() -> PortVar {
    PortVar
}

impl EnvValidator for PortVar {
    fn parse(&self, raw: Option<&str>) -> Result<EnvValue, Vec<Issue>> {
        match raw {
            None => Err(vec![Issue::missing("port (1-65535)")]),
            Some(s) => match s.parse::<u16>() {
                Ok(p) if p != 0 => Ok(EnvValue::Int(i64::from(p))),
                _ => Err(vec![Issue::type_mismatch("port (1-65535)", s)]),
            },
        }
    }
}

/// Closed set of allowed literals.
pub struct OneOf {
    allowed: Vec<String>,
}

/// Accepts exactly one of the given literals.
pub fn one_of<I, S>(allowed: I) -> OneOf
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    OneOf {
        allowed: allowed.into_iter().map(Into::into).collect(),
    }
}

impl EnvValidator for OneOf {
    fn parse(&self, raw: Option<&str>) -> Result<EnvValue, Vec<Issue>> {
        let expected = || format!("one of [{}]", self.allowed.join(", "));
        match raw {
            None => Err(vec![Issue::missing(expected())]),
            Some(s) if self.allowed.iter().any(|a| a == s) => {
                Ok(EnvValue::Str(s.to_string()))
            }
            Some(s) => Err(vec![Issue::type_mismatch(expected(), s)]),
        }
    }
}

/// String constrained by a caller-compiled regular expression.
pub struct PatternVar {
    re: Regex,
}

/// Accepts strings matching `re`. The caller compiles the regex, so an
/// invalid pattern surfaces where it is written, not inside the engine.
pub fn pattern(re: Regex) -> PatternVar {
    PatternVar { re }
}

impl EnvValidator for PatternVar {
    fn parse(&self, raw: Option<&str>) -> Result<EnvValue, Vec<Issue>> {
        match raw {
            None => Err(vec![Issue::missing(format!("string matching {}", self.re))]),
            Some(s) if self.re.is_match(s) => Ok(EnvValue::Str(s.to_string())),
            Some(s) => Err(vec![Issue::type_mismatch(
                format!("string matching {}", self.re),
                s,
            )]),
        }
    }
}

/// URL with an explicit scheme.
pub struct UrlVar;

/// Accepts `scheme://rest` where the scheme is non-empty ASCII
/// alphanumeric (plus `+`, `-`, `.`) and the remainder is non-empty.
pub fn url() -> UrlVar {
    UrlVar
}

impl EnvValidator for UrlVar {
    fn parse(&self, raw: Option<&str>) -> Result<EnvValue, Vec<Issue>> {
        match raw {
            None => Err(vec![Issue::missing("url")]),
            Some(s) => {
                let well_formed = s.split_once("://").map_or(false, |(scheme, rest)| {
                    !scheme.is_empty()
                        && !rest.is_empty()
                        && scheme
                            .chars()
                            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
                });
                if well_formed {
                    Ok(EnvValue::Str(s.to_string()))
                } else {
                    Err(vec![Issue::type_mismatch("url", s)])
                }
            }
        }
    }
}

/// Wraps a validator with a fallback value for unset input.
pub struct WithDefault<V> {
    inner: V,
    default: EnvValue,
}

impl<V: EnvValidator> EnvValidator for WithDefault<V> {
    fn parse(&self, raw: Option<&str>) -> Result<EnvValue, Vec<Issue>> {
        match raw {
            None => Ok(self.default.clone()),
            Some(s) => self.inner.parse(Some(s)),
        }
    }
}

/// Wraps a validator so that unset input yields `EnvValue::Absent`.
pub struct OptionalVar<V> {
    inner: V,
}

impl<V: EnvValidator> EnvValidator for OptionalVar<V> {
    fn parse(&self, raw: Option<&str>) -> Result<EnvValue, Vec<Issue>> {
        match raw {
            None => Ok(EnvValue::Absent),
            Some(s) => self.inner.parse(Some(s)),
        }
    }
}

/// Combinators available on every validator.
pub trait ValidatorExt: EnvValidator + Sized {
    /// Unset input yields `default`; present input goes to the inner
    /// validator unchanged.
    fn with_default(self, default: impl Into<EnvValue>) -> WithDefault<Self> {
        WithDefault {
            inner: self,
            default: default.into(),
        }
    }

    /// Unset input yields `EnvValue::Absent` instead of a missing issue.
    fn optional(self) -> OptionalVar<Self> {
        OptionalVar { inner: self }
    }
}

impl<V: EnvValidator + Sized> ValidatorExt for V {}

/// Closure-backed validator for anything the builtins do not cover.
pub struct FnValidator<F> {
    f: F,
}

/// Wraps a closure as a validator.
pub fn custom<F>(f: F) -> FnValidator<F>
where
    F: Fn(Option<&str>) -> Result<EnvValue, Vec<Issue>> + Send + Sync,
{
    FnValidator { f }
}

impl<F> EnvValidator for FnValidator<F>
where
    F: Fn(Option<&str>) -> Result<EnvValue, Vec<Issue>> + Send + Sync,
{
    fn parse(&self, raw: Option<&str>) -> Result<EnvValue, Vec<Issue>> {
        (self.f)(raw)
    }
}
