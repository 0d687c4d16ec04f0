//! Check invocation parameters
//!
//! The CLI passes parameters as `key=value` tokens. Values are coerced before
//! the check sees them: `"true"`/`"false"` (case-insensitive) become booleans,
//! integer-parseable strings become integers, everything else stays a string.
//! The framework forwards parameters verbatim; validation is each check's own
//! responsibility.

use std::collections::HashMap;

use crate::checker::CheckerError;

/// A coerced parameter value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Bool(bool),
    Int(i64),
    Str(String),
}

impl ParamValue {
    /// Coerce a raw CLI value. Booleans win over integers, integers over
    /// strings.
    pub fn coerce(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("true") {
            return ParamValue::Bool(true);
        }
        if raw.eq_ignore_ascii_case("false") {
            return ParamValue::Bool(false);
        }
        match raw.parse::<i64>() {
            Ok(n) => ParamValue::Int(n),
            Err(_) => ParamValue::Str(raw.to_string()),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParamValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            ParamValue::Int(n) => Some(*n),
            _ => None,
        }
    }
}

impl std::fmt::Display for ParamValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParamValue::Bool(b) => write!(f, "{}", b),
            ParamValue::Int(n) => write!(f, "{}", n),
            ParamValue::Str(s) => write!(f, "{}", s),
        }
    }
}

/// Named parameters forwarded to a check's domain hook
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CheckParams {
    values: HashMap<String, ParamValue>,
}

impl CheckParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `key=value` tokens. A token without `=` or with an empty key is
    /// a configuration error, reported before any check executes. The first
    /// `=` splits key from value, so values may themselves contain `=`.
    pub fn parse(tokens: &[String]) -> Result<Self, CheckerError> {
        let mut values = HashMap::new();
        for token in tokens {
            let (key, raw) = token
                .split_once('=')
                .ok_or_else(|| CheckerError::ParameterFormat(token.clone()))?;
            if key.is_empty() {
                return Err(CheckerError::ParameterFormat(token.clone()));
            }
            values.insert(key.to_string(), ParamValue::coerce(raw));
        }
        Ok(Self { values })
    }

    /// Set a parameter, replacing any previous value
    pub fn set(&mut self, key: impl Into<String>, value: ParamValue) {
        self.values.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.values.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(ParamValue::as_str)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.values.get(key).and_then(ParamValue::as_bool)
    }

    pub fn get_int(&self, key: &str) -> Option<i64> {
        self.values.get(key).and_then(ParamValue::as_int)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }
}
