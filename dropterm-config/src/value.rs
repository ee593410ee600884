//! Typed values held by a configuration store.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single stored preference value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Bool(bool),
    Int(i64),
    String(String),
}

impl ConfigValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ConfigValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            ConfigValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Name of the variant, used in type-mismatch diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            ConfigValue::Bool(_) => "bool",
            ConfigValue::Int(_) => "int",
            ConfigValue::String(_) => "string",
        }
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::Bool(b) => write!(f, "{b}"),
            ConfigValue::Int(i) => write!(f, "{i}"),
            ConfigValue::String(s) => write!(f, "{s:?}"),
        }
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        ConfigValue::Bool(value)
    }
}

impl From<i64> for ConfigValue {
    fn from(value: i64) -> Self {
        ConfigValue::Int(value)
    }
}

impl From<i32> for ConfigValue {
    fn from(value: i32) -> Self {
        ConfigValue::Int(i64::from(value))
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        ConfigValue::String(value.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        ConfigValue::String(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors_match_variant() {
        assert_eq!(ConfigValue::Bool(true).as_bool(), Some(true));
        assert_eq!(ConfigValue::Bool(true).as_int(), None);
        assert_eq!(ConfigValue::Int(7).as_int(), Some(7));
        assert_eq!(ConfigValue::from("x").as_str(), Some("x"));
        assert_eq!(ConfigValue::from("x").as_bool(), None);
    }

    #[test]
    fn test_untagged_yaml_keeps_quoted_strings() {
        let value: ConfigValue = serde_yaml_ng::from_str("\"true\"").unwrap();
        assert_eq!(value, ConfigValue::String("true".to_string()));

        let value: ConfigValue = serde_yaml_ng::from_str("true").unwrap();
        assert_eq!(value, ConfigValue::Bool(true));

        let value: ConfigValue = serde_yaml_ng::from_str("1024").unwrap();
        assert_eq!(value, ConfigValue::Int(1024));
    }
}
