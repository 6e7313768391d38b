//! Attribute value types.
//!
//! This module defines the runtime representation of attribute values, used
//! for generic access to a [`FactRecord`](crate::model::FactRecord) by
//! attribute (filtering, auditing, rendering).

use std::fmt;

/// Runtime representation of an attribute value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    /// Free text (branch, tag, revision)
    Text(String),

    /// Enum value in its text form (vcs, state). The zero variant renders as "".
    Enum(&'static str),

    Flag(bool),

    Count(usize),
}

impl AttrValue {
    /// Whether this is the zero value of its kind.
    pub fn is_zero(&self) -> bool {
        match self {
            AttrValue::Text(s) => s.is_empty(),
            AttrValue::Enum(s) => s.is_empty(),
            AttrValue::Flag(v) => !v,
            AttrValue::Count(n) => *n == 0,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            AttrValue::Flag(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_count(&self) -> Option<usize> {
        match self {
            AttrValue::Count(n) => Some(*n),
            _ => None,
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            AttrValue::Text(s) => serde_json::Value::from(s.as_str()),
            AttrValue::Enum(s) => serde_json::Value::from(*s),
            AttrValue::Flag(v) => serde_json::Value::from(*v),
            AttrValue::Count(n) => serde_json::Value::from(*n),
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Text(s) => f.write_str(s),
            AttrValue::Enum(s) => f.write_str(s),
            AttrValue::Flag(v) => write!(f, "{}", v),
            AttrValue::Count(n) => write!(f, "{}", n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_values() {
        assert!(AttrValue::Text(String::new()).is_zero());
        assert!(AttrValue::Enum("").is_zero());
        assert!(AttrValue::Flag(false).is_zero());
        assert!(AttrValue::Count(0).is_zero());
    }

    #[test]
    fn non_zero_values() {
        assert!(!AttrValue::Text("master".into()).is_zero());
        assert!(!AttrValue::Enum("git").is_zero());
        assert!(!AttrValue::Flag(true).is_zero());
        assert!(!AttrValue::Count(3).is_zero());
    }

    #[test]
    fn accessors() {
        assert_eq!(AttrValue::Flag(true).as_flag(), Some(true));
        assert_eq!(AttrValue::Count(2).as_flag(), None);
        assert_eq!(AttrValue::Count(2).as_count(), Some(2));
        assert_eq!(AttrValue::Enum("git").as_count(), None);
    }

    #[test]
    fn display() {
        assert_eq!(AttrValue::Text("fix/a".into()).to_string(), "fix/a");
        assert_eq!(AttrValue::Enum("rebase-i").to_string(), "rebase-i");
        assert_eq!(AttrValue::Flag(false).to_string(), "false");
        assert_eq!(AttrValue::Count(12).to_string(), "12");
    }

    #[test]
    fn json_values() {
        assert_eq!(AttrValue::Count(2).to_json(), serde_json::json!(2));
        assert_eq!(AttrValue::Flag(true).to_json(), serde_json::json!(true));
        assert_eq!(AttrValue::Text("v1".into()).to_json(), serde_json::json!("v1"));
    }
}
