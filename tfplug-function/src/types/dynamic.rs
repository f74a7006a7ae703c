//! Untyped value payload exchanged with the host
//!
//! The host hands over function arguments as raw [`Dynamic`] values; they
//! only gain a [`Type`](crate::types::Type) once matched against a parameter
//! definition.

use std::collections::HashMap;

/// Dynamic represents raw Terraform values that can be of any type
#[derive(Debug, Clone, PartialEq)]
pub enum Dynamic {
    /// Explicit null value
    Null,
    /// Boolean value
    Bool(bool),
    /// Number value (all numbers are f64 to match Terraform)
    Number(f64),
    /// String value
    String(String),
    /// Ordered elements of a list, set or tuple
    List(Vec<Dynamic>),
    /// Entries of a map or the attributes of an object
    Map(HashMap<String, Dynamic>),
    /// Value not yet known (during planning)
    Unknown,
}

impl Dynamic {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Dynamic::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Dynamic::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<&str> {
        match self {
            Dynamic::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Dynamic]> {
        match self {
            Dynamic::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&HashMap<String, Dynamic>> {
        match self {
            Dynamic::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Dynamic::Null => "null",
            Dynamic::Bool(_) => "bool",
            Dynamic::Number(_) => "number",
            Dynamic::String(_) => "string",
            Dynamic::List(_) => "list",
            Dynamic::Map(_) => "map",
            Dynamic::Unknown => "unknown",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_match_variant() {
        let value = Dynamic::Map(HashMap::from([(
            "names".to_string(),
            Dynamic::List(vec![Dynamic::String("a".to_string())]),
        )]));

        let map = value.as_map().unwrap();
        assert_eq!(
            map.get("names").and_then(Dynamic::as_list),
            Some(&[Dynamic::String("a".to_string())][..])
        );
        assert_eq!(value.as_string(), None);
        assert_eq!(Dynamic::Number(8080.0).as_number(), Some(8080.0));
        assert_eq!(Dynamic::Unknown.type_name(), "unknown");
    }
}
