//! Abstract data kinds understood by function parameters and returns

use crate::error::{Result, TfplugError};
use crate::types::custom::CustomTypeRef;
use crate::types::dynamic::Dynamic;
use std::collections::BTreeMap;
use std::fmt;

/// Type defines the type system for function arguments and results.
/// Object attribute types use a BTreeMap so type names and checks are
/// deterministic.
#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    Bool,
    String,
    /// Arbitrary precision number, stored as f64
    Number,
    Int32,
    Int64,
    Float32,
    Float64,
    List(Box<Type>),
    Set(Box<Type>),
    Map(Box<Type>),
    Object(BTreeMap<String, Type>),
    Tuple(Vec<Type>),
    /// Any type, decided by the value at runtime
    Dynamic,
    /// Placeholder for an element or attribute type that was never declared
    Missing,
    /// Provider-supplied type layered over an underlying type
    Custom(CustomTypeRef),
}

impl Type {
    pub fn list(element_type: Type) -> Self {
        Type::List(Box::new(element_type))
    }

    pub fn set(element_type: Type) -> Self {
        Type::Set(Box::new(element_type))
    }

    pub fn map(element_type: Type) -> Self {
        Type::Map(Box::new(element_type))
    }

    pub fn object<I, K>(attribute_types: I) -> Self
    where
        I: IntoIterator<Item = (K, Type)>,
        K: Into<String>,
    {
        Type::Object(
            attribute_types
                .into_iter()
                .map(|(k, v)| (k.into(), v))
                .collect(),
        )
    }

    pub fn tuple(element_types: Vec<Type>) -> Self {
        Type::Tuple(element_types)
    }

    /// Resolves custom types down to their underlying base type.
    pub fn underlying(&self) -> Type {
        match self {
            Type::Custom(custom) => custom.underlying_type().underlying(),
            other => other.clone(),
        }
    }

    pub fn is_dynamic(&self) -> bool {
        matches!(self.underlying(), Type::Dynamic)
    }

    /// Type of the child at `index` for list, set and tuple types.
    pub fn element_type_at(&self, index: usize) -> Type {
        match self.underlying() {
            Type::List(elem) | Type::Set(elem) | Type::Map(elem) => *elem,
            Type::Tuple(elems) => elems.get(index).cloned().unwrap_or(Type::Missing),
            Type::Dynamic => Type::Dynamic,
            _ => Type::Missing,
        }
    }

    /// Type of the child under `key` for map and object types.
    pub fn child_type(&self, key: &str) -> Type {
        match self.underlying() {
            Type::Map(elem) => *elem,
            Type::Object(attrs) => attrs.get(key).cloned().unwrap_or(Type::Missing),
            Type::Dynamic => Type::Dynamic,
            _ => Type::Missing,
        }
    }

    /// True when the type, or any type nested in it, was never declared.
    /// Custom types are trusted to provide their own underlying types and
    /// objects without attributes are valid.
    pub fn contains_missing_underlying_type(&self) -> bool {
        match self {
            Type::Missing => true,
            Type::List(elem) | Type::Set(elem) | Type::Map(elem) => {
                elem.contains_missing_underlying_type()
            }
            Type::Object(attrs) => attrs.values().any(Type::contains_missing_underlying_type),
            Type::Tuple(elems) => elems.iter().any(Type::contains_missing_underlying_type),
            _ => false,
        }
    }

    /// True when a list, set or map anywhere in the type holds a dynamic
    /// type, directly or through nested objects and tuples. A dynamic type
    /// at the top level or as an object attribute is allowed.
    pub fn contains_collection_with_dynamic(&self) -> bool {
        match self.underlying() {
            Type::List(elem) | Type::Set(elem) | Type::Map(elem) => elem.contains_dynamic(),
            Type::Object(attrs) => attrs.values().any(Type::contains_collection_with_dynamic),
            Type::Tuple(elems) => elems.iter().any(Type::contains_collection_with_dynamic),
            _ => false,
        }
    }

    fn contains_dynamic(&self) -> bool {
        match self.underlying() {
            Type::Dynamic => true,
            Type::List(elem) | Type::Set(elem) | Type::Map(elem) => elem.contains_dynamic(),
            Type::Object(attrs) => attrs.values().any(Type::contains_dynamic),
            Type::Tuple(elems) => elems.iter().any(Type::contains_dynamic),
            _ => false,
        }
    }

    /// Checks that raw data conforms to this type. Null and unknown are
    /// accepted at every level.
    pub fn check(&self, data: &Dynamic) -> Result<()> {
        if matches!(data, Dynamic::Null | Dynamic::Unknown) {
            return Ok(());
        }

        let mismatch = || TfplugError::TypeMismatch {
            expected: self.to_string(),
            actual: data.type_name().to_string(),
        };

        match (self.underlying(), data) {
            (Type::Dynamic, _) => Ok(()),
            (Type::Bool, Dynamic::Bool(_)) => Ok(()),
            (Type::String, Dynamic::String(_)) => Ok(()),
            (Type::Number, Dynamic::Number(_)) | (Type::Float64, Dynamic::Number(_)) => Ok(()),
            (Type::Int64, Dynamic::Number(n)) => check_integer(*n, i64::MIN as f64, "Int64"),
            (Type::Int32, Dynamic::Number(n)) => check_integer(*n, i32::MIN as f64, "Int32"),
            (Type::Float32, Dynamic::Number(n)) => {
                if n.is_finite() && n.abs() > f32::MAX as f64 {
                    return Err(TfplugError::OutOfRange {
                        value: n.to_string(),
                        target: "Float32".to_string(),
                    });
                }
                Ok(())
            }
            (Type::List(elem), Dynamic::List(items)) | (Type::Set(elem), Dynamic::List(items)) => {
                items.iter().try_for_each(|item| elem.check(item))
            }
            (Type::Tuple(elems), Dynamic::List(items)) => {
                if elems.len() != items.len() {
                    return Err(mismatch());
                }
                elems
                    .iter()
                    .zip(items)
                    .try_for_each(|(elem, item)| elem.check(item))
            }
            (Type::Map(elem), Dynamic::Map(entries)) => {
                entries.values().try_for_each(|item| elem.check(item))
            }
            (Type::Object(attrs), Dynamic::Map(entries)) => {
                for name in entries.keys() {
                    if !attrs.contains_key(name) {
                        return Err(TfplugError::TypeMismatch {
                            expected: self.to_string(),
                            actual: format!("object with unexpected attribute \"{}\"", name),
                        });
                    }
                }
                for (name, attr_type) in &attrs {
                    match entries.get(name) {
                        Some(item) => attr_type.check(item)?,
                        None => return Err(TfplugError::MissingAttribute(name.clone())),
                    }
                }
                Ok(())
            }
            _ => Err(mismatch()),
        }
    }
}

/// Integer range check with `min` inclusive and `-min` exclusive, both of
/// which are exact in f64.
fn check_integer(n: f64, min: f64, target: &str) -> Result<()> {
    if n.fract() != 0.0 || n < min || n >= -min {
        return Err(TfplugError::OutOfRange {
            value: n.to_string(),
            target: target.to_string(),
        });
    }
    Ok(())
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Bool => write!(f, "Bool"),
            Type::String => write!(f, "String"),
            Type::Number => write!(f, "Number"),
            Type::Int32 => write!(f, "Int32"),
            Type::Int64 => write!(f, "Int64"),
            Type::Float32 => write!(f, "Float32"),
            Type::Float64 => write!(f, "Float64"),
            Type::List(elem) => write!(f, "List[{}]", elem),
            Type::Set(elem) => write!(f, "Set[{}]", elem),
            Type::Map(elem) => write!(f, "Map[{}]", elem),
            Type::Object(attrs) => {
                write!(f, "Object[")?;
                for (idx, (name, attr_type)) in attrs.iter().enumerate() {
                    if idx > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "\"{}\":{}", name, attr_type)?;
                }
                write!(f, "]")
            }
            Type::Tuple(elems) => {
                write!(f, "Tuple[")?;
                for (idx, elem) in elems.iter().enumerate() {
                    if idx > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", elem)?;
                }
                write!(f, "]")
            }
            Type::Dynamic => write!(f, "Dynamic"),
            Type::Missing => write!(f, "!!! MISSING TYPE !!!"),
            Type::Custom(custom) => write!(f, "{}", custom.name()),
        }
    }
}
