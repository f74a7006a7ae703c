//! Data kinds a parameter or return can declare

use crate::types::{CustomTypeRef, Type};
use std::collections::BTreeMap;

/// Kind is the declared data kind of a parameter or return. Collection
/// kinds carry their element type, which stays `None` until declared.
#[derive(Debug, Clone, PartialEq)]
pub enum Kind {
    Bool,
    String,
    Number,
    Int32,
    Int64,
    Float32,
    Float64,
    List { element_type: Option<Type> },
    Set { element_type: Option<Type> },
    Map { element_type: Option<Type> },
    Object { attribute_types: BTreeMap<String, Type> },
    Dynamic,
}

impl Kind {
    /// The type a value of this kind has when no custom type is set.
    pub fn default_type(&self) -> Type {
        let element = |t: &Option<Type>| Box::new(t.clone().unwrap_or(Type::Missing));

        match self {
            Kind::Bool => Type::Bool,
            Kind::String => Type::String,
            Kind::Number => Type::Number,
            Kind::Int32 => Type::Int32,
            Kind::Int64 => Type::Int64,
            Kind::Float32 => Type::Float32,
            Kind::Float64 => Type::Float64,
            Kind::List { element_type } => Type::List(element(element_type)),
            Kind::Set { element_type } => Type::Set(element(element_type)),
            Kind::Map { element_type } => Type::Map(element(element_type)),
            Kind::Object { attribute_types } => Type::Object(attribute_types.clone()),
            Kind::Dynamic => Type::Dynamic,
        }
    }

    /// Resolves the effective type: the custom type if set, otherwise the
    /// kind's default type.
    pub fn resolve_type(&self, custom_type: Option<&CustomTypeRef>) -> Type {
        match custom_type {
            Some(custom) => Type::Custom(custom.clone()),
            None => self.default_type(),
        }
    }
}
