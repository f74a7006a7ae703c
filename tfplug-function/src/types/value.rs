//! Typed values
//!
//! A [`Value`] pairs raw [`Dynamic`] data with the [`Type`] it was checked
//! against. Values are compared by type and data, so an `Int64` of `1` is
//! not equal to a `Number` of `1`.

use crate::error::{Result, TfplugError};
use crate::types::attr_type::Type;
use crate::types::dynamic::Dynamic;
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, PartialEq)]
pub struct Value {
    ty: Type,
    data: Dynamic,
}

impl Value {
    /// Builds a value after checking `data` against `ty`.
    pub fn new(ty: Type, data: Dynamic) -> Result<Self> {
        ty.check(&data)?;
        Ok(Self { ty, data })
    }

    pub fn null(ty: Type) -> Self {
        Self {
            ty,
            data: Dynamic::Null,
        }
    }

    pub fn unknown(ty: Type) -> Self {
        Self {
            ty,
            data: Dynamic::Unknown,
        }
    }

    pub fn bool(value: bool) -> Self {
        Self {
            ty: Type::Bool,
            data: Dynamic::Bool(value),
        }
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self {
            ty: Type::String,
            data: Dynamic::String(value.into()),
        }
    }

    pub fn number(value: f64) -> Self {
        Self {
            ty: Type::Number,
            data: Dynamic::Number(value),
        }
    }

    pub fn int64(value: i64) -> Self {
        Self {
            ty: Type::Int64,
            data: Dynamic::Number(value as f64),
        }
    }

    pub fn int32(value: i32) -> Self {
        Self {
            ty: Type::Int32,
            data: Dynamic::Number(value as f64),
        }
    }

    pub fn float64(value: f64) -> Self {
        Self {
            ty: Type::Float64,
            data: Dynamic::Number(value),
        }
    }

    pub fn float32(value: f32) -> Self {
        Self {
            ty: Type::Float32,
            data: Dynamic::Number(value as f64),
        }
    }

    pub fn list(element_type: Type, elements: Vec<Value>) -> Result<Self> {
        let data = collect_elements(&element_type, elements)?;
        Ok(Self {
            ty: Type::list(element_type),
            data: Dynamic::List(data),
        })
    }

    pub fn set(element_type: Type, elements: Vec<Value>) -> Result<Self> {
        let data = collect_elements(&element_type, elements)?;
        Ok(Self {
            ty: Type::set(element_type),
            data: Dynamic::List(data),
        })
    }

    pub fn map<I, K>(element_type: Type, entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        let mut data = HashMap::new();
        for (key, value) in entries {
            check_element(&element_type, &value)?;
            data.insert(key.into(), value.data);
        }
        Ok(Self {
            ty: Type::map(element_type),
            data: Dynamic::Map(data),
        })
    }

    pub fn object<I, K>(attribute_types: BTreeMap<String, Type>, attributes: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        let mut data = HashMap::new();
        for (name, value) in attributes {
            let name = name.into();
            let attr_type = attribute_types.get(&name).ok_or_else(|| {
                TfplugError::TypeMismatch {
                    expected: Type::Object(attribute_types.clone()).to_string(),
                    actual: format!("object with unexpected attribute \"{}\"", name),
                }
            })?;
            check_element(attr_type, &value)?;
            data.insert(name, value.data);
        }

        if let Some(missing) = attribute_types.keys().find(|name| !data.contains_key(*name)) {
            return Err(TfplugError::MissingAttribute(missing.clone()));
        }

        Ok(Self {
            ty: Type::Object(attribute_types),
            data: Dynamic::Map(data),
        })
    }

    /// Builds a tuple whose element types are taken from the elements.
    pub fn tuple(elements: Vec<Value>) -> Self {
        let (types, data) = elements.into_iter().map(|v| (v.ty, v.data)).unzip();
        Self {
            ty: Type::Tuple(types),
            data: Dynamic::List(data),
        }
    }

    /// Wraps any value as a dynamic value, keeping its data.
    pub fn dynamic(value: Value) -> Self {
        Self {
            ty: Type::Dynamic,
            data: value.data,
        }
    }

    pub(crate) fn retyped(self, ty: Type) -> Self {
        Self { ty, data: self.data }
    }

    pub fn ty(&self) -> &Type {
        &self.ty
    }

    pub fn data(&self) -> &Dynamic {
        &self.data
    }

    pub fn into_data(self) -> Dynamic {
        self.data
    }

    pub fn is_null(&self) -> bool {
        matches!(self.data, Dynamic::Null)
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self.data, Dynamic::Unknown)
    }

    pub fn as_bool(&self) -> Option<bool> {
        self.data.as_bool()
    }

    pub fn as_str(&self) -> Option<&str> {
        self.data.as_string()
    }

    pub fn as_f64(&self) -> Option<f64> {
        self.data.as_number()
    }

    /// Typed elements of a list, set or tuple value.
    pub fn elements(&self) -> Option<Vec<Value>> {
        let items = self.data.as_list()?;
        Some(
            items
                .iter()
                .enumerate()
                .map(|(idx, item)| Value {
                    ty: self.ty.element_type_at(idx),
                    data: item.clone(),
                })
                .collect(),
        )
    }

    /// Typed entry of a map value or attribute of an object value.
    pub fn attribute(&self, name: &str) -> Option<Value> {
        let item = self.data.as_map()?.get(name)?;
        Some(Value {
            ty: self.ty.child_type(name),
            data: item.clone(),
        })
    }
}

fn check_element(element_type: &Type, value: &Value) -> Result<()> {
    if element_type.is_dynamic() || value.ty == *element_type {
        return Ok(());
    }
    Err(TfplugError::TypeMismatch {
        expected: element_type.to_string(),
        actual: value.ty.to_string(),
    })
}

fn collect_elements(element_type: &Type, elements: Vec<Value>) -> Result<Vec<Dynamic>> {
    elements
        .into_iter()
        .map(|value| {
            check_element(element_type, &value)?;
            Ok(value.data)
        })
        .collect()
}
