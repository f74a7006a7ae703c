//! Conversion between typed values and Rust targets
//!
//! [`FromValue`] populates caller-supplied targets from argument values and
//! [`ToValue`] turns caller-supplied results into values of a declared type.
//! [`Value`] itself implements both, which is how a target accepts any value
//! unconverted.

use crate::error::{Result, TfplugError};
use crate::types::attr_type::Type;
use crate::types::dynamic::Dynamic;
use crate::types::value::Value;
use std::collections::{BTreeMap, HashMap};

/// A Rust type that can be populated from a typed value
pub trait FromValue: Sized {
    fn from_value(value: &Value) -> Result<Self>;
}

/// A Rust type that can be turned into a value of a given type
pub trait ToValue {
    fn to_value(&self, ty: &Type) -> Result<Value>;
}

fn known<'a>(value: &'a Value, target: &str) -> Result<&'a Dynamic> {
    match value.data() {
        Dynamic::Null => Err(TfplugError::UnhandledNull(target.to_string())),
        Dynamic::Unknown => Err(TfplugError::UnhandledUnknown(target.to_string())),
        data => Ok(data),
    }
}

fn mismatch(expected: &str, data: &Dynamic) -> TfplugError {
    TfplugError::TypeMismatch {
        expected: expected.to_string(),
        actual: data.type_name().to_string(),
    }
}

impl FromValue for Value {
    fn from_value(value: &Value) -> Result<Self> {
        Ok(value.clone())
    }
}

impl FromValue for Dynamic {
    fn from_value(value: &Value) -> Result<Self> {
        Ok(value.data().clone())
    }
}

impl FromValue for bool {
    fn from_value(value: &Value) -> Result<Self> {
        let data = known(value, "bool")?;
        data.as_bool().ok_or_else(|| mismatch("bool", data))
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> Result<Self> {
        let data = known(value, "String")?;
        data.as_string()
            .map(str::to_string)
            .ok_or_else(|| mismatch("string", data))
    }
}

impl FromValue for f64 {
    fn from_value(value: &Value) -> Result<Self> {
        let data = known(value, "f64")?;
        data.as_number().ok_or_else(|| mismatch("number", data))
    }
}

impl FromValue for f32 {
    fn from_value(value: &Value) -> Result<Self> {
        let n = f64::from_value(value)?;
        if n.is_finite() && n.abs() > f32::MAX as f64 {
            return Err(TfplugError::OutOfRange {
                value: n.to_string(),
                target: "f32".to_string(),
            });
        }
        Ok(n as f32)
    }
}

macro_rules! impl_from_value_integer {
    ($($target:ty),*) => {
        $(
            impl FromValue for $target {
                fn from_value(value: &Value) -> Result<Self> {
                    let n = f64::from_value(value)?;
                    // The exclusive upper bound -MIN is exact in f64, MAX is not for i64.
                    let min = <$target>::MIN as f64;
                    if n.fract() != 0.0 || n < min || n >= -min {
                        return Err(TfplugError::OutOfRange {
                            value: n.to_string(),
                            target: stringify!($target).to_string(),
                        });
                    }
                    Ok(n as $target)
                }
            }
        )*
    };
}

impl_from_value_integer!(i64, i32);

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: &Value) -> Result<Self> {
        match value.data() {
            Dynamic::Null => Ok(None),
            Dynamic::Unknown => Err(TfplugError::UnhandledUnknown("Option".to_string())),
            _ => T::from_value(value).map(Some),
        }
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    fn from_value(value: &Value) -> Result<Self> {
        let data = known(value, "Vec")?;
        if data.as_list().is_none() {
            return Err(mismatch("list", data));
        }
        value
            .elements()
            .unwrap_or_default()
            .iter()
            .map(T::from_value)
            .collect()
    }
}

impl<T: FromValue> FromValue for HashMap<String, T> {
    fn from_value(value: &Value) -> Result<Self> {
        let data = known(value, "HashMap")?;
        let entries = data.as_map().ok_or_else(|| mismatch("map", data))?;
        entries
            .keys()
            .map(|key| {
                let child = value.attribute(key).unwrap_or_else(|| Value::null(Type::Missing));
                Ok((key.clone(), T::from_value(&child)?))
            })
            .collect()
    }
}

impl<T: FromValue> FromValue for BTreeMap<String, T> {
    fn from_value(value: &Value) -> Result<Self> {
        HashMap::<String, T>::from_value(value).map(|m| m.into_iter().collect())
    }
}

impl ToValue for Value {
    fn to_value(&self, ty: &Type) -> Result<Value> {
        if self.ty() == ty {
            return Ok(self.clone());
        }
        if ty.is_dynamic() || self.ty().underlying() == ty.underlying() {
            return Value::new(ty.clone(), self.data().clone());
        }
        Err(TfplugError::TypeMismatch {
            expected: ty.to_string(),
            actual: self.ty().to_string(),
        })
    }
}

impl ToValue for Dynamic {
    fn to_value(&self, ty: &Type) -> Result<Value> {
        Value::new(ty.clone(), self.clone())
    }
}

impl ToValue for bool {
    fn to_value(&self, ty: &Type) -> Result<Value> {
        Value::new(ty.clone(), Dynamic::Bool(*self))
    }
}

impl ToValue for str {
    fn to_value(&self, ty: &Type) -> Result<Value> {
        Value::new(ty.clone(), Dynamic::String(self.to_string()))
    }
}

impl ToValue for String {
    fn to_value(&self, ty: &Type) -> Result<Value> {
        self.as_str().to_value(ty)
    }
}

macro_rules! impl_to_value_number {
    ($($source:ty),*) => {
        $(
            impl ToValue for $source {
                fn to_value(&self, ty: &Type) -> Result<Value> {
                    Value::new(ty.clone(), Dynamic::Number(*self as f64))
                }
            }
        )*
    };
}

impl_to_value_number!(f64, f32, i64, i32);

impl<T: ToValue + ?Sized> ToValue for &T {
    fn to_value(&self, ty: &Type) -> Result<Value> {
        (**self).to_value(ty)
    }
}

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(&self, ty: &Type) -> Result<Value> {
        match self {
            Some(inner) => inner.to_value(ty),
            None => Ok(Value::null(ty.clone())),
        }
    }
}

impl<T: ToValue> ToValue for [T] {
    fn to_value(&self, ty: &Type) -> Result<Value> {
        let data = self
            .iter()
            .enumerate()
            .map(|(idx, item)| Ok(item.to_value(&ty.element_type_at(idx))?.into_data()))
            .collect::<Result<Vec<_>>>()?;
        Value::new(ty.clone(), Dynamic::List(data))
    }
}

impl<T: ToValue> ToValue for Vec<T> {
    fn to_value(&self, ty: &Type) -> Result<Value> {
        self.as_slice().to_value(ty)
    }
}

fn entries_to_value<'a, T, I>(entries: I, ty: &Type) -> Result<Value>
where
    T: ToValue + 'a,
    I: Iterator<Item = (&'a String, &'a T)>,
{
    let data = entries
        .map(|(key, item)| Ok((key.clone(), item.to_value(&ty.child_type(key))?.into_data())))
        .collect::<Result<HashMap<_, _>>>()?;
    Value::new(ty.clone(), Dynamic::Map(data))
}

impl<T: ToValue> ToValue for HashMap<String, T> {
    fn to_value(&self, ty: &Type) -> Result<Value> {
        entries_to_value(self.iter(), ty)
    }
}

impl<T: ToValue> ToValue for BTreeMap<String, T> {
    fn to_value(&self, ty: &Type) -> Result<Value> {
        entries_to_value(self.iter(), ty)
    }
}
