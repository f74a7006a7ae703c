//! Custom type extension point
//!
//! Any parameter or return kind can delegate its type to a provider-supplied
//! [`CustomType`]. The custom type names an underlying base type, which
//! drives all structural checks, and may normalise or validate values
//! built from that base type.

use crate::context::Context;
use crate::diag::Diagnostics;
use crate::types::attr_type::Type;
use crate::types::value::Value;
use std::fmt;
use std::sync::Arc;

/// Provider-supplied override of a kind's default value representation
pub trait CustomType: fmt::Debug + Send + Sync {
    /// Type name used in messages, e.g. `"TimestampType"`
    fn name(&self) -> String;

    /// The base type values of this type are built from
    fn underlying_type(&self) -> Type;

    /// Converts a value of the underlying type into this type's value.
    fn value_from(&self, _ctx: &Context, value: Value) -> Result<Value, Diagnostics> {
        Ok(value)
    }

    /// Validates a value received from the host for a function argument.
    fn validate(&self, _ctx: &Context, _value: &Value) -> Diagnostics {
        Diagnostics::new()
    }
}

/// Shared handle to a [`CustomType`]. Two handles are equal when they
/// report the same name and underlying type.
#[derive(Clone)]
pub struct CustomTypeRef(Arc<dyn CustomType>);

impl CustomTypeRef {
    pub fn new<T: CustomType + 'static>(custom: T) -> Self {
        Self(Arc::new(custom))
    }

    pub fn name(&self) -> String {
        self.0.name()
    }

    pub fn underlying_type(&self) -> Type {
        self.0.underlying_type()
    }

    pub fn validate(&self, ctx: &Context, value: &Value) -> Diagnostics {
        self.0.validate(ctx, value)
    }

    /// Builds a value of this custom type from a value of its underlying
    /// type. The returned value always reports this custom type.
    pub fn value_from_base(&self, ctx: &Context, base: Value) -> Result<Value, Diagnostics> {
        let converted = self.0.value_from(ctx, base)?;
        Ok(converted.retyped(Type::Custom(self.clone())))
    }
}

impl PartialEq for CustomTypeRef {
    fn eq(&self, other: &Self) -> bool {
        self.name() == other.name() && self.underlying_type() == other.underlying_type()
    }
}

impl fmt::Debug for CustomTypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<Arc<dyn CustomType>> for CustomTypeRef {
    fn from(custom: Arc<dyn CustomType>) -> Self {
        Self(custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::dynamic::Dynamic;

    #[derive(Debug)]
    struct Hostname;

    impl CustomType for Hostname {
        fn name(&self) -> String {
            "HostnameType".to_string()
        }

        fn underlying_type(&self) -> Type {
            Type::String
        }

        fn value_from(&self, _ctx: &Context, value: Value) -> Result<Value, Diagnostics> {
            match value.data() {
                Dynamic::String(s) => Ok(Value::string(s.to_lowercase())),
                _ => Ok(value),
            }
        }
    }

    #[test]
    fn custom_type_equality_uses_name_and_underlying() {
        assert_eq!(CustomTypeRef::new(Hostname), CustomTypeRef::new(Hostname));
        assert_eq!(
            Type::Custom(CustomTypeRef::new(Hostname)).underlying(),
            Type::String
        );
    }

    #[test]
    fn value_from_base_retypes_result() {
        let custom = CustomTypeRef::new(Hostname);
        let value = custom
            .value_from_base(&Context::new(), Value::string("Example.COM"))
            .unwrap();

        assert_eq!(value.ty(), &Type::Custom(custom));
        assert_eq!(value.as_str(), Some("example.com"));
    }
}
