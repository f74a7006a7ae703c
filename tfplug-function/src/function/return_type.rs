//! Function return definitions

use crate::context::Context;
use crate::diag::Diagnostics;
use crate::function::implementation::{
    return_collection_with_dynamic, return_missing_type, ValidateReturnImplementationRequest,
    ValidateReturnImplementationResponse,
};
use crate::function::kind::Kind;
use crate::function::result::ResultData;
use crate::types::{CustomTypeRef, Type, Value};
use std::collections::BTreeMap;

/// The declared return of a function.
#[derive(Debug, Clone, PartialEq)]
pub struct Return {
    pub kind: Kind,
    pub custom_type: Option<CustomTypeRef>,
}

impl Return {
    pub fn new(kind: Kind) -> Self {
        Self {
            kind,
            custom_type: None,
        }
    }

    pub fn bool() -> Self {
        Self::new(Kind::Bool)
    }

    pub fn string() -> Self {
        Self::new(Kind::String)
    }

    pub fn number() -> Self {
        Self::new(Kind::Number)
    }

    pub fn int32() -> Self {
        Self::new(Kind::Int32)
    }

    pub fn int64() -> Self {
        Self::new(Kind::Int64)
    }

    pub fn float32() -> Self {
        Self::new(Kind::Float32)
    }

    pub fn float64() -> Self {
        Self::new(Kind::Float64)
    }

    pub fn list(element_type: Type) -> Self {
        Self::new(Kind::List {
            element_type: Some(element_type),
        })
    }

    pub fn set(element_type: Type) -> Self {
        Self::new(Kind::Set {
            element_type: Some(element_type),
        })
    }

    pub fn map(element_type: Type) -> Self {
        Self::new(Kind::Map {
            element_type: Some(element_type),
        })
    }

    pub fn object<I, K>(attribute_types: I) -> Self
    where
        I: IntoIterator<Item = (K, Type)>,
        K: Into<String>,
    {
        Self::new(Kind::Object {
            attribute_types: attribute_types
                .into_iter()
                .map(|(k, t)| (k.into(), t))
                .collect::<BTreeMap<_, _>>(),
        })
    }

    pub fn dynamic() -> Self {
        Self::new(Kind::Dynamic)
    }

    pub fn custom_type(mut self, custom_type: CustomTypeRef) -> Self {
        self.custom_type = Some(custom_type);
        self
    }

    pub fn get_type(&self) -> Type {
        self.kind.resolve_type(self.custom_type.as_ref())
    }

    /// Creates result data holding an unknown value of the return type.
    /// Custom return types build it through their `value_from`.
    pub fn new_result_data(&self, ctx: &Context) -> Result<ResultData, Diagnostics> {
        match &self.custom_type {
            Some(custom) => {
                let base = Value::unknown(custom.underlying_type());
                custom.value_from_base(ctx, base).map(ResultData::new)
            }
            None => Ok(ResultData::new(Value::unknown(self.kind.default_type()))),
        }
    }

    /// Checks that every nested type is declared and that no list, set or
    /// map holds a dynamic type.
    pub fn validate_implementation(
        &self,
        _ctx: &Context,
        _request: &ValidateReturnImplementationRequest,
        response: &mut ValidateReturnImplementationResponse,
    ) {
        let ty = self.get_type();

        if ty.contains_missing_underlying_type() {
            response.diagnostics.push(return_missing_type());
        }

        if ty.contains_collection_with_dynamic() {
            response.diagnostics.push(return_collection_with_dynamic());
        }
    }
}
