//! Function result data

use crate::context::Context;
use crate::function::func_error::FuncError;
use crate::types::{ToValue, Type, Value};

/// Holds the result value of a call. It starts out as an unknown value of
/// the return type and is replaced by [`ResultData::set`].
#[derive(Debug, Clone, PartialEq)]
pub struct ResultData {
    value: Value,
}

impl ResultData {
    pub fn new(value: Value) -> Self {
        Self { value }
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn ty(&self) -> &Type {
        self.value.ty()
    }

    pub fn into_value(self) -> Value {
        self.value
    }

    /// Converts `value` to the result type and stores it. Custom result
    /// types receive the converted base value through their `value_from`.
    /// On failure the stored value is left as it was.
    pub fn set<T>(&mut self, ctx: &Context, value: &T) -> Result<(), FuncError>
    where
        T: ToValue + ?Sized,
    {
        let converted = match self.value.ty() {
            Type::Custom(custom) => {
                let base = value
                    .to_value(&custom.underlying_type())
                    .map_err(|e| conversion_error(&e))?;
                custom.value_from_base(ctx, base).map_err(|diags| {
                    FuncError::from_diagnostics(ctx, &diags)
                        .unwrap_or_else(|| FuncError::new("Value Conversion Error"))
                })?
            }
            ty => value.to_value(ty).map_err(|e| conversion_error(&e))?,
        };

        self.value = converted;
        Ok(())
    }
}

fn conversion_error(err: &crate::error::TfplugError) -> FuncError {
    FuncError::new(format!(
        "Value Conversion Error: An unexpected error was encountered while setting the function result. \
         This is always an error in the provider code and should be reported to the provider developers.\n\n\
         Error: {}",
        err
    ))
}
