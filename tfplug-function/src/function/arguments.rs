//! Function argument data
//!
//! Arguments arrive from the host as raw [`Dynamic`] data. They are
//! converted against the definition into typed values, with any variadic
//! arguments packed into a single trailing value, and then read back into
//! Rust targets by the function implementation.

use crate::context::Context;
use crate::error::TfplugError;
use crate::function::definition::Definition;
use crate::function::errors::{FunctionError, FunctionErrors};
use crate::function::func_error::FuncError;
use crate::function::parameter::Parameter;
use crate::function::validator::{ParameterValidatorRequest, ParameterValidatorResponse};
use crate::types::{Dynamic, FromValue, Value};

/// A Rust value that an argument can be read into.
pub trait ArgumentTarget {
    fn populate(&mut self, value: &Value) -> crate::Result<()>;
}

impl<T: FromValue> ArgumentTarget for T {
    fn populate(&mut self, value: &Value) -> crate::Result<()> {
        *self = T::from_value(value)?;
        Ok(())
    }
}

/// Ordered argument values of a call, one per positional parameter plus one
/// for the variadic parameter when the definition has one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArgumentsData {
    values: Vec<Value>,
}

impl ArgumentsData {
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Reads every argument into `targets`, in order. The number of targets
    /// must equal the number of arguments. Targets whose conversion fails
    /// are left unchanged.
    pub fn get(&self, _ctx: &Context, targets: &mut [&mut dyn ArgumentTarget]) -> FunctionErrors {
        let mut errors = FunctionErrors::new();

        if self.values.is_empty() {
            errors.add_error(usage_error("Function does not have argument data."));
            return errors;
        }

        if targets.len() != self.values.len() {
            errors.add_error(format!(
                "Invalid Argument Data Usage: When attempting to fetch argument data during the function call, \
                 the provider code incorrectly attempted to read argument data. \
                 The Get call requires all parameters and the final variadic parameter, if implemented, to be in the targets. \
                 This is always an error in the provider code and should be reported to the provider developers.\n\n\
                 Given targets count: {}, expected targets count: {}",
                targets.len(),
                self.values.len()
            ));
            return errors;
        }

        for (position, (value, target)) in self.values.iter().zip(targets.iter_mut()).enumerate() {
            if let Err(err) = target.populate(value) {
                errors.append([conversion_error(position, &err)]);
            }
        }

        errors
    }

    /// Reads the argument at `position` into `target`.
    pub fn get_argument(
        &self,
        _ctx: &Context,
        position: usize,
        target: &mut dyn ArgumentTarget,
    ) -> FunctionErrors {
        let mut errors = FunctionErrors::new();

        if self.values.is_empty() {
            errors.add_error(usage_error("Function does not have argument data."));
            return errors;
        }

        let Some(value) = self.values.get(position) else {
            errors.add_error(format!(
                "Invalid Argument Data Position: When attempting to fetch argument data during the function call, \
                 the provider code attempted to read a non-existent argument position. \
                 Function argument positions are 0-based and any final variadic parameter is represented as one argument position \
                 with an ordered list of the parameter data type. \
                 This is always an error in the provider code and should be reported to the provider developers.\n\n\
                 Given argument position: {}, last argument position: {}",
                position,
                self.values.len() - 1
            ));
            return errors;
        };

        if let Err(err) = target.populate(value) {
            errors.append([conversion_error(position, &err)]);
        }

        errors
    }

    /// Builds argument data from the raw arguments sent by the host.
    ///
    /// Each argument is converted to its parameter type, run through the
    /// custom type's validation and then the parameter's validators.
    /// Arguments beyond the positional parameters are packed into a list of
    /// the variadic parameter type, or a tuple when that type is dynamic.
    pub fn from_arguments(
        ctx: &Context,
        definition: &Definition,
        arguments: Vec<Dynamic>,
    ) -> Result<ArgumentsData, FuncError> {
        let positional = definition.parameters.len();

        match &definition.variadic_parameter {
            None if arguments.len() != positional => {
                return Err(unexpected_arguments(format!(
                    "Expected function arguments: {}\nGiven function arguments: {}",
                    positional,
                    arguments.len()
                )));
            }
            Some(_) if arguments.len() < positional => {
                return Err(unexpected_arguments(format!(
                    "Expected minimum function arguments: {}\nGiven function arguments: {}",
                    positional,
                    arguments.len()
                )));
            }
            _ => {}
        }

        let mut values = Vec::with_capacity(positional + 1);
        let mut variadic_values = Vec::new();
        let mut errors = Vec::new();

        for (position, data) in arguments.into_iter().enumerate() {
            let parameter = definition
                .parameter_at(ctx, position)
                .map_err(|diags| {
                    FuncError::from_diagnostics(ctx, &diags)
                        .unwrap_or_else(|| FuncError::new_argument(position as i64, ""))
                })?;

            let value = match convert_argument(ctx, parameter, position, data) {
                Ok(value) => value,
                Err(err) => {
                    errors.push(Some(err));
                    continue;
                }
            };

            for validator in parameter.get_validators() {
                let request = ParameterValidatorRequest {
                    argument_position: position,
                    value: value.clone(),
                };
                let mut response = ParameterValidatorResponse::default();
                tracing::trace!(
                    target: "tfplug",
                    tf_function_name = ctx.function_name().unwrap_or_default(),
                    argument_position = position,
                    "Calling provider defined parameter validator"
                );
                validator.validate_parameter(ctx, &request, &mut response);
                errors.push(response.error);
            }

            if position < positional {
                values.push(value);
            } else {
                variadic_values.push(value);
            }
        }

        if let Some(error) = FuncError::concat(errors) {
            return Err(error);
        }

        if let Some(variadic) = &definition.variadic_parameter {
            let ty = variadic.get_type();
            let packed = if ty.is_dynamic() {
                Value::tuple(variadic_values)
            } else {
                Value::list(ty, variadic_values).map_err(|err| {
                    FuncError::new(format!(
                        "Unable to Convert Function Argument: An unexpected error was encountered when \
                         packing the variadic function arguments.\n\nError: {}",
                        err
                    ))
                })?
            };
            values.push(packed);
        }

        tracing::trace!(
            target: "tfplug",
            tf_function_name = ctx.function_name().unwrap_or_default(),
            arguments = values.len(),
            "Converted function arguments"
        );

        Ok(ArgumentsData::new(values))
    }
}

fn convert_argument(
    ctx: &Context,
    parameter: &Parameter,
    position: usize,
    data: Dynamic,
) -> Result<Value, FuncError> {
    let argument_error = |detail: String| {
        FuncError::new_argument(
            position as i64,
            format!(
                "Unable to Convert Function Argument: An unexpected error was encountered when converting \
                 the function argument from the protocol type. \
                 This is always an issue in tfplug used to implement the provider and should be reported to the provider developers.\n\n\
                 Please report this to the provider developer:\n\n{}",
                detail
            ),
        )
    };

    let Some(custom) = &parameter.custom_type else {
        return Value::new(parameter.get_type(), data).map_err(|err| {
            argument_error(format!("Unable to convert value at position {}: {}", position, err))
        });
    };

    let base = Value::new(custom.underlying_type(), data).map_err(|err| {
        argument_error(format!("Unable to convert value at position {}: {}", position, err))
    })?;

    let value = custom.value_from_base(ctx, base).map_err(|diags| {
        let text = FuncError::from_diagnostics(ctx, &diags)
            .map(|e| e.text)
            .unwrap_or_default();
        FuncError::new_argument(position as i64, text)
    })?;

    let diags = custom.validate(ctx, &value);
    if diags.has_error() {
        let text = FuncError::from_diagnostics(ctx, &diags)
            .map(|e| e.text)
            .unwrap_or_default();
        return Err(FuncError::new_argument(position as i64, text));
    }

    Ok(value)
}

fn usage_error(detail: &str) -> String {
    format!(
        "Invalid Argument Data Usage: When attempting to fetch argument data during the function call, \
         the provider code incorrectly attempted to read argument data. \
         This is always an issue in the provider code and should be reported to the provider developers.\n\n{}",
        detail
    )
}

fn conversion_error(position: usize, err: &TfplugError) -> FunctionError {
    FunctionError::argument(
        position,
        format!(
            "Argument Value Conversion Error: An unexpected error was encountered converting the argument value to its target. \
             This is always an error in the provider code and should be reported to the provider developers.\n\n\
             Position: {}\nError: {}",
            position, err
        ),
    )
}

fn unexpected_arguments(detail: String) -> FuncError {
    FuncError::new(format!(
        "Unexpected Function Arguments Data: The provider received an unexpected number of function arguments \
         from Terraform for the given function definition. \
         This is always an issue in tfplug or Terraform itself and should be reported to the provider developers.\n\n{}",
        detail
    ))
}
