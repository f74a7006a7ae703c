//! Function definitions

use crate::context::Context;
use crate::diag::{Diagnostic, Diagnostics};
use crate::function::implementation::{
    duplicate_parameter_name, return_undefined, DefinitionValidateRequest,
    DefinitionValidateResponse, ValidateParameterImplementationRequest,
    ValidateParameterImplementationResponse, ValidateReturnImplementationRequest,
    ValidateReturnImplementationResponse,
};
use crate::function::parameter::Parameter;
use crate::function::return_type::Return;
use crate::function::DEFAULT_VARIADIC_PARAMETER_NAME;
use std::collections::HashMap;

const INVALID_POSITION_SUMMARY: &str = "Invalid Parameter Position for Definition";

/// Signature and documentation of a function.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Definition {
    pub parameters: Vec<Parameter>,
    pub variadic_parameter: Option<Parameter>,
    pub return_type: Option<Return>,
    pub summary: String,
    pub description: String,
    pub markdown_description: String,
    pub deprecation_message: String,
}

impl Definition {
    pub fn new(return_type: Return) -> Self {
        Self {
            return_type: Some(return_type),
            ..Default::default()
        }
    }

    pub fn parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn variadic_parameter(mut self, parameter: Parameter) -> Self {
        self.variadic_parameter = Some(parameter);
        self
    }

    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn markdown_description(mut self, markdown_description: impl Into<String>) -> Self {
        self.markdown_description = markdown_description.into();
        self
    }

    pub fn deprecation_message(mut self, deprecation_message: impl Into<String>) -> Self {
        self.deprecation_message = deprecation_message.into();
        self
    }

    /// Parameter that receives the argument at `position`. Positions past
    /// the positional parameters go to the variadic parameter.
    pub fn parameter_at(&self, _ctx: &Context, position: usize) -> Result<&Parameter, Diagnostics> {
        if let Some(parameter) = self.parameters.get(position) {
            return Ok(parameter);
        }

        if let Some(variadic) = &self.variadic_parameter {
            return Ok(variadic);
        }

        let detail = if self.parameters.is_empty() {
            format!("Function does not implement parameters.\nGiven position: {}", position)
        } else {
            format!(
                "Max argument position: {}\nGiven position: {}",
                self.parameters.len() - 1,
                position
            )
        };

        Err(Diagnostic::error(
            INVALID_POSITION_SUMMARY,
            format!(
                "When determining the parameter for the given argument position, an invalid value was given. \
                 This is always an issue in the provider code and should be reported to the provider developers.\n\n{}",
                detail
            ),
        )
        .into())
    }

    /// Checks the whole definition: a return must be declared, every
    /// parameter and the return must pass their own checks, and parameter
    /// names must be unique including the variadic parameter.
    pub fn validate_implementation(
        &self,
        ctx: &Context,
        request: &DefinitionValidateRequest,
        response: &mut DefinitionValidateResponse,
    ) {
        let function_name = &request.function_name;

        match &self.return_type {
            None => response.diagnostics.push(return_undefined(function_name)),
            Some(return_type) => {
                let mut return_response = ValidateReturnImplementationResponse::default();
                return_type.validate_implementation(
                    ctx,
                    &ValidateReturnImplementationRequest {
                        function_name: function_name.clone(),
                    },
                    &mut return_response,
                );
                response.diagnostics.append(return_response.diagnostics);
            }
        }

        let mut seen: HashMap<&str, usize> = HashMap::new();

        for (position, parameter) in self.parameters.iter().enumerate() {
            let mut parameter_response = ValidateParameterImplementationResponse::default();
            parameter.validate_implementation(
                ctx,
                &ValidateParameterImplementationRequest {
                    function_name: function_name.clone(),
                    parameter_position: Some(position),
                },
                &mut parameter_response,
            );
            response.diagnostics.append(parameter_response.diagnostics);

            let name = parameter.get_name();
            if name.is_empty() {
                continue;
            }
            match seen.get(name) {
                Some(first) => response.diagnostics.push(duplicate_parameter_name(
                    function_name,
                    *first,
                    Some(position),
                    name,
                )),
                None => {
                    seen.insert(name, position);
                }
            }
        }

        if let Some(variadic) = &self.variadic_parameter {
            let mut parameter_response = ValidateParameterImplementationResponse::default();
            variadic.validate_implementation(
                ctx,
                &ValidateParameterImplementationRequest {
                    function_name: function_name.clone(),
                    parameter_position: None,
                },
                &mut parameter_response,
            );
            response.diagnostics.append(parameter_response.diagnostics);

            let name = match variadic.get_name() {
                "" => DEFAULT_VARIADIC_PARAMETER_NAME,
                name => name,
            };
            if let Some(first) = seen.get(name) {
                response
                    .diagnostics
                    .push(duplicate_parameter_name(function_name, *first, None, name));
            }
        }
    }
}
