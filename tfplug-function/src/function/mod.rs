//! Provider-defined functions
//!
//! A function declares its signature through a [`Definition`] and is run
//! with typed [`ArgumentsData`], writing its outcome into [`ResultData`] or
//! reporting a [`FuncError`].

pub mod arguments;
pub mod definition;
pub mod errors;
pub mod func_error;
pub mod implementation;
pub mod kind;
pub mod parameter;
pub mod result;
pub mod return_type;
pub mod validator;

pub use arguments::{ArgumentTarget, ArgumentsData};
pub use definition::Definition;
pub use errors::{FunctionError, FunctionErrors};
pub use func_error::FuncError;
pub use implementation::{
    DefinitionValidateRequest, DefinitionValidateResponse, ValidateParameterImplementationRequest,
    ValidateParameterImplementationResponse, ValidateReturnImplementationRequest,
    ValidateReturnImplementationResponse,
};
pub use kind::Kind;
pub use parameter::Parameter;
pub use result::ResultData;
pub use return_type::Return;
pub use validator::{
    ListLengthValidator, NumberRangeValidator, ParameterValidator, ParameterValidatorRequest,
    ParameterValidatorResponse, StringLengthValidator, StringPatternValidator,
};

use crate::context::Context;
use crate::diag::Diagnostics;
use async_trait::async_trait;

/// Name reported for a variadic parameter that was left unnamed.
pub const DEFAULT_VARIADIC_PARAMETER_NAME: &str = "varparam";

/// Function trait for provider functions
#[async_trait]
pub trait Function: Send + Sync {
    /// Get function metadata
    async fn metadata(
        &self,
        ctx: Context,
        request: FunctionMetadataRequest,
    ) -> FunctionMetadataResponse;

    /// Get function definition (parameters, return type)
    async fn definition(
        &self,
        ctx: Context,
        request: FunctionDefinitionRequest,
    ) -> FunctionDefinitionResponse;

    /// Execute the function
    async fn run(&self, ctx: Context, request: RunRequest, response: &mut RunResponse);
}

#[derive(Debug, Clone, Default)]
pub struct FunctionMetadataRequest;

#[derive(Debug, Clone, Default)]
pub struct FunctionMetadataResponse {
    pub name: String,
}

#[derive(Debug, Clone, Default)]
pub struct FunctionDefinitionRequest;

#[derive(Debug, Clone, Default)]
pub struct FunctionDefinitionResponse {
    pub definition: Definition,
    pub diagnostics: Diagnostics,
}

#[derive(Debug, Clone)]
pub struct RunRequest {
    pub arguments: ArgumentsData,
}

#[derive(Debug, Clone)]
pub struct RunResponse {
    pub result: ResultData,
    pub error: Option<FuncError>,
}

impl RunResponse {
    pub fn new(result: ResultData) -> Self {
        Self {
            result,
            error: None,
        }
    }

    /// Folds `error` into the response error.
    pub fn add_error(&mut self, error: FuncError) {
        self.error = FuncError::concat([self.error.take(), Some(error)]);
    }

    /// Folds every error in `errors` into the response error.
    pub fn add_errors(&mut self, errors: &FunctionErrors) {
        self.error = FuncError::concat([self.error.take(), errors.to_func_error()]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Type, Value};

    struct Upper;

    #[async_trait]
    impl Function for Upper {
        async fn metadata(
            &self,
            _ctx: Context,
            _request: FunctionMetadataRequest,
        ) -> FunctionMetadataResponse {
            FunctionMetadataResponse {
                name: "upper".to_string(),
            }
        }

        async fn definition(
            &self,
            _ctx: Context,
            _request: FunctionDefinitionRequest,
        ) -> FunctionDefinitionResponse {
            FunctionDefinitionResponse {
                definition: Definition::new(Return::string()).parameter(Parameter::string("input")),
                diagnostics: Diagnostics::new(),
            }
        }

        async fn run(&self, ctx: Context, request: RunRequest, response: &mut RunResponse) {
            let mut input = String::new();
            let errors = request.arguments.get_argument(&ctx, 0, &mut input);
            if errors.has_error() {
                response.add_errors(&errors);
                return;
            }
            if let Err(err) = response.result.set(&ctx, &input.to_uppercase()) {
                response.add_error(err);
            }
        }
    }

    #[test]
    fn run_through_trait_object() {
        let function: Box<dyn Function> = Box::new(Upper);
        let ctx = Context::new().with_function_name("upper");

        let definition = tokio_test::block_on(
            function.definition(ctx.clone(), FunctionDefinitionRequest),
        )
        .definition;
        let result = definition
            .return_type
            .as_ref()
            .unwrap()
            .new_result_data(&ctx)
            .unwrap();
        let mut response = RunResponse::new(result);
        let request = RunRequest {
            arguments: ArgumentsData::new(vec![Value::string("abc")]),
        };

        tokio_test::block_on(function.run(ctx, request, &mut response));

        assert_eq!(response.error, None);
        assert_eq!(response.result.value(), &Value::string("ABC"));
    }

    #[test]
    fn run_response_accumulates_errors() {
        let mut response = RunResponse::new(ResultData::new(Value::unknown(Type::String)));
        assert_eq!(response.error, None);

        response.add_errors(&FunctionErrors::new());
        assert_eq!(response.error, None);

        response.add_error(FuncError::new("first"));
        response.add_errors(&FunctionErrors::from(FunctionError::argument(1, "second")));

        assert_eq!(response.error, Some(FuncError::new_argument(1, "first\nsecond")));
    }
}
