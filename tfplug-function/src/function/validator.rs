//! Argument validators attached to parameters
//!
//! Validators run after an argument value has been converted to its
//! parameter type. A failing validator answers with a [`FuncError`]
//! attributed to the argument position.

use crate::context::Context;
use crate::function::func_error::FuncError;
use crate::types::{Dynamic, Value};

#[derive(Debug, Clone)]
pub struct ParameterValidatorRequest {
    /// Zero-based position of the argument. Variadic arguments report
    /// their own position, not the variadic parameter's.
    pub argument_position: usize,
    pub value: Value,
}

#[derive(Debug, Clone, Default)]
pub struct ParameterValidatorResponse {
    pub error: Option<FuncError>,
}

pub trait ParameterValidator: Send + Sync {
    fn validate_parameter(
        &self,
        ctx: &Context,
        request: &ParameterValidatorRequest,
        response: &mut ParameterValidatorResponse,
    );
}

fn invalid_argument(position: usize, message: String) -> Option<FuncError> {
    Some(FuncError::new_argument(
        position as i64,
        format!("Invalid argument value: {}", message),
    ))
}

pub struct StringLengthValidator {
    pub min: Option<usize>,
    pub max: Option<usize>,
}

impl ParameterValidator for StringLengthValidator {
    fn validate_parameter(
        &self,
        _ctx: &Context,
        request: &ParameterValidatorRequest,
        response: &mut ParameterValidatorResponse,
    ) {
        let Some(s) = request.value.as_str() else {
            return;
        };
        let len = s.chars().count();

        if let Some(min) = self.min {
            if len < min {
                response.error = invalid_argument(
                    request.argument_position,
                    format!("string length must be at least {}, got {}", min, len),
                );
                return;
            }
        }
        if let Some(max) = self.max {
            if len > max {
                response.error = invalid_argument(
                    request.argument_position,
                    format!("string length must be at most {}, got {}", max, len),
                );
            }
        }
    }
}

pub struct StringPatternValidator {
    pub pattern: regex::Regex,
    pub description: String,
}

impl ParameterValidator for StringPatternValidator {
    fn validate_parameter(
        &self,
        _ctx: &Context,
        request: &ParameterValidatorRequest,
        response: &mut ParameterValidatorResponse,
    ) {
        if let Some(s) = request.value.as_str() {
            if !self.pattern.is_match(s) {
                response.error = invalid_argument(
                    request.argument_position,
                    format!("value \"{}\" must match {}", s, self.description),
                );
            }
        }
    }
}

pub struct NumberRangeValidator {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl ParameterValidator for NumberRangeValidator {
    fn validate_parameter(
        &self,
        _ctx: &Context,
        request: &ParameterValidatorRequest,
        response: &mut ParameterValidatorResponse,
    ) {
        let Some(n) = request.value.as_f64() else {
            return;
        };

        if let Some(min) = self.min {
            if n < min {
                response.error = invalid_argument(
                    request.argument_position,
                    format!("must be at least {}, got {}", min, n),
                );
                return;
            }
        }
        if let Some(max) = self.max {
            if n > max {
                response.error = invalid_argument(
                    request.argument_position,
                    format!("must be at most {}, got {}", max, n),
                );
            }
        }
    }
}

pub struct ListLengthValidator {
    pub min: Option<usize>,
    pub max: Option<usize>,
}

impl ParameterValidator for ListLengthValidator {
    fn validate_parameter(
        &self,
        _ctx: &Context,
        request: &ParameterValidatorRequest,
        response: &mut ParameterValidatorResponse,
    ) {
        let Dynamic::List(items) = request.value.data() else {
            return;
        };

        if let Some(min) = self.min {
            if items.len() < min {
                response.error = invalid_argument(
                    request.argument_position,
                    format!("must have at least {} items, got {}", min, items.len()),
                );
                return;
            }
        }
        if let Some(max) = self.max {
            if items.len() > max {
                response.error = invalid_argument(
                    request.argument_position,
                    format!("must have at most {} items, got {}", max, items.len()),
                );
            }
        }
    }
}
