//! Single error returned to the host from a function call

use crate::context::Context;
use crate::diag::{DiagnosticSeverity, Diagnostics};
use crate::function::errors::log_warning;
use std::fmt;

/// FuncError is the error surfaced to the host for a failed call. The
/// optional `function_argument` is the zero-based argument the error is
/// attributed to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FuncError {
    pub text: String,
    pub function_argument: Option<i64>,
}

impl FuncError {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            function_argument: None,
        }
    }

    pub fn new_argument(function_argument: i64, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            function_argument: Some(function_argument),
        }
    }

    /// Combines errors into one. Non-empty texts are joined with newlines
    /// and the first argument position found is kept. Returns `None` when
    /// there is neither text nor an argument position.
    pub fn concat<I>(errors: I) -> Option<FuncError>
    where
        I: IntoIterator<Item = Option<FuncError>>,
    {
        let mut text = String::new();
        let mut function_argument = None;

        for error in errors.into_iter().flatten() {
            if !text.is_empty() && !error.text.is_empty() {
                text.push('\n');
            }
            text.push_str(&error.text);

            if function_argument.is_none() {
                function_argument = error.function_argument;
            }
        }

        if text.is_empty() && function_argument.is_none() {
            return None;
        }

        Some(FuncError {
            text,
            function_argument,
        })
    }

    /// Converts error diagnostics into one error with each `summary: detail`
    /// on its own line. Warning diagnostics are logged and dropped.
    pub fn from_diagnostics(_ctx: &Context, diagnostics: &Diagnostics) -> Option<FuncError> {
        let mut errors = Vec::new();

        for diagnostic in diagnostics {
            match diagnostic.severity {
                DiagnosticSeverity::Error => errors.push(Some(FuncError::new(format!(
                    "{}: {}",
                    diagnostic.summary, diagnostic.detail
                )))),
                DiagnosticSeverity::Warning => log_warning(&diagnostic.summary, &diagnostic.detail),
                DiagnosticSeverity::Invalid => {}
            }
        }

        FuncError::concat(errors)
    }
}

impl fmt::Display for FuncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl std::error::Error for FuncError {}
