//! Function error values and the deduplicating error accumulator

use crate::context::Context;
use crate::diag::{DiagnosticSeverity, Diagnostics};
use crate::function::func_error::FuncError;
use std::fmt;

/// A single function error. An argument error additionally names the
/// zero-based argument position it concerns, so the host can attach it to
/// that argument. Errors are equal only when both the variant and its
/// contents match: a general error never equals an argument error, even
/// with identical text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FunctionError {
    General(String),
    Argument { position: usize, message: String },
}

impl FunctionError {
    pub fn new(message: impl Into<String>) -> Self {
        FunctionError::General(message.into())
    }

    pub fn argument(position: usize, message: impl Into<String>) -> Self {
        FunctionError::Argument {
            position,
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            FunctionError::General(message) => message,
            FunctionError::Argument { message, .. } => message,
        }
    }

    pub fn position(&self) -> Option<usize> {
        match self {
            FunctionError::General(_) => None,
            FunctionError::Argument { position, .. } => Some(*position),
        }
    }
}

impl fmt::Display for FunctionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for FunctionError {}

/// Ordered collection of function errors. Adding an error that is already
/// present leaves the collection unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FunctionErrors(Vec<FunctionError>);

impl FunctionErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_error(&mut self, message: impl Into<String>) {
        self.append([FunctionError::new(message)]);
    }

    pub fn add_argument_error(&mut self, position: usize, message: impl Into<String>) {
        self.append([FunctionError::argument(position, message)]);
    }

    /// Appends every present error from `errors`, skipping `None` entries
    /// and errors already in the collection.
    pub fn append<I>(&mut self, errors: I)
    where
        I: IntoIterator,
        I::Item: Into<Option<FunctionError>>,
    {
        for error in errors.into_iter().filter_map(|e| -> Option<FunctionError> { e.into() }) {
            if !self.contains(&error) {
                self.0.push(error);
            }
        }
    }

    pub fn contains(&self, error: &FunctionError) -> bool {
        self.0.iter().any(|e| e == error)
    }

    pub fn has_error(&self) -> bool {
        !self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FunctionError> {
        self.0.iter()
    }

    /// Collects the error diagnostics as general errors, in order, with
    /// summary and detail joined by `": "`. Warning diagnostics are not
    /// returned; each is logged as a warning record instead.
    pub fn from_diagnostics(_ctx: &Context, diagnostics: &Diagnostics) -> Self {
        let mut errors = FunctionErrors::new();

        for diagnostic in diagnostics {
            match diagnostic.severity {
                DiagnosticSeverity::Error => {
                    errors.add_error(format!("{}: {}", diagnostic.summary, diagnostic.detail));
                }
                DiagnosticSeverity::Warning => {
                    log_warning(&diagnostic.summary, &diagnostic.detail);
                }
                DiagnosticSeverity::Invalid => {}
            }
        }

        errors
    }

    /// Folds the collection into the single error reported to the host.
    pub fn to_func_error(&self) -> Option<FuncError> {
        FuncError::concat(self.0.iter().map(|error| {
            Some(match error {
                FunctionError::General(message) => FuncError::new(message.clone()),
                FunctionError::Argument { position, message } => {
                    FuncError::new_argument(*position as i64, message.clone())
                }
            })
        }))
    }
}

pub(crate) fn log_warning(summary: &str, detail: &str) {
    tracing::warn!(
        target: "provider",
        summary = %summary,
        detail = %detail,
        "warning: call function"
    );
}

impl fmt::Display for FunctionErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for error in &self.0 {
            writeln!(f, "{}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for FunctionErrors {}

impl From<Vec<FunctionError>> for FunctionErrors {
    fn from(errors: Vec<FunctionError>) -> Self {
        let mut collected = FunctionErrors::new();
        collected.append(errors);
        collected
    }
}

impl From<FunctionError> for FunctionErrors {
    fn from(error: FunctionError) -> Self {
        Self(vec![error])
    }
}

impl IntoIterator for FunctionErrors {
    type Item = FunctionError;
    type IntoIter = std::vec::IntoIter<FunctionError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a FunctionErrors {
    type Item = &'a FunctionError;
    type IntoIter = std::slice::Iter<'a, FunctionError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_respects_specificity() {
        let general = FunctionError::new("s: d");
        let argument = FunctionError::argument(0, "s: d");

        assert_eq!(general, general.clone());
        assert_eq!(argument, FunctionError::argument(0, "s: d"));
        assert_ne!(general, argument);
        assert_ne!(argument, FunctionError::argument(1, "s: d"));
        assert_ne!(general, FunctionError::new("s: other"));
    }

    #[test]
    fn add_argument_error_to_empty() {
        let mut errs = FunctionErrors::new();
        errs.add_argument_error(0, "s: d");

        assert_eq!(errs, FunctionErrors::from(FunctionError::argument(0, "s: d")));
    }

    #[test]
    fn add_error_is_idempotent() {
        let mut errs = FunctionErrors::from(vec![
            FunctionError::new("one summary: one detail"),
            FunctionError::new("two summary: two detail"),
        ]);
        let before = errs.clone();

        errs.add_error("one summary: one detail");
        assert_eq!(errs, before);

        errs.add_error("three summary: three detail");
        assert_eq!(errs.len(), 3);
    }

    #[test]
    fn append_keeps_both_specificities() {
        let mut errs = FunctionErrors::from(FunctionError::argument(0, "one summary: one detail"));
        errs.append(vec![
            FunctionError::new("one summary: one detail"),
            FunctionError::argument(0, "one summary: one detail"),
        ]);

        assert_eq!(
            errs,
            FunctionErrors::from(vec![
                FunctionError::argument(0, "one summary: one detail"),
                FunctionError::new("one summary: one detail"),
            ])
        );
    }

    #[test]
    fn append_skips_absent_entries() {
        let mut errs = FunctionErrors::from(FunctionError::new("one summary: one detail"));
        let before = errs.clone();

        errs.append(vec![None::<FunctionError>, None]);
        errs.append(Vec::<FunctionError>::new());
        assert_eq!(errs, before);

        let mut empty = FunctionErrors::new();
        empty.append(before.clone());
        assert_eq!(empty, before);
    }

    #[test]
    fn contains_matches_structurally() {
        let errs = FunctionErrors::from(FunctionError::argument(0, "one summary: one detail"));

        assert!(errs.contains(&FunctionError::argument(0, "one summary: one detail")));
        assert!(!errs.contains(&FunctionError::argument(1, "one summary: one detail")));
        assert!(!errs.contains(&FunctionError::new("one summary: one detail")));
        assert!(!FunctionErrors::new().contains(&FunctionError::new("one summary: one detail")));
    }

    #[test]
    fn display_one_line_per_error() {
        assert_eq!(FunctionErrors::new().to_string(), "");
        assert!(!FunctionErrors::new().has_error());

        let errs = FunctionErrors::from(vec![
            FunctionError::argument(0, "one summary: one detail"),
            FunctionError::new("two summary: two detail"),
        ]);
        assert_eq!(
            errs.to_string(),
            "one summary: one detail\ntwo summary: two detail\n"
        );
        assert!(errs.has_error());
    }

    #[test]
    fn to_func_error_keeps_first_argument() {
        let errs = FunctionErrors::from(vec![
            FunctionError::new("one"),
            FunctionError::argument(2, "two"),
            FunctionError::argument(0, "three"),
        ]);

        assert_eq!(
            errs.to_func_error(),
            Some(FuncError::new_argument(2, "one\ntwo\nthree"))
        );
        assert_eq!(FunctionErrors::new().to_func_error(), None);
    }
}
