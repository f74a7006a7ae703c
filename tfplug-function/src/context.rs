//! Request-scoped context for function operations
//!
//! Every definition, validation and marshalling call takes a [`Context`] as
//! its first argument. It carries the name of the function being served and
//! is cheap to clone.

use std::sync::Arc;

/// Context carries request-scoped values such as the function name.
/// Pass it as the first parameter to every operation.
#[derive(Debug, Clone, Default)]
pub struct Context {
    inner: Arc<ContextInner>,
}

#[derive(Debug, Default)]
struct ContextInner {
    function_name: Option<String>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a child context scoped to the named function.
    pub fn with_function_name(&self, name: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(ContextInner {
                function_name: Some(name.into()),
            }),
        }
    }

    pub fn function_name(&self) -> Option<&str> {
        self.inner.function_name.as_deref()
    }
}
