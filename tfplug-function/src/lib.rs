//! tfplug-function - provider-defined functions for tfplug
//!
//! Function definitions with parameter and return kinds, implementation
//! validation of those definitions, argument and result marshalling
//! between host values and Rust targets, and the function error model.

// Core modules
pub mod context;
pub mod diag;
pub mod error;
pub mod types;

// Function API
pub mod function;

// In-process function server
pub mod server;

// Re-exports for convenience
pub use context::Context;
pub use diag::{Diagnostic, DiagnosticSeverity, Diagnostics};
pub use error::{Result, TfplugError};
pub use function::{
    ArgumentsData, Definition, FuncError, Function, FunctionError, FunctionErrors, Kind,
    Parameter, ResultData, Return, DEFAULT_VARIADIC_PARAMETER_NAME,
};
pub use server::{init_logging, CallFunctionResponse, FunctionServer, LogLevel, ServerConfig};
pub use types::{CustomType, CustomTypeRef, Dynamic, FromValue, ToValue, Type, Value};
