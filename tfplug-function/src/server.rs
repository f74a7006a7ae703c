//! Function server
//!
//! Registers provider-defined functions by name, serves their validated
//! definitions and runs calls in-process. Logging setup for binaries that
//! host the server lives here as well.

use crate::context::Context;
use crate::diag::{Diagnostic, Diagnostics};
use crate::function::{
    ArgumentsData, Definition, DefinitionValidateRequest, DefinitionValidateResponse, FuncError,
    Function, FunctionDefinitionRequest, FunctionMetadataRequest, RunRequest, RunResponse,
};
use crate::types::{Dynamic, Value};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Log level for the server
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Whether to enable logging
    pub enable_logging: bool,
    /// Log level
    pub log_level: LogLevel,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            enable_logging: true,
            log_level: LogLevel::Info,
        }
    }
}

impl ServerConfig {
    /// Create a new server configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Disable logging
    pub fn without_logging(mut self) -> Self {
        self.enable_logging = false;
        self
    }

    /// Set the log level
    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }
}

/// Installs a stderr fmt subscriber at the configured level. Does nothing
/// when logging is disabled or a global subscriber is already set.
pub fn init_logging(config: &ServerConfig) {
    if !config.enable_logging {
        return;
    }

    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::from(config.log_level))
        .with_writer(std::io::stderr)
        .try_init();
}

/// Outcome of a function call as returned to the host. `result` is only
/// set when the call succeeded.
#[derive(Debug, Clone, PartialEq)]
pub struct CallFunctionResponse {
    pub result: Option<Value>,
    pub error: Option<FuncError>,
}

impl CallFunctionResponse {
    fn failed(error: Option<FuncError>) -> Self {
        Self {
            result: None,
            error: Some(error.unwrap_or_default()),
        }
    }
}

pub struct FunctionServer {
    functions: HashMap<String, Arc<dyn Function>>,
    definitions: RwLock<HashMap<String, Definition>>,
}

impl FunctionServer {
    /// Registers `functions` under the names their metadata reports. Every
    /// function must report a name and names must be unique.
    pub async fn new(ctx: &Context, functions: Vec<Arc<dyn Function>>) -> Result<Self, Diagnostics> {
        let mut registered = HashMap::new();
        let mut diagnostics = Diagnostics::new();

        for function in functions {
            tracing::trace!(target: "tfplug", "Calling provider defined Function Metadata");
            let metadata = function
                .metadata(ctx.clone(), FunctionMetadataRequest)
                .await;
            tracing::trace!(
                target: "tfplug",
                tf_function_name = %metadata.name,
                "Called provider defined Function Metadata"
            );

            if metadata.name.is_empty() {
                diagnostics.push(Diagnostic::error(
                    "Function Name Missing",
                    "A function returned an empty name from its metadata. \
                     This is always an issue with the provider and should be reported to the provider developers.",
                ));
                continue;
            }

            if registered.contains_key(&metadata.name) {
                diagnostics.push(Diagnostic::error(
                    "Duplicate Function Name Defined",
                    format!(
                        "The {} function name was returned for multiple functions. \
                         Function names must be unique. \
                         This is always an issue with the provider and should be reported to the provider developers.",
                        metadata.name
                    ),
                ));
                continue;
            }

            registered.insert(metadata.name, function);
        }

        if diagnostics.has_error() {
            return Err(diagnostics);
        }

        Ok(Self {
            functions: registered,
            definitions: RwLock::new(HashMap::new()),
        })
    }

    pub fn function_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.functions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Validated definitions of every registered function. Functions whose
    /// definition fails validation are left out and their diagnostics
    /// returned alongside.
    pub async fn function_definitions(
        &self,
        ctx: &Context,
    ) -> (BTreeMap<String, Definition>, Diagnostics) {
        let mut definitions = BTreeMap::new();
        let mut diagnostics = Diagnostics::new();

        for name in self.function_names() {
            match self.function_definition(ctx, name).await {
                Ok(definition) => {
                    definitions.insert(name.to_string(), definition);
                }
                Err(diags) => diagnostics.append(diags),
            }
        }

        (definitions, diagnostics)
    }

    /// Validated definition of the named function. Valid definitions are
    /// cached for later calls.
    pub async fn function_definition(
        &self,
        ctx: &Context,
        name: &str,
    ) -> Result<Definition, Diagnostics> {
        if let Some(definition) = self.definitions.read().await.get(name) {
            return Ok(definition.clone());
        }

        let function = self.function(name)?;
        let ctx = ctx.with_function_name(name);

        tracing::trace!(target: "tfplug", tf_function_name = %name, "Calling provider defined Function Definition");
        let response = function
            .definition(ctx.clone(), FunctionDefinitionRequest)
            .await;
        tracing::trace!(target: "tfplug", tf_function_name = %name, "Called provider defined Function Definition");

        let mut diagnostics = response.diagnostics;
        if diagnostics.has_error() {
            return Err(diagnostics);
        }

        let mut validate_response = DefinitionValidateResponse::default();
        response.definition.validate_implementation(
            &ctx,
            &DefinitionValidateRequest {
                function_name: name.to_string(),
            },
            &mut validate_response,
        );
        diagnostics.append(validate_response.diagnostics);

        if diagnostics.has_error() {
            return Err(diagnostics);
        }

        for warning in diagnostics.warnings() {
            tracing::warn!(
                target: "tfplug",
                tf_function_name = %name,
                summary = %warning.summary,
                detail = %warning.detail,
                "Function definition warning"
            );
        }

        self.definitions
            .write()
            .await
            .insert(name.to_string(), response.definition.clone());

        Ok(response.definition)
    }

    /// Runs the named function with raw arguments from the host. Every
    /// failure, from an unknown name to a conversion or run error, is
    /// reported through the response error.
    pub async fn call_function(
        &self,
        ctx: &Context,
        name: &str,
        arguments: Vec<Dynamic>,
    ) -> CallFunctionResponse {
        let function = match self.function(name) {
            Ok(function) => function,
            Err(diags) => return CallFunctionResponse::failed(FuncError::from_diagnostics(ctx, &diags)),
        };

        let definition = match self.function_definition(ctx, name).await {
            Ok(definition) => definition,
            Err(diags) => return CallFunctionResponse::failed(FuncError::from_diagnostics(ctx, &diags)),
        };

        let ctx = ctx.with_function_name(name);

        let arguments = match ArgumentsData::from_arguments(&ctx, &definition, arguments) {
            Ok(arguments) => arguments,
            Err(error) => return CallFunctionResponse::failed(Some(error)),
        };

        // Validated definitions always declare a return.
        let Some(return_type) = &definition.return_type else {
            return CallFunctionResponse::failed(Some(FuncError::new(format!(
                "Function \"{}\" - Definition Return field is undefined",
                name
            ))));
        };

        let result = match return_type.new_result_data(&ctx) {
            Ok(result) => result,
            Err(diags) => return CallFunctionResponse::failed(FuncError::from_diagnostics(&ctx, &diags)),
        };

        let mut response = RunResponse::new(result);

        tracing::trace!(target: "tfplug", tf_function_name = %name, "Calling provider defined Function Run");
        function
            .run(ctx.clone(), RunRequest { arguments }, &mut response)
            .await;
        tracing::trace!(target: "tfplug", tf_function_name = %name, "Called provider defined Function Run");

        if response.error.is_some() {
            return CallFunctionResponse {
                result: None,
                error: response.error,
            };
        }

        CallFunctionResponse {
            result: Some(response.result.into_value()),
            error: None,
        }
    }

    fn function(&self, name: &str) -> Result<Arc<dyn Function>, Diagnostics> {
        self.functions.get(name).cloned().ok_or_else(|| {
            Diagnostic::error(
                "Function Not Found",
                format!("No function named \"{}\" was found in the provider.", name),
            )
            .into()
        })
    }
}

impl std::fmt::Debug for FunctionServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FunctionServer")
            .field("functions", &self.function_names())
            .finish()
    }
}
