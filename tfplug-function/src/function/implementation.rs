//! Implementation checks run against function definitions
//!
//! These catch provider developer mistakes, such as unnamed parameters or
//! collection types holding dynamic values, before any call is served.

use crate::diag::{Diagnostic, Diagnostics};

pub(crate) const INVALID_DEFINITION_SUMMARY: &str = "Invalid Function Definition";

const IMPLEMENTATION_ISSUE: &str = "When validating the function definition, an implementation issue was found. \
This is always an issue with the provider and should be reported to the provider developers.";

const DYNAMIC_IN_COLLECTION: &str =
    "Dynamic types inside of collections are not currently supported in tfplug.";

const MISSING_TYPE: &str =
    "Collection element and object attribute types are always required in Terraform.";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DefinitionValidateRequest {
    pub function_name: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DefinitionValidateResponse {
    pub diagnostics: Diagnostics,
}

/// Request to check one parameter. `parameter_position` is `None` for the
/// variadic parameter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidateParameterImplementationRequest {
    pub function_name: String,
    pub parameter_position: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidateParameterImplementationResponse {
    pub diagnostics: Diagnostics,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidateReturnImplementationRequest {
    pub function_name: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidateReturnImplementationResponse {
    pub diagnostics: Diagnostics,
}

pub(crate) fn invalid_definition(detail: String) -> Diagnostic {
    Diagnostic::error(
        INVALID_DEFINITION_SUMMARY,
        format!("{}\n\n{}", IMPLEMENTATION_ISSUE, detail),
    )
}

pub(crate) fn parameter_missing_name(function_name: &str, position: usize) -> Diagnostic {
    invalid_definition(format!(
        "Function \"{}\" - Parameter at position {} does not have a name",
        function_name, position
    ))
}

pub(crate) fn parameter_missing_type(name: &str, position: Option<usize>) -> Diagnostic {
    let subject = match position {
        Some(position) => format!("Parameter \"{}\" at position {}", name, position),
        None => format!("Variadic parameter \"{}\"", name),
    };
    invalid_definition(format!("{} is missing underlying type.\n\n{}", subject, MISSING_TYPE))
}

pub(crate) fn parameter_collection_with_dynamic(name: &str, position: Option<usize>) -> Diagnostic {
    let (subject, replace) = match position {
        Some(position) => (
            format!("Parameter \"{}\" at position {}", name, position),
            format!("the \"{}\" parameter definition", name),
        ),
        None => (
            format!("Variadic parameter \"{}\"", name),
            "the variadic parameter definition".to_string(),
        ),
    };
    invalid_definition(format!(
        "{} contains a collection type with a nested dynamic type.\n\n{} \
         If underlying dynamic values are required, replace {} with a dynamic parameter instead.",
        subject, DYNAMIC_IN_COLLECTION, replace
    ))
}

pub(crate) fn return_missing_type() -> Diagnostic {
    invalid_definition(format!("Return is missing underlying type.\n\n{}", MISSING_TYPE))
}

pub(crate) fn return_collection_with_dynamic() -> Diagnostic {
    invalid_definition(format!(
        "Return contains a collection type with a nested dynamic type.\n\n{} \
         If underlying dynamic values are required, replace the return definition with a dynamic return instead.",
        DYNAMIC_IN_COLLECTION
    ))
}

pub(crate) fn return_undefined(function_name: &str) -> Diagnostic {
    invalid_definition(format!(
        "Function \"{}\" - Definition Return field is undefined",
        function_name
    ))
}

pub(crate) fn duplicate_parameter_name(
    function_name: &str,
    first: usize,
    second: Option<usize>,
    name: &str,
) -> Diagnostic {
    let clash = match second {
        Some(second) => format!("Parameters at position {} and {}", first, second),
        None => format!("Parameter at position {} and the variadic parameter", first),
    };
    invalid_definition(format!(
        "Parameter names must be unique. Function \"{}\" - {} have the same name \"{}\"",
        function_name, clash, name
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parameter_messages() {
        let diag = parameter_missing_name("testfunc", 0);
        assert_eq!(diag.summary, "Invalid Function Definition");
        assert!(diag
            .detail
            .ends_with("Function \"testfunc\" - Parameter at position 0 does not have a name"));

        let diag = parameter_collection_with_dynamic("p", Some(0));
        assert!(diag.detail.contains(
            "Parameter \"p\" at position 0 contains a collection type with a nested dynamic type."
        ));
        assert!(diag.detail.contains("replace the \"p\" parameter definition"));

        let diag = parameter_collection_with_dynamic("p", None);
        assert!(diag.detail.contains("Variadic parameter \"p\" contains"));
        assert!(diag.detail.contains("replace the variadic parameter definition"));
    }

    #[test]
    fn duplicate_messages() {
        let diag = duplicate_parameter_name("f", 0, Some(2), "n");
        assert!(diag.detail.ends_with(
            "Parameter names must be unique. Function \"f\" - Parameters at position 0 and 2 have the same name \"n\""
        ));

        let diag = duplicate_parameter_name("f", 1, None, "n");
        assert!(diag.detail.ends_with(
            "Function \"f\" - Parameter at position 1 and the variadic parameter have the same name \"n\""
        ));
    }
}
