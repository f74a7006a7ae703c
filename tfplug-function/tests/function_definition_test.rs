//! Tests for function definitions: type resolution, implementation
//! validation and result data construction

#![allow(clippy::disallowed_methods)] // Allow unwrap() in tests for clarity

use tfplug_function::function::{
    DefinitionValidateRequest, DefinitionValidateResponse, ValidateParameterImplementationRequest,
    ValidateParameterImplementationResponse,
};
use tfplug_function::{
    Context, CustomType, CustomTypeRef, Definition, Diagnostics, Kind, Parameter, Return, Type,
};

#[derive(Debug)]
struct Timestamp;

impl CustomType for Timestamp {
    fn name(&self) -> String {
        "TimestampType".to_string()
    }

    fn underlying_type(&self) -> Type {
        Type::String
    }
}

fn validate_parameter(param: &Parameter, position: Option<usize>) -> Diagnostics {
    let mut response = ValidateParameterImplementationResponse::default();
    param.validate_implementation(
        &Context::new(),
        &ValidateParameterImplementationRequest {
            function_name: "test_function".to_string(),
            parameter_position: position,
        },
        &mut response,
    );
    response.diagnostics
}

fn validate_definition(definition: &Definition) -> Diagnostics {
    let mut response = DefinitionValidateResponse::default();
    definition.validate_implementation(
        &Context::new(),
        &DefinitionValidateRequest {
            function_name: "test_function".to_string(),
        },
        &mut response,
    );
    response.diagnostics
}

#[test]
fn list_parameter_type_uses_element_type() {
    let param = Parameter::list("names", Type::String);

    assert_eq!(param.get_type(), Type::list(Type::String));
}

#[test]
fn object_parameter_with_nested_dynamic_collection() {
    let param = Parameter::object("config", [("a", Type::list(Type::Dynamic))]);

    let diags = validate_parameter(&param, Some(0));

    assert_eq!(diags.len(), 1);
    let diag = diags.iter().next().unwrap();
    assert_eq!(diag.summary, "Invalid Function Definition");
    assert!(diag.detail.contains(
        "Parameter \"config\" at position 0 contains a collection type with a nested dynamic type."
    ));
    assert!(diag
        .detail
        .contains("Dynamic types inside of collections are not currently supported in tfplug."));
}

#[test]
fn unnamed_float64_parameter_names_function() {
    let diags = validate_parameter(&Parameter::float64(""), Some(0));

    assert_eq!(diags.len(), 1);
    let diag = diags.iter().next().unwrap();
    assert!(diag.is_error());
    assert!(diag
        .detail
        .ends_with("Function \"test_function\" - Parameter at position 0 does not have a name"));
}

#[test]
fn every_kind_validates_when_well_formed() {
    let params = vec![
        Parameter::bool("a"),
        Parameter::string("b"),
        Parameter::number("c"),
        Parameter::int32("d"),
        Parameter::int64("e"),
        Parameter::float32("f"),
        Parameter::float64("g"),
        Parameter::list("h", Type::String),
        Parameter::set("i", Type::Int64),
        Parameter::map("j", Type::Bool),
        Parameter::object("k", [("x", Type::String), ("y", Type::Dynamic)]),
        Parameter::dynamic("l"),
    ];

    for (position, param) in params.iter().enumerate() {
        assert!(
            validate_parameter(param, Some(position)).is_empty(),
            "{:?}",
            param
        );
    }
}

#[test]
fn custom_type_parameter_skips_structural_checks() {
    let param = Parameter::new("when", Kind::List { element_type: None })
        .custom_type(CustomTypeRef::new(Timestamp));

    assert!(validate_parameter(&param, Some(0)).is_empty());
}

#[test]
fn definition_reports_every_problem_in_one_pass() {
    let definition = Definition::default()
        .parameter(Parameter::string("name"))
        .parameter(Parameter::string("name"))
        .parameter(Parameter::float64(""))
        .variadic_parameter(Parameter::list("", Type::Dynamic));

    let details: Vec<String> = validate_definition(&definition)
        .iter()
        .map(|d| d.detail.clone())
        .collect();

    assert_eq!(details.len(), 4);
    assert!(details[0].ends_with("Definition Return field is undefined"));
    assert!(details[1].ends_with("Parameters at position 0 and 1 have the same name \"name\""));
    assert!(details[2].ends_with("Parameter at position 2 does not have a name"));
    assert!(details[3].contains("Variadic parameter \"varparam\" contains"));
}

#[test]
fn new_result_data_matches_return_type() {
    let ctx = Context::new();
    let returns = vec![
        Return::bool(),
        Return::string(),
        Return::number(),
        Return::int32(),
        Return::int64(),
        Return::float32(),
        Return::float64(),
        Return::list(Type::String),
        Return::set(Type::Number),
        Return::map(Type::Int32),
        Return::object([("id", Type::String)]),
        Return::dynamic(),
        Return::string().custom_type(CustomTypeRef::new(Timestamp)),
    ];

    for ret in returns {
        let data = ret.new_result_data(&ctx).unwrap();
        assert_eq!(data.ty(), &ret.get_type());
        assert!(data.value().is_unknown());
    }
}
