//! Function parameter definitions

use crate::context::Context;
use crate::function::implementation::{
    parameter_collection_with_dynamic, parameter_missing_name, parameter_missing_type,
    ValidateParameterImplementationRequest, ValidateParameterImplementationResponse,
};
use crate::function::kind::Kind;
use crate::function::validator::ParameterValidator;
use crate::function::DEFAULT_VARIADIC_PARAMETER_NAME;
use crate::types::{CustomTypeRef, Type};
use std::collections::BTreeMap;
use std::sync::Arc;

/// A declared function parameter.
///
/// Positional parameters must be named. The variadic parameter may be left
/// unnamed, in which case it is reported as [`DEFAULT_VARIADIC_PARAMETER_NAME`].
#[derive(Clone)]
pub struct Parameter {
    pub name: String,
    pub description: String,
    pub markdown_description: String,
    pub allow_null_value: bool,
    pub allow_unknown_values: bool,
    pub custom_type: Option<CustomTypeRef>,
    pub validators: Vec<Arc<dyn ParameterValidator>>,
    pub kind: Kind,
}

impl Parameter {
    pub fn new(name: impl Into<String>, kind: Kind) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            markdown_description: String::new(),
            allow_null_value: false,
            allow_unknown_values: false,
            custom_type: None,
            validators: Vec::new(),
            kind,
        }
    }

    pub fn bool(name: impl Into<String>) -> Self {
        Self::new(name, Kind::Bool)
    }

    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, Kind::String)
    }

    pub fn number(name: impl Into<String>) -> Self {
        Self::new(name, Kind::Number)
    }

    pub fn int32(name: impl Into<String>) -> Self {
        Self::new(name, Kind::Int32)
    }

    pub fn int64(name: impl Into<String>) -> Self {
        Self::new(name, Kind::Int64)
    }

    pub fn float32(name: impl Into<String>) -> Self {
        Self::new(name, Kind::Float32)
    }

    pub fn float64(name: impl Into<String>) -> Self {
        Self::new(name, Kind::Float64)
    }

    pub fn list(name: impl Into<String>, element_type: Type) -> Self {
        Self::new(
            name,
            Kind::List {
                element_type: Some(element_type),
            },
        )
    }

    pub fn set(name: impl Into<String>, element_type: Type) -> Self {
        Self::new(
            name,
            Kind::Set {
                element_type: Some(element_type),
            },
        )
    }

    pub fn map(name: impl Into<String>, element_type: Type) -> Self {
        Self::new(
            name,
            Kind::Map {
                element_type: Some(element_type),
            },
        )
    }

    pub fn object<I, K>(name: impl Into<String>, attribute_types: I) -> Self
    where
        I: IntoIterator<Item = (K, Type)>,
        K: Into<String>,
    {
        Self::new(
            name,
            Kind::Object {
                attribute_types: attribute_types
                    .into_iter()
                    .map(|(k, t)| (k.into(), t))
                    .collect::<BTreeMap<_, _>>(),
            },
        )
    }

    pub fn dynamic(name: impl Into<String>) -> Self {
        Self::new(name, Kind::Dynamic)
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn markdown_description(mut self, markdown_description: impl Into<String>) -> Self {
        self.markdown_description = markdown_description.into();
        self
    }

    pub fn allow_null_value(mut self) -> Self {
        self.allow_null_value = true;
        self
    }

    pub fn allow_unknown_values(mut self) -> Self {
        self.allow_unknown_values = true;
        self
    }

    pub fn custom_type(mut self, custom_type: CustomTypeRef) -> Self {
        self.custom_type = Some(custom_type);
        self
    }

    pub fn validator(mut self, validator: impl ParameterValidator + 'static) -> Self {
        self.validators.push(Arc::new(validator));
        self
    }

    /// Declared name, empty when unset.
    pub fn get_name(&self) -> &str {
        &self.name
    }

    pub fn get_description(&self) -> &str {
        &self.description
    }

    pub fn get_markdown_description(&self) -> &str {
        &self.markdown_description
    }

    pub fn get_allow_null_value(&self) -> bool {
        self.allow_null_value
    }

    pub fn get_allow_unknown_values(&self) -> bool {
        self.allow_unknown_values
    }

    /// Effective type: the custom type when set, otherwise the kind's type
    /// with undeclared element types left missing.
    pub fn get_type(&self) -> Type {
        self.kind.resolve_type(self.custom_type.as_ref())
    }

    pub fn get_validators(&self) -> &[Arc<dyn ParameterValidator>] {
        &self.validators
    }

    /// Checks the parameter for definition mistakes. Positional parameters
    /// must be named, every nested type must be declared, and no list, set
    /// or map may hold a dynamic type.
    pub fn validate_implementation(
        &self,
        _ctx: &Context,
        request: &ValidateParameterImplementationRequest,
        response: &mut ValidateParameterImplementationResponse,
    ) {
        let position = request.parameter_position;
        let name = match position {
            None if self.name.is_empty() => DEFAULT_VARIADIC_PARAMETER_NAME,
            _ => self.name.as_str(),
        };

        if let Some(position) = position {
            if self.name.is_empty() {
                response
                    .diagnostics
                    .push(parameter_missing_name(&request.function_name, position));
            }
        }

        let ty = self.get_type();

        if ty.contains_missing_underlying_type() {
            response
                .diagnostics
                .push(parameter_missing_type(name, position));
        }

        if ty.contains_collection_with_dynamic() {
            response
                .diagnostics
                .push(parameter_collection_with_dynamic(name, position));
        }
    }
}

impl std::fmt::Debug for Parameter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Parameter")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("description", &self.description)
            .field("allow_null_value", &self.allow_null_value)
            .field("allow_unknown_values", &self.allow_unknown_values)
            .field("custom_type", &self.custom_type)
            .field(
                "validators",
                &format!("{} validators", self.validators.len()),
            )
            .finish()
    }
}

/// Validators compare by identity.
impl PartialEq for Parameter {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.description == other.description
            && self.markdown_description == other.markdown_description
            && self.allow_null_value == other.allow_null_value
            && self.allow_unknown_values == other.allow_unknown_values
            && self.custom_type == other.custom_type
            && self.kind == other.kind
            && self.validators.len() == other.validators.len()
            && self
                .validators
                .iter()
                .zip(&other.validators)
                .all(|(a, b)| Arc::ptr_eq(a, b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diag::Diagnostics;
    use crate::function::validator::StringLengthValidator;
    use crate::types::CustomType;

    #[derive(Debug)]
    struct Hostname;

    impl CustomType for Hostname {
        fn name(&self) -> String {
            "Hostname".to_string()
        }

        fn underlying_type(&self) -> Type {
            Type::String
        }
    }

    fn validate(param: &Parameter, position: Option<usize>) -> Diagnostics {
        let request = ValidateParameterImplementationRequest {
            function_name: "test_function".to_string(),
            parameter_position: position,
        };
        let mut response = ValidateParameterImplementationResponse::default();
        param.validate_implementation(&Context::new(), &request, &mut response);
        response.diagnostics
    }

    #[test]
    fn getters_return_declared_values() {
        let param = Parameter::string("input")
            .description("the input")
            .markdown_description("the *input*")
            .allow_null_value()
            .validator(StringLengthValidator {
                min: Some(1),
                max: None,
            });

        assert_eq!(param.get_name(), "input");
        assert_eq!(param.get_description(), "the input");
        assert_eq!(param.get_markdown_description(), "the *input*");
        assert!(param.get_allow_null_value());
        assert!(!param.get_allow_unknown_values());
        assert_eq!(param.get_type(), Type::String);
        assert_eq!(param.get_validators().len(), 1);
    }

    #[test]
    fn get_name_is_verbatim() {
        assert_eq!(Parameter::string("").get_name(), "");
    }

    #[test]
    fn get_type_prefers_custom_type() {
        let custom = CustomTypeRef::new(Hostname);
        let param = Parameter::string("host").custom_type(custom.clone());

        assert_eq!(param.get_type(), Type::Custom(custom));
    }

    #[test]
    fn get_type_without_element_type_is_missing() {
        let param = Parameter::new("items", Kind::List { element_type: None });

        assert_eq!(param.get_type(), Type::list(Type::Missing));
    }

    #[test]
    fn valid_parameters_produce_no_diagnostics() {
        assert!(validate(&Parameter::string("s"), Some(0)).is_empty());
        assert!(validate(&Parameter::dynamic("d"), Some(0)).is_empty());
        assert!(validate(
            &Parameter::object("o", [("inner", Type::Dynamic)]),
            Some(0)
        )
        .is_empty());
        assert!(validate(&Parameter::object("o", Vec::<(String, Type)>::new()), Some(0)).is_empty());
        assert!(validate(&Parameter::string(""), None).is_empty());
    }

    #[test]
    fn unnamed_positional_parameter() {
        let diags = validate(&Parameter::string(""), Some(0));

        assert_eq!(diags.len(), 1);
        assert!(diags.iter().next().unwrap().detail.ends_with(
            "Function \"test_function\" - Parameter at position 0 does not have a name"
        ));
    }

    #[test]
    fn collection_with_dynamic() {
        let diags = validate(&Parameter::list("p", Type::Dynamic), Some(0));
        assert_eq!(diags.len(), 1);
        assert!(diags.iter().next().unwrap().detail.contains(
            "Parameter \"p\" at position 0 contains a collection type with a nested dynamic type."
        ));

        let nested = Parameter::object("o", [("tags", Type::map(Type::Dynamic))]);
        assert_eq!(validate(&nested, Some(1)).len(), 1);
    }

    #[test]
    fn unnamed_variadic_uses_default_name() {
        let diags = validate(&Parameter::set("", Type::Dynamic), None);

        assert_eq!(diags.len(), 1);
        assert!(diags
            .iter()
            .next()
            .unwrap()
            .detail
            .contains("Variadic parameter \"varparam\" contains"));
    }

    #[test]
    fn missing_element_type() {
        let param = Parameter::new("m", Kind::Map { element_type: None });
        let diags = validate(&param, Some(2));

        assert_eq!(diags.len(), 1);
        assert!(diags
            .iter()
            .next()
            .unwrap()
            .detail
            .contains("Parameter \"m\" at position 2 is missing underlying type."));
    }
}
