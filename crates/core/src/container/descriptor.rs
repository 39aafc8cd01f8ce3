use std::fmt;

use crate::container::value::Value;

/// One formal parameter of a constructor or callable signature.
///
/// A parameter either declares a required type (its value is resolved
/// through the override table, the locator or recursive construction) or is
/// scalar (its value comes from placeholders or its declared default).
/// A declared default that is itself a none-like value is a present default
/// and resolves successfully.
#[derive(Clone)]
pub struct ParameterDescriptor {
    name: String,
    type_tag: Option<String>,
    default: Option<Value>,
}

impl ParameterDescriptor {
    /// A parameter requiring an instance of the given type.
    pub fn typed(name: impl Into<String>, type_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_tag: Some(type_id.into()),
            default: None,
        }
    }

    /// An untyped parameter, filled from placeholders or its default.
    pub fn scalar(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_tag: None,
            default: None,
        }
    }

    /// Attach a declared default value.
    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    /// The parameter name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The required type identifier, absent for scalar parameters.
    pub fn type_tag(&self) -> Option<&str> {
        self.type_tag.as_deref()
    }

    /// The declared default value, if any.
    pub fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// Whether the parameter declares a default value.
    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }
}

impl fmt::Debug for ParameterDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParameterDescriptor")
            .field("name", &self.name)
            .field("type_tag", &self.type_tag)
            .field("has_default", &self.default.is_some())
            .finish()
    }
}
