use thiserror::Error;

/// Error type for the wirework container crate.
///
/// Resolution failures are layered: a single parameter that exhausts the
/// strategy chain produces `UnresolvedParameter`, and the enclosing `make`
/// or `call` wraps it with the type or callable context. The full cause
/// chain stays reachable through `std::error::Error::source`.
#[derive(Debug, Error)]
pub enum ContainerError {
    /// The locator has no entry for the identifier and it is not autowirable.
    #[error("no entry was found for the identifier '{id}'")]
    NotFound { id: String },

    /// The identifier given to `make` names neither a registered interface
    /// nor a registered concrete type.
    #[error("can't make '{id}': this is not a known interface or type name")]
    TypeNotFound { id: String },

    /// The identifier names an interface or abstract type with no registered
    /// implementation to construct.
    #[error("can't instantiate '{id}': no implementation is registered for this interface")]
    NotInstantiable { id: String },

    /// One parameter could not be resolved by any strategy. Carries the
    /// underlying container error when a recursive construction failed.
    #[error("no value can be resolved for the parameter '{parameter}'")]
    UnresolvedParameter {
        parameter: String,
        #[source]
        source: Option<Box<ContainerError>>,
    },

    /// Instantiation of a type failed because one of its constructor
    /// parameters could not be resolved.
    #[error("instantiation of '{type_id}' failed because the '{parameter}' value can't be resolved: {source}")]
    ConstructionFailed {
        type_id: String,
        parameter: String,
        source: Box<ContainerError>,
    },

    /// Invocation of a callable failed because one of its parameters could
    /// not be resolved.
    #[error("execution of '{callable}' failed because the '{parameter}' value can't be resolved: {source}")]
    CallFailed {
        callable: String,
        parameter: String,
        source: Box<ContainerError>,
    },

    /// The recursion depth guard tripped while constructing a type.
    #[error("construction of '{type_id}' exceeded the recursion limit at depth {depth}, the dependency graph likely contains a cycle")]
    CyclicDependency { type_id: String, depth: usize },

    /// A factory rejected the resolved argument list.
    #[error("the factory for '{type_id}' failed: {message}")]
    Factory { type_id: String, message: String },

    /// A type definition was registered in an unusable state.
    #[error("invalid type definition: {message}")]
    Definition { message: String },

    /// Lock error on a shared resource.
    #[error("lock error on resource: {resource}")]
    Lock { resource: String },
}

impl ContainerError {
    /// Create a new not found error
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    /// Create a new type not found error
    pub fn type_not_found(id: impl Into<String>) -> Self {
        Self::TypeNotFound { id: id.into() }
    }

    /// Create a new not instantiable error
    pub fn not_instantiable(id: impl Into<String>) -> Self {
        Self::NotInstantiable { id: id.into() }
    }

    /// Create an unresolved parameter error for an exhausted strategy chain
    pub fn unresolved(parameter: impl Into<String>) -> Self {
        Self::UnresolvedParameter {
            parameter: parameter.into(),
            source: None,
        }
    }

    /// Create an unresolved parameter error carrying the failure of a
    /// recursive construction
    pub fn unresolved_with_source(parameter: impl Into<String>, source: ContainerError) -> Self {
        Self::UnresolvedParameter {
            parameter: parameter.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new factory error
    pub fn factory(type_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Factory {
            type_id: type_id.into(),
            message: message.into(),
        }
    }

    /// Create a new definition error
    pub fn definition(message: impl Into<String>) -> Self {
        Self::Definition {
            message: message.into(),
        }
    }

    /// Create a new lock error
    pub fn lock(resource: impl Into<String>) -> Self {
        Self::Lock {
            resource: resource.into(),
        }
    }

    /// Check if the error is a not found signal
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
