use std::collections::HashMap;
use std::fmt;

use crate::container::descriptor::ParameterDescriptor;
use crate::container::value::Value;
use crate::errors::ContainerError;

/// Factory producing an instance from the resolved constructor arguments,
/// in declaration order.
pub type TypeFactory = Box<dyn Fn(Vec<Value>) -> Result<Value, ContainerError> + Send + Sync>;

enum TypeKind {
    Concrete {
        parameters: Vec<ParameterDescriptor>,
        factory: TypeFactory,
        implements: Vec<String>,
    },
    Interface,
}

/// A registered type: either a concrete, constructible definition carrying
/// its constructor parameters and factory, or an interface/abstract marker
/// that cannot be instantiated directly.
///
/// Definitions are the crate's stand-in for runtime signature reflection:
/// the embedding application declares each constructible type once and the
/// engine drives resolution from the declared parameter list.
pub struct TypeDefinition {
    id: String,
    kind: TypeKind,
}

impl TypeDefinition {
    /// Start building a concrete, constructible definition.
    pub fn concrete(id: impl Into<String>) -> TypeDefinitionBuilder {
        TypeDefinitionBuilder {
            id: id.into(),
            parameters: Vec::new(),
            implements: Vec::new(),
            factory: None,
        }
    }

    /// An interface or abstract type: known to the registry, never
    /// constructible on its own.
    pub fn interface(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: TypeKind::Interface,
        }
    }

    /// The type identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Whether the definition can be constructed.
    pub fn is_instantiable(&self) -> bool {
        matches!(self.kind, TypeKind::Concrete { .. })
    }

    /// Whether the definition implements any of the given interface ids.
    pub fn implements_any(&self, interfaces: &[String]) -> bool {
        match &self.kind {
            TypeKind::Concrete { implements, .. } => {
                implements.iter().any(|id| interfaces.contains(id))
            }
            TypeKind::Interface => false,
        }
    }

    /// The constructor surface of a concrete definition.
    pub(crate) fn constructor(&self) -> Option<(&[ParameterDescriptor], &TypeFactory)> {
        match &self.kind {
            TypeKind::Concrete {
                parameters,
                factory,
                ..
            } => Some((parameters, factory)),
            TypeKind::Interface => None,
        }
    }
}

impl fmt::Debug for TypeDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match &self.kind {
            TypeKind::Concrete { parameters, .. } => format!("Concrete({} parameters)", parameters.len()),
            TypeKind::Interface => "Interface".to_string(),
        };
        f.debug_struct("TypeDefinition")
            .field("id", &self.id)
            .field("kind", &kind)
            .finish()
    }
}

/// Builder for concrete type definitions. The factory is required; `build`
/// rejects a definition without one.
pub struct TypeDefinitionBuilder {
    id: String,
    parameters: Vec<ParameterDescriptor>,
    implements: Vec<String>,
    factory: Option<TypeFactory>,
}

impl TypeDefinitionBuilder {
    /// Append a constructor parameter. Declaration order is resolution
    /// order.
    pub fn parameter(mut self, parameter: ParameterDescriptor) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Declare an implemented marker interface, consulted by the autowiring
    /// allow-list.
    pub fn implements(mut self, interface: impl Into<String>) -> Self {
        self.implements.push(interface.into());
        self
    }

    /// Set the factory invoked with the resolved argument list.
    pub fn factory<F, T>(mut self, factory: F) -> Self
    where
        F: Fn(Vec<Value>) -> Result<T, ContainerError> + Send + Sync + 'static,
        T: Send + Sync + 'static,
    {
        let wrapped: TypeFactory = Box::new(move |values| {
            let instance = factory(values)?;
            Ok(Value::new(instance))
        });
        self.factory = Some(wrapped);
        self
    }

    /// Build the definition.
    pub fn build(self) -> Result<TypeDefinition, ContainerError> {
        let factory = self.factory.ok_or_else(|| {
            ContainerError::definition(format!(
                "concrete type '{}' requires a factory function",
                self.id
            ))
        })?;

        Ok(TypeDefinition {
            id: self.id,
            kind: TypeKind::Concrete {
                parameters: self.parameters,
                factory,
                implements: self.implements,
            },
        })
    }
}

/// Registry of type definitions keyed by identifier.
#[derive(Default)]
pub struct TypeRegistry {
    definitions: HashMap<String, TypeDefinition>,
}

impl TypeRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a definition, replacing any previous one under the same id.
    pub fn insert(&mut self, definition: TypeDefinition) {
        self.definitions.insert(definition.id().to_string(), definition);
    }

    /// Builder-style registration.
    pub fn with(mut self, definition: TypeDefinition) -> Self {
        self.insert(definition);
        self
    }

    /// Look up a definition.
    pub fn get(&self, id: &str) -> Option<&TypeDefinition> {
        self.definitions.get(id)
    }

    /// Whether the registry knows the identifier.
    pub fn contains(&self, id: &str) -> bool {
        self.definitions.contains_key(id)
    }

    /// Number of registered definitions.
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeRegistry")
            .field("definitions", &self.definitions.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concrete_definition_requires_a_factory() {
        let result = TypeDefinition::concrete("Engine")
            .parameter(ParameterDescriptor::scalar("color"))
            .build();

        assert!(matches!(result, Err(ContainerError::Definition { .. })));
    }

    #[test]
    fn test_interface_is_not_instantiable() {
        let definition = TypeDefinition::interface("Movable");

        assert!(!definition.is_instantiable());
        assert!(definition.constructor().is_none());
    }

    #[test]
    fn test_factory_output_is_boxed() {
        let definition = TypeDefinition::concrete("Counter")
            .factory(|_| Ok(7_i64))
            .build()
            .unwrap();

        let (parameters, factory) = definition.constructor().unwrap();
        assert!(parameters.is_empty());

        let value = factory(Vec::new()).unwrap();
        assert_eq!(*value.downcast_ref::<i64>().unwrap(), 7);
    }

    #[test]
    fn test_implements_any_matches_allow_list() {
        let definition = TypeDefinition::concrete("SmtpMailer")
            .implements("Service")
            .factory(|_| Ok(()))
            .build()
            .unwrap();

        assert!(definition.implements_any(&["Service".to_string()]));
        assert!(!definition.implements_any(&["Repository".to_string()]));
    }

    #[test]
    fn test_registry_lookup() {
        let registry = TypeRegistry::new()
            .with(TypeDefinition::interface("Movable"))
            .with(
                TypeDefinition::concrete("Wheels")
                    .factory(|_| Ok(()))
                    .build()
                    .unwrap(),
            );

        assert_eq!(registry.len(), 2);
        assert!(registry.contains("Wheels"));
        assert!(registry.get("Movable").is_some());
        assert!(registry.get("Engine").is_none());
    }
}
