use std::collections::HashMap;

use crate::container::value::Value;
use crate::errors::ContainerError;

/// Minimal has/get service abstraction the resolution engine decorates or
/// falls back to.
///
/// `get` on an unknown identifier must fail with a `NotFound` error so the
/// autowiring decorator can distinguish "try constructing it" from a
/// genuine failure.
pub trait Locator: Send + Sync {
    /// Whether the locator holds an entry for the identifier.
    fn has(&self, id: &str) -> bool;

    /// Return the entry for the identifier.
    fn get(&self, id: &str) -> Result<Value, ContainerError>;
}

/// In-memory locator backed by a map of pre-built instances.
#[derive(Default, Debug)]
pub struct InMemoryLocator {
    entries: HashMap<String, Value>,
}

impl InMemoryLocator {
    /// Create an empty locator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an instance under the given identifier.
    pub fn insert(&mut self, id: impl Into<String>, value: Value) {
        self.entries.insert(id.into(), value);
    }

    /// Builder-style registration.
    pub fn with(mut self, id: impl Into<String>, value: Value) -> Self {
        self.insert(id, value);
        self
    }
}

impl Locator for InMemoryLocator {
    fn has(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    fn get(&self, id: &str) -> Result<Value, ContainerError> {
        self.entries
            .get(id)
            .cloned()
            .ok_or_else(|| ContainerError::not_found(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_returns_the_registered_instance() {
        let locator = InMemoryLocator::new().with("Wheels", Value::new("alloy".to_string()));

        assert!(locator.has("Wheels"));
        let value = locator.get("Wheels").unwrap();
        assert_eq!(value.downcast_ref::<String>().unwrap(), "alloy");
    }

    #[test]
    fn test_get_on_unknown_id_is_not_found() {
        let locator = InMemoryLocator::new();

        assert!(!locator.has("Wheels"));
        let err = locator.get("Wheels").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_repeated_gets_share_the_instance() {
        let locator = InMemoryLocator::new().with("Seats", Value::new(2_i64));

        let first = locator.get("Seats").unwrap();
        let second = locator.get("Seats").unwrap();

        assert!(Value::ptr_eq(&first, &second));
    }
}
