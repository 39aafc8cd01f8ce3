use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};

use crate::container::locator::Locator;
use crate::container::placeholders::Placeholders;
use crate::container::registry::TypeRegistry;
use crate::container::resolver;
use crate::container::value::{OverrideMap, Value};
use crate::errors::ContainerError;

/// Locator decorator that autowires unknown identifiers on demand.
///
/// `get` asks the delegate first. Only on the delegate's not-found signal
/// is the identifier treated as a type identifier and constructed from its
/// registered definition, provided it is concrete and,
/// when an allow-list of marker interfaces is configured, implements one of
/// them. Constructed instances are memoized so repeated lookups return the
/// same instance. Identifiers that are not autowirable re-raise the
/// delegate's original not-found error, keeping the decorator a drop-in
/// replacement for the plain locator.
///
/// Construction resolves nested type-hinted dependencies against the
/// decorator itself, so autowirable dependencies of an autowired root are
/// constructed once and cached too.
pub struct AutowireContainer {
    delegate: Arc<dyn Locator>,
    registry: Arc<TypeRegistry>,
    interfaces: Vec<String>,
    instances: RwLock<HashMap<String, Value>>,
    max_depth: usize,
}

impl AutowireContainer {
    /// Decorate the given locator with autowiring over the registry. An
    /// empty allow-list means every concrete registered type is
    /// autowirable.
    pub fn new(delegate: Arc<dyn Locator>, registry: Arc<TypeRegistry>) -> Self {
        Self {
            delegate,
            registry,
            interfaces: Vec::new(),
            instances: RwLock::new(HashMap::new()),
            max_depth: crate::container::WireContainer::DEFAULT_MAX_DEPTH,
        }
    }

    /// Restrict autowiring to types implementing one of the given marker
    /// interfaces.
    pub fn with_interfaces<I, S>(mut self, interfaces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.interfaces = interfaces.into_iter().map(Into::into).collect();
        self
    }

    /// Set the recursion depth limit for autowired construction.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Return the delegate's entry, falling back to cached autowiring.
    pub fn get(&self, id: &str) -> Result<Value, ContainerError> {
        match self.delegate.get(id) {
            Ok(value) => Ok(value),
            Err(err) if err.is_not_found() => {
                if self.is_autowirable(id) {
                    tracing::debug!(type_id = id, "autowiring unregistered identifier");
                    self.make(id)
                } else {
                    // Preserve the delegate's original signal.
                    Err(err)
                }
            }
            Err(err) => Err(err),
        }
    }

    /// Whether the delegate has the identifier or it can be autowired.
    pub fn has(&self, id: &str) -> bool {
        self.delegate.has(id) || self.is_autowirable(id)
    }

    fn is_autowirable(&self, id: &str) -> bool {
        match self.registry.get(id) {
            Some(definition) if definition.is_instantiable() => {
                self.interfaces.is_empty() || definition.implements_any(&self.interfaces)
            }
            _ => false,
        }
    }

    /// Construct and memoize an instance of `id`. The first instance
    /// written wins, so every caller observes the same one.
    fn make(&self, id: &str) -> Result<Value, ContainerError> {
        {
            let instances = self
                .instances
                .read()
                .map_err(|_| ContainerError::lock("instances"))?;

            if let Some(value) = instances.get(id) {
                tracing::trace!(type_id = id, "instance cache hit");
                return Ok(value.clone());
            }
        }

        // Bypass the locator-priority step for the root identifier: the
        // decorator would otherwise see itself as having it. Nested
        // parameters still resolve against the decorator, so autowirable
        // dependencies land in the cache as well.
        let built = resolver::construct(
            id,
            &self.registry,
            self,
            &OverrideMap::new(),
            Placeholders::new(),
            0,
            self.max_depth,
        )?;

        let mut instances = self
            .instances
            .write()
            .map_err(|_| ContainerError::lock("instances"))?;

        Ok(instances.entry(id.to_string()).or_insert(built).clone())
    }
}

impl Locator for AutowireContainer {
    fn has(&self, id: &str) -> bool {
        AutowireContainer::has(self, id)
    }

    fn get(&self, id: &str) -> Result<Value, ContainerError> {
        AutowireContainer::get(self, id)
    }
}

impl fmt::Debug for AutowireContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AutowireContainer")
            .field("registry", &self.registry)
            .field("interfaces", &self.interfaces)
            .field(
                "instances",
                &self.instances.read().map(|map| map.len()).unwrap_or(0),
            )
            .finish()
    }
}
