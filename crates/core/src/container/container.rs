use std::fmt;
use std::sync::Arc;

use crate::container::callable::ResolvableCallable;
use crate::container::locator::Locator;
use crate::container::placeholders::Placeholders;
use crate::container::registry::TypeRegistry;
use crate::container::resolver::{self, ResolutionContext};
use crate::container::value::{OverrideMap, Value};
use crate::errors::ContainerError;

/// Container decorating a backing locator with `make` and `call`.
///
/// `make` instantiates a registered type, resolving each constructor
/// parameter through the strategy chain; `call` applies the same procedure
/// to a normalized callable. `get` and `has` delegate to the backing
/// locator verbatim.
pub struct WireContainer {
    locator: Arc<dyn Locator>,
    registry: Arc<TypeRegistry>,
    max_depth: usize,
}

impl WireContainer {
    /// Default bound on nested construction depth.
    pub const DEFAULT_MAX_DEPTH: usize = 32;

    /// Create a container over the given locator and type registry.
    pub fn new(locator: Arc<dyn Locator>, registry: Arc<TypeRegistry>) -> Self {
        Self {
            locator,
            registry,
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }

    /// Set the recursion depth limit. Exceeding it fails with
    /// `CyclicDependency` instead of exhausting the stack.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Instantiate `id`, resolving constructor parameters from the
    /// overrides, the locator and the placeholders.
    ///
    /// A locator entry for `id` takes absolute priority over construction:
    /// a registered instance always wins.
    pub fn make(
        &self,
        id: &str,
        overrides: &OverrideMap,
        placeholders: Placeholders,
    ) -> Result<Value, ContainerError> {
        tracing::debug!(type_id = id, "making instance");

        resolver::resolve_type(
            id,
            &self.registry,
            self.locator.as_ref(),
            overrides,
            placeholders,
            0,
            self.max_depth,
        )
    }

    /// Invoke a callable, resolving its parameters like a constructor's.
    pub fn call(
        &self,
        callable: &ResolvableCallable,
        overrides: &OverrideMap,
        placeholders: Placeholders,
    ) -> Result<Value, ContainerError> {
        tracing::debug!(callable = callable.name(), "calling");

        let context = ResolutionContext {
            locator: self.locator.as_ref(),
            registry: &self.registry,
            overrides,
            depth: 0,
            max_depth: self.max_depth,
        };

        let values = resolver::resolve_values(callable.parameters(), &context, placeholders)
            .map_err(|err| match err {
                ContainerError::UnresolvedParameter { ref parameter, .. } => {
                    ContainerError::CallFailed {
                        callable: callable.name().to_string(),
                        parameter: parameter.clone(),
                        source: Box::new(err),
                    }
                }
                other => other,
            })?;

        callable.invoke(values)
    }

    /// Delegate lookup to the backing locator.
    pub fn get(&self, id: &str) -> Result<Value, ContainerError> {
        self.locator.get(id)
    }

    /// Delegate presence check to the backing locator.
    pub fn has(&self, id: &str) -> bool {
        self.locator.has(id)
    }
}

impl Locator for WireContainer {
    fn has(&self, id: &str) -> bool {
        WireContainer::has(self, id)
    }

    fn get(&self, id: &str) -> Result<Value, ContainerError> {
        WireContainer::get(self, id)
    }
}

impl fmt::Debug for WireContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WireContainer")
            .field("registry", &self.registry)
            .field("max_depth", &self.max_depth)
            .finish()
    }
}
