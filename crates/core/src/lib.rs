//! String-keyed autowiring container and constructor-argument resolution
//! engine.
//!
//! Given a registered constructor or a normalized callable signature, the
//! engine computes the concrete argument values needed to invoke it. It
//! consults, in a fixed precedence order, an explicit override table, a
//! backing [`Locator`], positional/named placeholder values and declared
//! defaults, recursing into nested type construction as needed.
//!
//! [`WireContainer`] exposes `make` and `call` over a locator and a
//! [`TypeRegistry`]; [`AutowireContainer`] decorates a locator with
//! on-demand, cached construction behind plain `get`/`has`.
//!
//! ```
//! use std::sync::Arc;
//! use wirework_core::{
//!     InMemoryLocator, OverrideMap, ParameterDescriptor, Placeholders, TypeDefinition,
//!     TypeRegistry, Value, WireContainer,
//! };
//!
//! #[derive(Debug)]
//! struct Greeter {
//!     greeting: String,
//! }
//!
//! let registry = TypeRegistry::new().with(
//!     TypeDefinition::concrete("Greeter")
//!         .parameter(ParameterDescriptor::scalar("greeting"))
//!         .factory(|values| {
//!             let greeting = values[0]
//!                 .downcast_ref::<String>()
//!                 .cloned()
//!                 .unwrap_or_default();
//!             Ok(Greeter { greeting })
//!         })
//!         .build()?,
//! );
//!
//! let container = WireContainer::new(Arc::new(InMemoryLocator::new()), Arc::new(registry));
//!
//! let greeter = container.make(
//!     "Greeter",
//!     &OverrideMap::new(),
//!     Placeholders::from_positional([Value::new("hello".to_string())]),
//! )?;
//!
//! assert_eq!(greeter.downcast_ref::<Greeter>().unwrap().greeting, "hello");
//! # Ok::<(), wirework_core::ContainerError>(())
//! ```

pub mod container;
pub mod errors;

pub use container::{
    AutowireContainer, CallableFn, InMemoryLocator, Locator, OverrideMap, ParameterDescriptor,
    Placeholders, ResolvableCallable, TypeDefinition, TypeDefinitionBuilder, TypeFactory,
    TypeRegistry, Value, WireContainer,
};
pub use errors::ContainerError;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get crate version
pub fn version() -> &'static str {
    VERSION
}
