#[allow(clippy::module_inception)]
pub mod container;
pub mod autowire;
pub mod callable;
pub mod descriptor;
pub mod locator;
pub mod placeholders;
pub mod registry;
pub mod value;

pub(crate) mod resolver;

pub use autowire::AutowireContainer;
pub use callable::{CallableFn, ResolvableCallable};
pub use container::WireContainer;
pub use descriptor::ParameterDescriptor;
pub use locator::{InMemoryLocator, Locator};
pub use placeholders::Placeholders;
pub use registry::{TypeDefinition, TypeDefinitionBuilder, TypeFactory, TypeRegistry};
pub use value::{OverrideMap, Value};
