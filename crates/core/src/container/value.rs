use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Dynamically typed value exchanged between locators, factories and the
/// container. Cloning is reference cloning; two clones of the same value
/// compare equal under [`Value::ptr_eq`].
#[derive(Clone)]
pub struct Value(Arc<dyn Any + Send + Sync>);

/// Override table mapping a type identifier to a pre-built value returned
/// verbatim during resolution, never re-resolved.
pub type OverrideMap = HashMap<String, Value>;

impl Value {
    /// Wrap a concrete value.
    pub fn new<T: Send + Sync + 'static>(inner: T) -> Self {
        Self(Arc::new(inner))
    }

    /// Borrow the concrete type behind this value, if it matches.
    pub fn downcast_ref<T: Send + Sync + 'static>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }

    /// Return a shared handle to the concrete type behind this value.
    pub fn downcast_arc<T: Send + Sync + 'static>(&self) -> Option<Arc<T>> {
        self.0.clone().downcast::<T>().ok()
    }

    /// Whether two values are the same instance.
    pub fn ptr_eq(a: &Value, b: &Value) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Value").field(&(*self.0).type_id()).finish()
    }
}
