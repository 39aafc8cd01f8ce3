use std::fmt;

use crate::container::descriptor::ParameterDescriptor;
use crate::container::value::Value;
use crate::errors::ContainerError;

/// Closure invoked with the resolved argument list, in declaration order.
pub type CallableFn = Box<dyn Fn(Vec<Value>) -> Result<Value, ContainerError> + Send + Sync>;

/// A callable normalized to the form the engine consumes: a display name
/// for error context, the ordered parameter descriptors of its signature,
/// and the closure to invoke.
///
/// How a function pointer, method or invokable object gets normalized into
/// this shape is the caller's concern.
pub struct ResolvableCallable {
    name: String,
    parameters: Vec<ParameterDescriptor>,
    function: CallableFn,
}

impl ResolvableCallable {
    /// Wrap a closure with its parameter descriptors.
    pub fn new<F, T>(
        name: impl Into<String>,
        parameters: Vec<ParameterDescriptor>,
        function: F,
    ) -> Self
    where
        F: Fn(Vec<Value>) -> Result<T, ContainerError> + Send + Sync + 'static,
        T: Send + Sync + 'static,
    {
        let wrapped: CallableFn = Box::new(move |values| {
            let result = function(values)?;
            Ok(Value::new(result))
        });

        Self {
            name: name.into(),
            parameters,
            function: wrapped,
        }
    }

    /// The display name used in error context.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The callable's parameter list, in declaration order.
    pub fn parameters(&self) -> &[ParameterDescriptor] {
        &self.parameters
    }

    pub(crate) fn invoke(&self, values: Vec<Value>) -> Result<Value, ContainerError> {
        (self.function)(values)
    }
}

impl fmt::Debug for ResolvableCallable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvableCallable")
            .field("name", &self.name)
            .field("parameters", &self.parameters.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invoke_receives_values_in_order() {
        let callable = ResolvableCallable::new(
            "sum",
            vec![
                ParameterDescriptor::scalar("a"),
                ParameterDescriptor::scalar("b"),
            ],
            |values| {
                let a = values[0].downcast_ref::<i64>().copied().unwrap_or(0);
                let b = values[1].downcast_ref::<i64>().copied().unwrap_or(0);
                Ok(a + b)
            },
        );

        let result = callable
            .invoke(vec![Value::new(2_i64), Value::new(3_i64)])
            .unwrap();

        assert_eq!(*result.downcast_ref::<i64>().unwrap(), 5);
    }

    #[test]
    fn test_callable_errors_propagate() {
        let callable =
            ResolvableCallable::new("failing", Vec::new(), |_| -> Result<(), ContainerError> {
                Err(ContainerError::factory("failing", "rejected"))
            });

        let err = callable.invoke(Vec::new()).unwrap_err();
        assert!(matches!(err, ContainerError::Factory { .. }));
    }
}
