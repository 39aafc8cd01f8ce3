//! The per-parameter resolution strategy chain and recursive type
//! construction.
//!
//! Strategies run in a fixed precedence order, once per parameter, left to
//! right across the parameter list. Each strategy either produces a value
//! (terminal for that parameter) or defers to the next; a deferral is
//! control flow and never observable outside this module. Only exhaustion
//! of the whole chain is an error.
//!
//! Precedence for a type-hinted parameter: override table, locator entry,
//! recursive construction. Overrides win over locator entries so a caller
//! always has an escape hatch for one call, even when the locator is
//! populated. A failure inside the recursive step is terminal for the
//! parameter and never falls through to placeholders or defaults.
//!
//! Precedence for a scalar parameter: named placeholder, positional
//! placeholder, declared default. Scalar parameters never trigger locator
//! lookups.
//!
//! Overrides thread unchanged into nested construction; placeholders do
//! not. Placeholders are one call's positional arguments and must not leak
//! into unrelated nested constructors.

use crate::container::descriptor::ParameterDescriptor;
use crate::container::locator::Locator;
use crate::container::placeholders::Placeholders;
use crate::container::registry::TypeRegistry;
use crate::container::value::{OverrideMap, Value};
use crate::errors::ContainerError;

/// Outcome of one strategy: a resolved value, or a hand-off to the next
/// strategy in the chain.
pub(crate) enum Outcome {
    Resolved(Value),
    Defer,
}

/// Everything a strategy may consult besides the parameter itself and the
/// placeholder cursor.
pub(crate) struct ResolutionContext<'a> {
    pub locator: &'a dyn Locator,
    pub registry: &'a TypeRegistry,
    pub overrides: &'a OverrideMap,
    pub depth: usize,
    pub max_depth: usize,
}

/// One resolution strategy. Receives the cursor by value and returns it,
/// possibly shrunk, so placeholder consumption is explicit in the
/// signature.
type Strategy = fn(
    &ParameterDescriptor,
    &ResolutionContext<'_>,
    Placeholders,
) -> Result<(Outcome, Placeholders), ContainerError>;

/// The chain, highest precedence first.
const CHAIN: &[Strategy] = &[
    overridden_type,
    contained_type,
    constructed_type,
    named_placeholder,
    positional_placeholder,
    declared_default,
];

/// Resolve a whole parameter list into an ordered value list, threading the
/// placeholder cursor so consumption by one parameter is visible to the
/// next.
pub(crate) fn resolve_values(
    parameters: &[ParameterDescriptor],
    context: &ResolutionContext<'_>,
    mut placeholders: Placeholders,
) -> Result<Vec<Value>, ContainerError> {
    let mut values = Vec::with_capacity(parameters.len());

    for parameter in parameters {
        let (value, rest) = resolve_parameter(parameter, context, placeholders)?;
        values.push(value);
        placeholders = rest;
    }

    Ok(values)
}

fn resolve_parameter(
    parameter: &ParameterDescriptor,
    context: &ResolutionContext<'_>,
    mut placeholders: Placeholders,
) -> Result<(Value, Placeholders), ContainerError> {
    for strategy in CHAIN {
        let (outcome, rest) = strategy(parameter, context, placeholders)?;
        match outcome {
            Outcome::Resolved(value) => return Ok((value, rest)),
            Outcome::Defer => placeholders = rest,
        }
    }

    Err(ContainerError::unresolved(parameter.name()))
}

/// Resolve a type identifier: a locator entry always wins, construction is
/// the fallback.
pub(crate) fn resolve_type(
    id: &str,
    registry: &TypeRegistry,
    locator: &dyn Locator,
    overrides: &OverrideMap,
    placeholders: Placeholders,
    depth: usize,
    max_depth: usize,
) -> Result<Value, ContainerError> {
    if locator.has(id) {
        return locator.get(id);
    }

    construct(id, registry, locator, overrides, placeholders, depth, max_depth)
}

/// Build an instance of `id` from its registered definition, bypassing the
/// locator-priority step. Wraps a parameter failure with the constructed
/// type's context.
pub(crate) fn construct(
    id: &str,
    registry: &TypeRegistry,
    locator: &dyn Locator,
    overrides: &OverrideMap,
    placeholders: Placeholders,
    depth: usize,
    max_depth: usize,
) -> Result<Value, ContainerError> {
    if depth > max_depth {
        return Err(ContainerError::CyclicDependency {
            type_id: id.to_string(),
            depth,
        });
    }

    let definition = registry
        .get(id)
        .ok_or_else(|| ContainerError::type_not_found(id))?;

    let (parameters, factory) = definition
        .constructor()
        .ok_or_else(|| ContainerError::not_instantiable(id))?;

    let context = ResolutionContext {
        locator,
        registry,
        overrides,
        depth,
        max_depth,
    };

    let values = resolve_values(parameters, &context, placeholders).map_err(|err| match err {
        ContainerError::UnresolvedParameter { ref parameter, .. } => {
            ContainerError::ConstructionFailed {
                type_id: id.to_string(),
                parameter: parameter.clone(),
                source: Box::new(err),
            }
        }
        other => other,
    })?;

    tracing::debug!(type_id = id, depth, "constructing instance");

    factory(values)
}

fn overridden_type(
    parameter: &ParameterDescriptor,
    context: &ResolutionContext<'_>,
    placeholders: Placeholders,
) -> Result<(Outcome, Placeholders), ContainerError> {
    if let Some(tag) = parameter.type_tag() {
        if let Some(value) = context.overrides.get(tag) {
            tracing::trace!(parameter = parameter.name(), type_id = tag, "resolved from override");
            return Ok((Outcome::Resolved(value.clone()), placeholders));
        }
    }

    Ok((Outcome::Defer, placeholders))
}

fn contained_type(
    parameter: &ParameterDescriptor,
    context: &ResolutionContext<'_>,
    placeholders: Placeholders,
) -> Result<(Outcome, Placeholders), ContainerError> {
    if let Some(tag) = parameter.type_tag() {
        if context.locator.has(tag) {
            let value = context
                .locator
                .get(tag)
                .map_err(|err| ContainerError::unresolved_with_source(parameter.name(), err))?;

            tracing::trace!(parameter = parameter.name(), type_id = tag, "resolved from locator");
            return Ok((Outcome::Resolved(value), placeholders));
        }
    }

    Ok((Outcome::Defer, placeholders))
}

fn constructed_type(
    parameter: &ParameterDescriptor,
    context: &ResolutionContext<'_>,
    placeholders: Placeholders,
) -> Result<(Outcome, Placeholders), ContainerError> {
    if let Some(tag) = parameter.type_tag() {
        // Nested construction gets a fresh, empty cursor on purpose.
        let value = construct(
            tag,
            context.registry,
            context.locator,
            context.overrides,
            Placeholders::new(),
            context.depth + 1,
            context.max_depth,
        )
        .map_err(|err| ContainerError::unresolved_with_source(parameter.name(), err))?;

        tracing::trace!(parameter = parameter.name(), type_id = tag, "resolved by construction");
        return Ok((Outcome::Resolved(value), placeholders));
    }

    Ok((Outcome::Defer, placeholders))
}

fn named_placeholder(
    parameter: &ParameterDescriptor,
    _context: &ResolutionContext<'_>,
    placeholders: Placeholders,
) -> Result<(Outcome, Placeholders), ContainerError> {
    if parameter.type_tag().is_none() {
        let (value, rest) = placeholders.take_named(parameter.name());
        if let Some(value) = value {
            return Ok((Outcome::Resolved(value), rest));
        }
        return Ok((Outcome::Defer, rest));
    }

    Ok((Outcome::Defer, placeholders))
}

fn positional_placeholder(
    parameter: &ParameterDescriptor,
    _context: &ResolutionContext<'_>,
    placeholders: Placeholders,
) -> Result<(Outcome, Placeholders), ContainerError> {
    if parameter.type_tag().is_none() {
        let (value, rest) = placeholders.take_positional();
        if let Some(value) = value {
            return Ok((Outcome::Resolved(value), rest));
        }
        return Ok((Outcome::Defer, rest));
    }

    Ok((Outcome::Defer, placeholders))
}

fn declared_default(
    parameter: &ParameterDescriptor,
    _context: &ResolutionContext<'_>,
    placeholders: Placeholders,
) -> Result<(Outcome, Placeholders), ContainerError> {
    match parameter.default() {
        Some(value) => Ok((Outcome::Resolved(value.clone()), placeholders)),
        None => Ok((Outcome::Defer, placeholders)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::locator::InMemoryLocator;
    use crate::container::registry::TypeDefinition;

    fn context<'a>(
        locator: &'a dyn Locator,
        registry: &'a TypeRegistry,
        overrides: &'a OverrideMap,
    ) -> ResolutionContext<'a> {
        ResolutionContext {
            locator,
            registry,
            overrides,
            depth: 0,
            max_depth: 32,
        }
    }

    #[test]
    fn test_override_beats_locator_entry() {
        let locator = InMemoryLocator::new().with("Db", Value::new("from locator".to_string()));
        let registry = TypeRegistry::new();
        let mut overrides = OverrideMap::new();
        overrides.insert("Db".to_string(), Value::new("from override".to_string()));

        let parameter = ParameterDescriptor::typed("db", "Db");
        let context = context(&locator, &registry, &overrides);

        let (value, _) =
            resolve_parameter(&parameter, &context, Placeholders::new()).unwrap();

        assert_eq!(value.downcast_ref::<String>().unwrap(), "from override");
    }

    #[test]
    fn test_typed_parameter_never_consumes_placeholders() {
        let locator = InMemoryLocator::new().with("Db", Value::new(1_i64));
        let registry = TypeRegistry::new();
        let overrides = OverrideMap::new();

        let parameter = ParameterDescriptor::typed("db", "Db");
        let context = context(&locator, &registry, &overrides);
        let placeholders = Placeholders::from_positional([Value::new(9_i64)]);

        let (_, rest) = resolve_parameter(&parameter, &context, placeholders).unwrap();

        assert_eq!(rest.positional_remaining(), 1);
    }

    #[test]
    fn test_scalar_parameter_never_hits_the_locator() {
        // A locator entry under the parameter's name must not be consulted
        // for an untyped parameter.
        let locator = InMemoryLocator::new().with("color", Value::new("blue".to_string()));
        let registry = TypeRegistry::new();
        let overrides = OverrideMap::new();

        let parameter = ParameterDescriptor::scalar("color");
        let context = context(&locator, &registry, &overrides);
        let placeholders = Placeholders::from_positional([Value::new("red".to_string())]);

        let (value, _) = resolve_parameter(&parameter, &context, placeholders).unwrap();

        assert_eq!(value.downcast_ref::<String>().unwrap(), "red");
    }

    #[test]
    fn test_named_lane_beats_positional_front() {
        let locator = InMemoryLocator::new();
        let registry = TypeRegistry::new();
        let overrides = OverrideMap::new();

        let parameter = ParameterDescriptor::scalar("doors");
        let context = context(&locator, &registry, &overrides);
        let placeholders = Placeholders::from_positional([Value::new(5_i64)])
            .with_named("doors", Value::new(3_i64));

        let (value, rest) = resolve_parameter(&parameter, &context, placeholders).unwrap();

        assert_eq!(*value.downcast_ref::<i64>().unwrap(), 3);
        assert_eq!(rest.positional_remaining(), 1);
    }

    #[test]
    fn test_empty_cursor_falls_through_to_default() {
        let locator = InMemoryLocator::new();
        let registry = TypeRegistry::new();
        let overrides = OverrideMap::new();

        let parameter = ParameterDescriptor::scalar("doors").with_default(Value::new(4_i64));
        let context = context(&locator, &registry, &overrides);

        let (value, _) =
            resolve_parameter(&parameter, &context, Placeholders::new()).unwrap();

        assert_eq!(*value.downcast_ref::<i64>().unwrap(), 4);
    }

    #[test]
    fn test_exhausted_chain_names_the_parameter() {
        let locator = InMemoryLocator::new();
        let registry = TypeRegistry::new();
        let overrides = OverrideMap::new();

        let parameter = ParameterDescriptor::scalar("color");
        let context = context(&locator, &registry, &overrides);

        let err = resolve_parameter(&parameter, &context, Placeholders::new()).unwrap_err();

        match err {
            ContainerError::UnresolvedParameter { parameter, source } => {
                assert_eq!(parameter, "color");
                assert!(source.is_none());
            }
            other => panic!("expected UnresolvedParameter, got {other:?}"),
        }
    }

    #[test]
    fn test_recursive_construction_failure_is_terminal() {
        // `Db` is registered but its own parameter is unresolvable; the
        // failure must surface instead of falling through to the default.
        let locator = InMemoryLocator::new();
        let registry = TypeRegistry::new().with(
            TypeDefinition::concrete("Db")
                .parameter(ParameterDescriptor::scalar("dsn"))
                .factory(|_| Ok(()))
                .build()
                .unwrap(),
        );
        let overrides = OverrideMap::new();

        let parameter = ParameterDescriptor::typed("db", "Db").with_default(Value::new(0_i64));
        let context = context(&locator, &registry, &overrides);

        let err = resolve_parameter(&parameter, &context, Placeholders::new()).unwrap_err();

        match err {
            ContainerError::UnresolvedParameter { parameter, source } => {
                assert_eq!(parameter, "db");
                assert!(matches!(
                    source.as_deref(),
                    Some(ContainerError::ConstructionFailed { .. })
                ));
            }
            other => panic!("expected UnresolvedParameter, got {other:?}"),
        }
    }

    #[test]
    fn test_consumption_is_visible_to_later_parameters() {
        let locator = InMemoryLocator::new();
        let registry = TypeRegistry::new();
        let overrides = OverrideMap::new();

        let parameters = vec![
            ParameterDescriptor::scalar("first"),
            ParameterDescriptor::scalar("second"),
        ];
        let context = context(&locator, &registry, &overrides);
        let placeholders =
            Placeholders::from_positional([Value::new(1_i64), Value::new(2_i64)]);

        let values = resolve_values(&parameters, &context, placeholders).unwrap();

        assert_eq!(*values[0].downcast_ref::<i64>().unwrap(), 1);
        assert_eq!(*values[1].downcast_ref::<i64>().unwrap(), 2);
    }
}
