use crate::core::components::component::{Component, ComponentKind, Connection};
use crate::core::components::registry::PrimitiveRegistry;
use crate::core::components::traits::ComponentDef;
use crate::core::errors::{CircuitError, Result};

/// Flattened view of a hierarchy: the primitives to evaluate each step, in a
/// fixed order, and the connections declared by the composites around them.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pub primitives: Vec<Component>,
    pub connections: Vec<Connection>,
}

/// Depth-first walk with an explicit stack. `is_leaf` decides whether a node is
/// extracted or descended into; children are visited in build order.
fn walk(root: &Component, mut is_leaf: impl FnMut(&Component) -> bool) -> Extraction {
    let mut extraction = Extraction::default();
    let mut stack = vec![root];

    while let Some(component) = stack.pop() {
        if is_leaf(component) {
            extraction.primitives.push(component.clone());
        } else {
            extraction
                .connections
                .extend(component.connections().iter().cloned());
            stack.extend(component.subcomponents().iter().rev());
        }
    }

    extraction
}

/// Extract every component that has a registered evaluator.
///
/// Composites without an evaluator are transparent: their children are
/// extracted instead. A registered composite is evaluated as a whole and its
/// body is never visited.
pub fn extract(root: &Component, registry: &PrimitiveRegistry) -> Result<Extraction> {
    let extraction = walk(root, |component| registry.is_primitive(component));
    if extraction.primitives.is_empty() {
        return Err(CircuitError::configuration(format!(
            "No primitive component found under '{}'",
            root.name()
        )));
    }
    Ok(extraction)
}

/// Extract the childless leaves of the hierarchy and check that every one of
/// them is a `T`.
///
/// For backends that only know a single primitive type; the registry plays no
/// part in deciding what a leaf is.
pub fn extract_single_primitive<T: ComponentDef>(root: &Component) -> Result<Extraction> {
    let extraction = walk(root, Component::is_leaf);
    let expected = ComponentKind::of::<T>();
    if let Some(stray) = extraction
        .primitives
        .iter()
        .find(|component| component.kind() != expected)
    {
        return Err(CircuitError::configuration(format!(
            "Leaf component '{}' is not a '{}' primitive",
            stray.name(),
            expected
        )));
    }
    Ok(extraction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::builder::CircuitBuilder;
    use crate::core::components::component::{Inputs, Outputs};
    use crate::core::components::evaluation_context::EvaluationContext;
    use crate::core::types::Bus;

    struct Gate;

    impl ComponentDef for Gate {
        const NAME: &'static str = "gate";
        const INPUTS: &'static [&'static str] = &["a"];

        fn build(_builder: &mut CircuitBuilder, inputs: &Inputs) -> Result<Outputs> {
            Ok(Outputs::new().with("q", Bus::new(inputs.bus("a")?.len())?))
        }
    }

    struct Twice;

    impl ComponentDef for Twice {
        const NAME: &'static str = "twice";
        const INPUTS: &'static [&'static str] = &["a"];

        fn build(builder: &mut CircuitBuilder, inputs: &Inputs) -> Result<Outputs> {
            let first = builder.build::<Gate>([inputs.bus("a")?.clone()])?;
            let second = builder.build::<Gate>([first.output("q")?])?;
            Ok(Outputs::new().with("q", second.output("q")?))
        }
    }

    struct Nested;

    impl ComponentDef for Nested {
        const NAME: &'static str = "nested";
        const INPUTS: &'static [&'static str] = &["a"];

        fn build(builder: &mut CircuitBuilder, inputs: &Inputs) -> Result<Outputs> {
            let gate = builder.build::<Gate>([inputs.bus("a")?.clone()])?;
            let twice = builder.build::<Twice>([gate.output("q")?])?;
            Ok(Outputs::new().with("q", twice.output("q")?))
        }
    }

    struct Empty;

    impl ComponentDef for Empty {
        const NAME: &'static str = "empty";
        const INPUTS: &'static [&'static str] = &["a"];

        fn build(_builder: &mut CircuitBuilder, inputs: &Inputs) -> Result<Outputs> {
            Ok(Outputs::new().with("q", inputs.bus("a")?.clone()))
        }
    }

    fn noop(_ctx: &mut EvaluationContext<'_>) -> Result<()> {
        Ok(())
    }

    fn gate_registry() -> PrimitiveRegistry {
        let mut registry = PrimitiveRegistry::new();
        registry.register::<Gate>(noop).unwrap();
        registry
    }

    fn nested() -> Component {
        CircuitBuilder::new()
            .build::<Nested>([Bus::new(1).unwrap()])
            .unwrap()
    }

    #[test]
    fn test_extracts_registered_leaves_in_build_order() {
        let root = nested();
        let extraction = extract(&root, &gate_registry()).unwrap();

        assert_eq!(extraction.primitives.len(), 3);
        assert!(extraction.primitives.iter().all(|c| c.is::<Gate>()));
        // First gate built directly under the root, then the two inside `twice`
        assert!(extraction.primitives[0].ptr_eq(&root.subcomponents()[0]));
        assert!(extraction.primitives[2].ptr_eq(&root.subcomponents()[1].subcomponents()[1]));
    }

    #[test]
    fn test_registered_composite_is_not_descended() {
        let mut registry = gate_registry();
        registry.register::<Twice>(noop).unwrap();

        let extraction = extract(&nested(), &registry).unwrap();
        assert_eq!(extraction.primitives.len(), 2);
        assert!(extraction.primitives[1].is::<Twice>());
    }

    #[test]
    fn test_no_primitive_found() {
        let err = extract(&nested(), &PrimitiveRegistry::new()).unwrap_err();
        assert_eq!(err.message(), "No primitive component found under 'nested'");
    }

    #[test]
    fn test_single_primitive_policy() {
        let extraction = extract_single_primitive::<Gate>(&nested()).unwrap();
        assert_eq!(extraction.primitives.len(), 3);

        let empty = CircuitBuilder::new()
            .build::<Empty>([Bus::new(1).unwrap()])
            .unwrap();
        let err = extract_single_primitive::<Gate>(&empty).unwrap_err();
        assert!(err.message().contains("'empty'"));
    }
}
