use crate::core::components::component::{Component, ComponentKind};
use crate::core::components::evaluation_context::EvaluationContext;
use crate::core::components::traits::ComponentDef;
use crate::core::errors::{CircuitError, Result};
use std::collections::HashMap;
use std::fmt;

/// Evaluation function of a primitive.
///
/// Reads the current phase through the context and stages next-phase values
/// for the component's own outputs.
pub type EvaluateFn = fn(&mut EvaluationContext<'_>) -> Result<()>;

/// Registered evaluator for one component type
#[derive(Clone, Copy)]
pub struct Primitive {
    pub kind: ComponentKind,
    pub evaluate: EvaluateFn,
}

impl fmt::Debug for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Primitive")
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

/// Maps component types to the evaluation functions that make them primitives.
///
/// Built once, then shared read-only with every simulator that uses it.
#[derive(Debug, Clone, Default)]
pub struct PrimitiveRegistry {
    primitives: HashMap<ComponentKind, Primitive>,
}

impl PrimitiveRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the evaluator for `T`
    pub fn register<T: ComponentDef>(&mut self, evaluate: EvaluateFn) -> Result<()> {
        let kind = ComponentKind::of::<T>();
        if self.primitives.contains_key(&kind) {
            return Err(CircuitError::configuration(format!(
                "Primitive '{}' is already registered",
                kind
            )));
        }
        self.primitives.insert(kind, Primitive { kind, evaluate });
        Ok(())
    }

    /// Builder-style registration for stock registries known to be duplicate-free
    pub(crate) fn with<T: ComponentDef>(mut self, evaluate: EvaluateFn) -> Self {
        let kind = ComponentKind::of::<T>();
        self.primitives.insert(kind, Primitive { kind, evaluate });
        self
    }

    pub fn get(&self, kind: ComponentKind) -> Option<&Primitive> {
        self.primitives.get(&kind)
    }

    pub fn contains(&self, kind: ComponentKind) -> bool {
        self.primitives.contains_key(&kind)
    }

    /// Whether this component is evaluated directly rather than decomposed
    pub fn is_primitive(&self, component: &Component) -> bool {
        self.contains(component.kind())
    }

    /// Names of all registered primitives, sorted
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.primitives.keys().map(|kind| kind.name()).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }
}
