use crate::core::components::component::{Component, ComponentKind, Connection, Inputs};
use crate::core::components::traits::ComponentDef;
use crate::core::errors::{CircuitError, Result};
use crate::core::types::Bus;
use log::trace;
use std::ops::{Deref, DerefMut};

/// Components and connections captured while one build function runs
#[derive(Debug, Default)]
struct CaptureFrame {
    subcomponents: Vec<Component>,
    connections: Vec<Connection>,
}

/// Builds circuit hierarchies out of `ComponentDef` types.
///
/// The builder keeps a stack of capture frames, one per build call in
/// progress. A finished component is registered into the innermost frame, so
/// each component ends up with exactly the children its own build function
/// created.
#[derive(Debug, Default)]
pub struct CircuitBuilder {
    frames: Vec<CaptureFrame>,
}

impl CircuitBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of build calls currently in progress
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn is_capturing(&self) -> bool {
        !self.frames.is_empty()
    }

    /// Build a component of type `T` over `args`, bound positionally to
    /// `T::INPUTS`.
    ///
    /// When called from inside another build function the result also becomes
    /// a child of the component being built there.
    pub fn build<T: ComponentDef>(&mut self, args: impl IntoIterator<Item = Bus>) -> Result<Component> {
        let args: Vec<Bus> = args.into_iter().collect();
        if args.len() != T::INPUTS.len() {
            return Err(CircuitError::configuration(format!(
                "'{}' takes {} input(s) {:?} but {} were given",
                T::NAME,
                T::INPUTS.len(),
                T::INPUTS,
                args.len()
            )));
        }
        let inputs: Inputs = T::INPUTS.iter().copied().zip(args).collect();
        if inputs.len() != T::INPUTS.len() {
            return Err(CircuitError::configuration(format!(
                "'{}' declares duplicate input names {:?}",
                T::NAME,
                T::INPUTS
            )));
        }

        let (outputs, frame) = {
            let mut scope = CaptureScope::enter(self, T::NAME);
            let outputs = T::build(&mut scope, &inputs)?;
            (outputs, scope.exit())
        };

        let component = Component::assemble(
            ComponentKind::of::<T>(),
            inputs,
            outputs,
            frame.subcomponents,
            frame.connections,
        );
        self.register(&component);
        Ok(component)
    }

    /// Drive every wire of `destination` from the matching wire of `source`.
    ///
    /// Used to close feedback loops: build the consumer against a placeholder
    /// bus, then connect the producer's output to it.
    pub fn connect(&mut self, source: &Bus, destination: &Bus) -> Result<()> {
        source.ensure_same_width(destination)?;
        let frame = self.frames.last_mut().ok_or_else(|| {
            CircuitError::configuration("Connections can only be declared inside a component build")
        })?;
        frame.connections.push(Connection {
            source: source.clone(),
            destination: destination.clone(),
        });
        Ok(())
    }

    fn register(&mut self, component: &Component) {
        let depth = self.frames.len();
        if let Some(frame) = self.frames.last_mut() {
            trace!(
                "Captured '{}' as child #{} at depth {}",
                component.name(),
                frame.subcomponents.len(),
                depth
            );
            frame.subcomponents.push(component.clone());
        }
    }
}

/// Active capture context for one build call.
///
/// Dereferences to the builder so the build function can keep building. The
/// frame is popped when the scope is dropped, whether the build function
/// returned normally, returned an error, or panicked.
pub struct CaptureScope<'a> {
    builder: &'a mut CircuitBuilder,
    name: &'static str,
    open: bool,
}

impl<'a> CaptureScope<'a> {
    fn enter(builder: &'a mut CircuitBuilder, name: &'static str) -> Self {
        builder.frames.push(CaptureFrame::default());
        trace!("Opened capture scope for '{}' (depth {})", name, builder.frames.len());
        Self {
            builder,
            name,
            open: true,
        }
    }

    fn exit(mut self) -> CaptureFrame {
        self.open = false;
        trace!("Closed capture scope for '{}'", self.name);
        self.builder.frames.pop().unwrap_or_default()
    }
}

impl Deref for CaptureScope<'_> {
    type Target = CircuitBuilder;

    fn deref(&self) -> &CircuitBuilder {
        self.builder
    }
}

impl DerefMut for CaptureScope<'_> {
    fn deref_mut(&mut self) -> &mut CircuitBuilder {
        self.builder
    }
}

impl Drop for CaptureScope<'_> {
    fn drop(&mut self) {
        if self.open {
            trace!("Discarded capture scope for '{}'", self.name);
            self.builder.frames.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::components::component::Outputs;

    struct Leaf;

    impl ComponentDef for Leaf {
        const NAME: &'static str = "leaf";
        const INPUTS: &'static [&'static str] = &["a"];

        fn build(_builder: &mut CircuitBuilder, inputs: &Inputs) -> Result<Outputs> {
            let a = inputs.bus("a")?;
            Ok(Outputs::new().with("q", Bus::new(a.len())?))
        }
    }

    struct Pair;

    impl ComponentDef for Pair {
        const NAME: &'static str = "pair";
        const INPUTS: &'static [&'static str] = &["a"];

        fn build(builder: &mut CircuitBuilder, inputs: &Inputs) -> Result<Outputs> {
            let first = builder.build::<Leaf>([inputs.bus("a")?.clone()])?;
            let second = builder.build::<Leaf>([first.output("q")?])?;
            Ok(Outputs::new().with("q", second.output("q")?))
        }
    }

    struct Twin;

    impl ComponentDef for Twin {
        const NAME: &'static str = "twin";
        const INPUTS: &'static [&'static str] = &["a", "a"];

        fn build(_builder: &mut CircuitBuilder, _inputs: &Inputs) -> Result<Outputs> {
            Ok(Outputs::new())
        }
    }

    struct Failing;

    impl ComponentDef for Failing {
        const NAME: &'static str = "failing";
        const INPUTS: &'static [&'static str] = &["a"];

        fn build(builder: &mut CircuitBuilder, inputs: &Inputs) -> Result<Outputs> {
            builder.build::<Leaf>([inputs.bus("a")?.clone()])?;
            Err(CircuitError::configuration("deliberate failure"))
        }
    }

    #[test]
    fn test_inputs_bind_in_declared_order() {
        let mut builder = CircuitBuilder::new();
        let a = Bus::new(2).unwrap();
        let leaf = builder.build::<Leaf>([a.clone()]).unwrap();

        assert_eq!(leaf.name(), "leaf");
        assert_eq!(leaf.input("a").unwrap(), a);
        assert_eq!(leaf.output("q").unwrap().len(), 2);
        assert!(leaf.is_leaf());
        assert!(leaf.is::<Leaf>());
    }

    #[test]
    fn test_argument_count_mismatch() {
        let mut builder = CircuitBuilder::new();
        let err = builder
            .build::<Leaf>([Bus::new(1).unwrap(), Bus::new(1).unwrap()])
            .unwrap_err();
        assert!(matches!(err, CircuitError::Configuration(_)));
        assert!(err.message().contains("takes 1 input(s)"));
    }

    #[test]
    fn test_duplicate_input_names_are_rejected() {
        let mut builder = CircuitBuilder::new();
        let err = builder
            .build::<Twin>([Bus::new(1).unwrap(), Bus::new(1).unwrap()])
            .unwrap_err();
        assert!(matches!(err, CircuitError::Configuration(_)));
        assert!(err.message().contains("duplicate input names"));
        assert!(!builder.is_capturing());
    }

    #[test]
    fn test_children_are_captured() {
        let mut builder = CircuitBuilder::new();
        let pair = builder.build::<Pair>([Bus::new(1).unwrap()]).unwrap();

        assert_eq!(pair.subcomponents().len(), 2);
        assert!(pair.subcomponents().iter().all(|c| c.is::<Leaf>()));
        assert_eq!(builder.depth(), 0);
    }

    #[test]
    fn test_root_is_not_captured_anywhere() {
        let mut builder = CircuitBuilder::new();
        builder.build::<Leaf>([Bus::new(1).unwrap()]).unwrap();
        builder.build::<Leaf>([Bus::new(1).unwrap()]).unwrap();
        assert!(!builder.is_capturing());
    }

    #[test]
    fn test_failed_build_restores_scope() {
        let mut builder = CircuitBuilder::new();
        let err = builder.build::<Failing>([Bus::new(1).unwrap()]).unwrap_err();
        assert_eq!(err.message(), "deliberate failure");
        assert_eq!(builder.depth(), 0);

        let pair = builder.build::<Pair>([Bus::new(1).unwrap()]).unwrap();
        assert_eq!(pair.subcomponents().len(), 2);
    }

    #[test]
    fn test_connect_requires_active_build() {
        let mut builder = CircuitBuilder::new();
        let a = Bus::new(1).unwrap();
        let b = Bus::new(1).unwrap();
        assert!(builder.connect(&a, &b).is_err());
    }
}
