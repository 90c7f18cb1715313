//! Circuit definition macros
//!
//! These macros cut the boilerplate of a `ComponentDef` implementation down to
//! a name, an input list and a build function.

/// Macro for implementing `ComponentDef` with simplified syntax
///
/// The build function receives the builder and the bound inputs. It must not
/// capture anything, since it is coerced to a plain function pointer.
///
/// # Example
/// ```rust
/// use nandsim::impl_circuit;
/// use nandsim::gates::{Nand, Not};
/// use nandsim::core::components::Outputs;
///
/// struct And;
///
/// impl_circuit!(And, "and", {
///     inputs: [a, b],
///     build: |builder, inputs| {
///         let nand = builder.build::<Nand>([inputs.bus("a")?.clone(), inputs.bus("b")?.clone()])?;
///         let not = builder.build::<Not>([nand.output("q")?])?;
///         Ok(Outputs::new().with("q", not.output("q")?))
///     }
/// });
/// ```
#[macro_export]
macro_rules! impl_circuit {
    (
        $struct_name:ident,
        $component_name:expr,
        {
            inputs: [$($input:ident),* $(,)?],
            build: $build_fn:expr $(,)?
        }
    ) => {
        impl $crate::core::components::ComponentDef for $struct_name {
            const NAME: &'static str = $component_name;
            const INPUTS: &'static [&'static str] = &[$(stringify!($input)),*];

            fn build(
                builder: &mut $crate::core::builder::CircuitBuilder,
                inputs: &$crate::core::components::Inputs,
            ) -> $crate::core::errors::Result<$crate::core::components::Outputs> {
                let build_fn: fn(
                    &mut $crate::core::builder::CircuitBuilder,
                    &$crate::core::components::Inputs,
                ) -> $crate::core::errors::Result<$crate::core::components::Outputs> = $build_fn;
                build_fn(builder, inputs)
            }
        }
    };
}

/// Macro for creating a complete circuit definition
///
/// Declares a public unit struct (attributes and doc comments are forwarded)
/// and its `ComponentDef` implementation in one go.
///
/// # Example
/// ```rust
/// use nandsim::circuit;
/// use nandsim::gates::Nand;
/// use nandsim::core::components::Outputs;
///
/// circuit! {
///     /// NAND with both inputs tied together
///     name: Inverter,
///     component_name: "inverter",
///     inputs: [a],
///     build: |builder, inputs| {
///         let a = inputs.bus("a")?;
///         let nand = builder.build::<Nand>([a.clone(), a.clone()])?;
///         Ok(Outputs::new().with("q", nand.output("q")?))
///     }
/// }
/// ```
#[macro_export]
macro_rules! circuit {
    (
        $(#[$meta:meta])*
        name: $struct_name:ident,
        component_name: $component_name:expr,
        inputs: [$($input:ident),* $(,)?],
        build: $build_fn:expr $(,)?
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default)]
        pub struct $struct_name;

        $crate::impl_circuit!($struct_name, $component_name, {
            inputs: [$($input),*],
            build: $build_fn
        });
    };
}
