use crate::core::builder::CircuitBuilder;
use crate::core::components::component::{Inputs, Outputs};
use crate::core::errors::Result;

/// Manual circuit definition trait
///
/// A circuit type declares its name and the names of its positional inputs, and
/// provides the build function that wires its body. Any component built through
/// `builder` inside `build` becomes a direct child of this one.
///
/// The implementing type's identity (not its name) is what the primitive
/// registry dispatches on, so two circuits may share a display name.
pub trait ComponentDef: 'static {
    /// Display name of every component of this type
    const NAME: &'static str;

    /// Input names, in positional argument order
    const INPUTS: &'static [&'static str];

    /// Wire the body of the circuit and return its output buses
    fn build(builder: &mut CircuitBuilder, inputs: &Inputs) -> Result<Outputs>;
}
