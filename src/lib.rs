pub mod core;

#[macro_use]
mod macros;

pub mod gates;

// Re-export commonly used types
pub use crate::core::builder::CircuitBuilder;
pub use crate::core::components::{
    Component, ComponentDef, ComponentKind, EvaluationContext, Inputs, Outputs, PrimitiveRegistry,
};
pub use crate::core::errors::{CircuitError, Result};
pub use crate::core::execution::{
    ConcurrencyMode, Signal, SignalValue, SimulationConfig, SimulationState, Simulator,
};
pub use crate::core::simulate::{simulate, BusWidths};
pub use crate::core::types::{Bus, Wire};
