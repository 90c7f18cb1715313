//! One-call convenience entry point: build, seed, step, read.

use crate::core::builder::CircuitBuilder;
use crate::core::components::registry::PrimitiveRegistry;
use crate::core::components::traits::ComponentDef;
use crate::core::errors::Result;
use crate::core::execution::simulator::Simulator;
use crate::core::types::Bus;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// Widths of the input buses created by `simulate`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BusWidths {
    /// Every input gets the same width
    Uniform(usize),
    /// Per-input widths; inputs not listed are one wire wide
    PerInput(HashMap<String, usize>),
}

impl Default for BusWidths {
    fn default() -> Self {
        BusWidths::Uniform(1)
    }
}

impl From<usize> for BusWidths {
    fn from(width: usize) -> Self {
        BusWidths::Uniform(width)
    }
}

impl From<HashMap<String, usize>> for BusWidths {
    fn from(widths: HashMap<String, usize>) -> Self {
        BusWidths::PerInput(widths)
    }
}

impl<const N: usize> From<[(&str, usize); N]> for BusWidths {
    fn from(widths: [(&str, usize); N]) -> Self {
        BusWidths::PerInput(
            widths
                .into_iter()
                .map(|(name, width)| (name.to_string(), width))
                .collect(),
        )
    }
}

impl BusWidths {
    pub fn width_of(&self, input: &str) -> usize {
        match self {
            BusWidths::Uniform(width) => *width,
            BusWidths::PerInput(widths) => widths.get(input).copied().unwrap_or(1),
        }
    }
}

/// Build `T` over fresh input buses, seed `inputs`, run `steps` steps and
/// return the root's output values.
///
/// Inputs missing from `inputs` stay at zero.
pub fn simulate<T: ComponentDef>(
    inputs: &[(&str, u64)],
    widths: impl Into<BusWidths>,
    steps: u64,
    registry: Arc<PrimitiveRegistry>,
) -> Result<BTreeMap<String, u64>> {
    let widths = widths.into();
    let buses = T::INPUTS
        .iter()
        .map(|name| Bus::new(widths.width_of(name)))
        .collect::<Result<Vec<_>>>()?;

    let root = CircuitBuilder::new().build::<T>(buses)?;
    let mut simulator = Simulator::new(root, registry)?;
    simulator.set_input_values(inputs.iter().copied())?;
    simulator.steps(steps)?;
    simulator.get_output_values()
}
