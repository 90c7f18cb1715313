use crate::core::components::component::Component;
use crate::core::errors::{CircuitError, Result};
use crate::core::execution::state::{word_bits, SimulationState};
use crate::core::types::{Bus, Wire};

/// Evaluation context provided to a primitive during one simulation step.
///
/// Reads see the state committed by the previous step. Writes are collected in
/// the context and staged by the simulator once the primitive returns, and they
/// may only target the component's own output wires.
pub struct EvaluationContext<'a> {
    component: &'a Component,
    state: &'a SimulationState,
    staged: Vec<(Wire, bool)>,
}

impl<'a> EvaluationContext<'a> {
    pub(crate) fn new(component: &'a Component, state: &'a SimulationState) -> Self {
        Self {
            component,
            state,
            staged: Vec::new(),
        }
    }

    pub fn component(&self) -> &'a Component {
        self.component
    }

    pub fn input(&self, name: &str) -> Result<&'a Bus> {
        self.component.inputs().bus(name)
    }

    pub fn output(&self, name: &str) -> Result<&'a Bus> {
        self.component.outputs().bus(name)
    }

    pub fn read_wire(&self, wire: Wire) -> bool {
        self.state.read_wire(wire)
    }

    pub fn read_bus(&self, bus: &Bus) -> Result<u64> {
        self.state.read_bus(bus)
    }

    /// Current value of the named input bus
    pub fn read_input(&self, name: &str) -> Result<u64> {
        self.read_bus(self.input(name)?)
    }

    pub fn write_wire(&mut self, wire: Wire, value: bool) -> Result<()> {
        if !self.component.outputs().buses().any(|bus| bus.contains(wire)) {
            return Err(CircuitError::configuration(format!(
                "Component '{}' may only write its own outputs, not wire {}",
                self.component.name(),
                wire
            )));
        }
        self.staged.push((wire, value));
        Ok(())
    }

    pub fn write_bus(&mut self, bus: &Bus, value: u64) -> Result<()> {
        for (wire, bit) in word_bits(bus, value)? {
            self.write_wire(wire, bit)?;
        }
        Ok(())
    }

    /// Stage `value` on the named output bus
    pub fn write_output(&mut self, name: &str, value: u64) -> Result<()> {
        let bus = self.output(name)?;
        self.write_bus(bus, value)
    }

    pub(crate) fn into_staged(self) -> Vec<(Wire, bool)> {
        self.staged
    }
}
