use crate::core::errors::{CircuitError, Result};
use crate::core::types::{Bus, Wire};
use std::collections::HashMap;

/// Widest bus whose value fits a `u64` word
pub const MAX_WORD_WIDTH: usize = u64::BITS as usize;

/// A signal addressed on the dynamic read/write path
#[derive(Debug, Clone, Copy)]
pub enum Signal<'a> {
    Wire(Wire),
    Bus(&'a Bus),
}

impl From<Wire> for Signal<'_> {
    fn from(wire: Wire) -> Self {
        Signal::Wire(wire)
    }
}

impl<'a> From<&'a Bus> for Signal<'a> {
    fn from(bus: &'a Bus) -> Self {
        Signal::Bus(bus)
    }
}

/// Value carried on the dynamic read/write path: a bit for wires, a word for buses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalValue {
    Bit(bool),
    Word(u64),
}

pub(crate) fn ensure_word_width(bus: &Bus) -> Result<()> {
    if bus.len() > MAX_WORD_WIDTH {
        return Err(CircuitError::configuration(format!(
            "{} is wider than the {}-bit value word",
            bus, MAX_WORD_WIDTH
        )));
    }
    Ok(())
}

/// Split `value` over the wires of `bus`, least significant bit on wire 0
pub(crate) fn word_bits(bus: &Bus, value: u64) -> Result<impl Iterator<Item = (Wire, bool)> + '_> {
    ensure_word_width(bus)?;
    Ok(bus
        .wires()
        .iter()
        .enumerate()
        .map(move |(i, wire)| (*wire, (value >> i) & 1 != 0)))
}

/// Two-phase value store over wires.
///
/// Reads always see the committed (current) phase; writes are staged into the
/// next phase and only become visible after `commit`. Wires that were never
/// written read as `false`.
///
/// Wires joined by a connection are resolved to their driving wire on every
/// read and write.
#[derive(Debug, Clone, Default)]
pub struct SimulationState {
    current: HashMap<Wire, bool>,
    next: HashMap<Wire, bool>,
    aliases: HashMap<Wire, Wire>,
}

impl SimulationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// State whose `aliases` map connection destinations to their drivers.
    /// The map must already be flattened: no alias target is itself aliased.
    pub(crate) fn with_aliases(aliases: HashMap<Wire, Wire>) -> Self {
        Self {
            aliases,
            ..Self::default()
        }
    }

    /// The wire that actually carries `wire`'s value
    pub fn resolve(&self, wire: Wire) -> Wire {
        self.aliases.get(&wire).copied().unwrap_or(wire)
    }

    pub fn read_wire(&self, wire: Wire) -> bool {
        self.current
            .get(&self.resolve(wire))
            .copied()
            .unwrap_or(false)
    }

    /// Bit `i` of the result is the value of wire `i`
    pub fn read_bus(&self, bus: &Bus) -> Result<u64> {
        ensure_word_width(bus)?;
        Ok(bus
            .wires()
            .iter()
            .enumerate()
            .filter(|(_, wire)| self.read_wire(**wire))
            .fold(0u64, |word, (i, _)| word | (1u64 << i)))
    }

    pub fn write_wire(&mut self, wire: Wire, value: bool) {
        let wire = self.resolve(wire);
        self.next.insert(wire, value);
    }

    /// Stage bit `i` of `value` into wire `i`; bits beyond the bus width are ignored
    pub fn write_bus(&mut self, bus: &Bus, value: u64) -> Result<()> {
        for (wire, bit) in word_bits(bus, value)? {
            self.write_wire(wire, bit);
        }
        Ok(())
    }

    /// Dynamic read: wires yield bits, buses yield words
    pub fn read<'a>(&self, signal: impl Into<Signal<'a>>) -> Result<SignalValue> {
        match signal.into() {
            Signal::Wire(wire) => Ok(SignalValue::Bit(self.read_wire(wire))),
            Signal::Bus(bus) => self.read_bus(bus).map(SignalValue::Word),
        }
    }

    /// Dynamic write: a bit for a wire, a word for a bus, anything else is a
    /// value type error
    pub fn write<'a>(&mut self, signal: impl Into<Signal<'a>>, value: SignalValue) -> Result<()> {
        match (signal.into(), value) {
            (Signal::Wire(wire), SignalValue::Bit(bit)) => {
                self.write_wire(wire, bit);
                Ok(())
            }
            (Signal::Bus(bus), SignalValue::Word(word)) => self.write_bus(bus, word),
            (Signal::Wire(wire), SignalValue::Word(_)) => Err(CircuitError::value_type(format!(
                "Value must be a bool when setting wire values (wire {})",
                wire
            ))),
            (Signal::Bus(bus), SignalValue::Bit(_)) => Err(CircuitError::value_type(format!(
                "Value must be an int when setting bus values ({})",
                bus
            ))),
        }
    }

    /// Stage a batch of wire writes, later entries winning
    pub(crate) fn stage(&mut self, writes: impl IntoIterator<Item = (Wire, bool)>) {
        for (wire, value) in writes {
            self.write_wire(wire, value);
        }
    }

    /// Make every staged write visible and clear the stage
    pub fn commit(&mut self) {
        self.current.extend(self.next.drain());
    }

    /// Number of writes waiting for the next commit
    pub fn staged_len(&self) -> usize {
        self.next.len()
    }

    /// Number of wires with a committed value
    pub fn known_wires(&self) -> usize {
        self.current.len()
    }
}
