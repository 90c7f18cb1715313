use crate::core::errors::{CircuitError, Result};
use std::fmt;
use std::ops::Range;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Identity of a single binary signal.
///
/// A wire carries no value of its own; values live in the simulation state and
/// are looked up by wire identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Wire(u64);

impl Wire {
    /// Allocate a fresh, process-unique wire
    pub fn new() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        Wire(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

impl Default for Wire {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Wire {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "w{}", self.0)
    }
}

/// Fixed-width ordered group of wires. Wire 0 is the least significant bit.
///
/// Buses share their wires: cloning, slicing or splitting a bus yields new
/// buses over the same signals.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Bus {
    wires: Arc<[Wire]>,
}

impl Bus {
    /// Create a bus of `width` fresh wires
    pub fn new(width: usize) -> Result<Self> {
        if width < 1 {
            return Err(CircuitError::configuration(
                "A bus should have a positive number of wires",
            ));
        }
        Ok(Self {
            wires: (0..width).map(|_| Wire::new()).collect(),
        })
    }

    /// Wrap existing wires, in order
    pub fn from_wires(wires: impl IntoIterator<Item = Wire>) -> Result<Self> {
        let wires: Arc<[Wire]> = wires.into_iter().collect();
        if wires.is_empty() {
            return Err(CircuitError::configuration(
                "A bus should have a positive number of wires",
            ));
        }
        Ok(Self { wires })
    }

    /// One-wire bus over an existing wire
    pub fn single(wire: Wire) -> Self {
        Self {
            wires: Arc::from(vec![wire]),
        }
    }

    pub fn len(&self) -> usize {
        self.wires.len()
    }

    pub fn wires(&self) -> &[Wire] {
        &self.wires
    }

    pub fn wire(&self, index: usize) -> Option<Wire> {
        self.wires.get(index).copied()
    }

    pub fn contains(&self, wire: Wire) -> bool {
        self.wires.contains(&wire)
    }

    /// Bus over a contiguous run of this bus's wires
    pub fn slice(&self, range: Range<usize>) -> Result<Bus> {
        if range.start >= range.end || range.end > self.len() {
            return Err(CircuitError::configuration(format!(
                "Slice {:?} is not a valid non-empty range of {}",
                range, self
            )));
        }
        Bus::from_wires(self.wires[range].iter().copied())
    }

    /// One single-wire bus per wire, least significant first
    pub fn split(&self) -> Vec<Bus> {
        self.wires.iter().copied().map(Bus::single).collect()
    }

    pub fn ensure_same_width(&self, other: &Bus) -> Result<()> {
        if self.len() != other.len() {
            return Err(CircuitError::configuration(format!(
                "Bus sizes do not match: {} != {}",
                self, other
            )));
        }
        Ok(())
    }
}

impl fmt::Display for Bus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bus[{}]", self.len())
    }
}
