//! Gate library built out of NAND.
//!
//! Every gate here decomposes down to [`Nand`], so a circuit made of them runs on
//! the pure-NAND backend. The standard registry also carries direct evaluators
//! for the common gates, which turns them into leaves and cuts their settling
//! time to one step.

pub mod and;
pub mod and_bus;
pub mod clock;
pub mod nand;
pub mod not;
pub mod or;
pub mod sr_latch;
pub mod xor;

pub use and::And;
pub use and_bus::AndBus;
pub use clock::Clock;
pub use nand::Nand;
pub use not::Not;
pub use or::Or;
pub use sr_latch::SrLatch;
pub use xor::Xor;

use crate::core::components::Component;
use crate::core::components::{EvaluationContext, PrimitiveRegistry};
use crate::core::errors::Result;
use crate::core::execution::{SimulationConfig, Simulator};
use std::sync::Arc;

impl PrimitiveRegistry {
    /// Registry whose only primitive is [`Nand`]
    pub fn nand_only() -> Self {
        PrimitiveRegistry::new().with::<Nand>(nand::evaluate)
    }

    /// [`Nand`] plus direct evaluators for the common gates
    pub fn standard() -> Self {
        PrimitiveRegistry::nand_only()
            .with::<Not>(not::evaluate)
            .with::<And>(and::evaluate)
            .with::<Or>(or::evaluate)
            .with::<Xor>(xor::evaluate)
            .with::<AndBus>(and_bus::evaluate)
    }
}

impl Simulator {
    /// Pure-NAND backend: every childless leaf under `root` must be a [`Nand`]
    pub fn nand_only(root: Component) -> Result<Self> {
        Simulator::single_primitive::<Nand>(
            root,
            Arc::new(PrimitiveRegistry::nand_only()),
            SimulationConfig::default(),
        )
    }
}

/// Drive each wire of output `q` from the matching wire of input `a`.
///
/// Works wire by wire, so buses of any width evaluate the same way their NAND
/// decomposition does.
pub(crate) fn map_wires(ctx: &mut EvaluationContext<'_>, op: impl Fn(bool) -> bool) -> Result<()> {
    let a = ctx.input("a")?;
    let q = ctx.output("q")?;
    for (a, q) in a.wires().iter().zip(q.wires()) {
        let bit = op(ctx.read_wire(*a));
        ctx.write_wire(*q, bit)?;
    }
    Ok(())
}

/// Two-input counterpart of [`map_wires`] over inputs `a` and `b`
pub(crate) fn zip_wires(
    ctx: &mut EvaluationContext<'_>,
    op: impl Fn(bool, bool) -> bool,
) -> Result<()> {
    let a = ctx.input("a")?;
    let b = ctx.input("b")?;
    let q = ctx.output("q")?;
    for ((a, b), q) in a.wires().iter().zip(b.wires()).zip(q.wires()) {
        let bit = op(ctx.read_wire(*a), ctx.read_wire(*b));
        ctx.write_wire(*q, bit)?;
    }
    Ok(())
}
