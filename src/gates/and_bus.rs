use crate::core::components::{EvaluationContext, Outputs};
use crate::core::errors::{CircuitError, Result};
use crate::gates::And;

circuit! {
    /// One-wire AND of every wire of `a`.
    ///
    /// Built as a chain of [`And`] gates, so a w-wide input settles after
    /// `2 * (w - 1)` steps on the pure-NAND backend.
    name: AndBus,
    component_name: "and_bus",
    inputs: [a],
    build: |builder, inputs| {
        let wires = inputs.bus("a")?.split();
        let (first, rest) = match wires.split_first() {
            Some((first, rest)) if !rest.is_empty() => (first, rest),
            _ => return Err(CircuitError::configuration("At least 2 input wires are required")),
        };
        let mut q = first.clone();
        for wire in rest {
            q = builder.build::<And>([q, wire.clone()])?.output("q")?;
        }
        Ok(Outputs::new().with("q", q))
    }
}

pub(crate) fn evaluate(ctx: &mut EvaluationContext<'_>) -> Result<()> {
    let a = ctx.input("a")?;
    let all_set = a.wires().iter().all(|wire| ctx.read_wire(*wire));
    let q = ctx.output("q")?;
    for wire in q.wires() {
        ctx.write_wire(*wire, all_set)?;
    }
    Ok(())
}
