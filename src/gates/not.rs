use crate::core::components::{EvaluationContext, Outputs};
use crate::core::errors::Result;
use crate::gates::{map_wires, Nand};

circuit! {
    /// Inverter: a NAND with both inputs tied to `a`
    name: Not,
    component_name: "not",
    inputs: [a],
    build: |builder, inputs| {
        let a = inputs.bus("a")?;
        let nand = builder.build::<Nand>([a.clone(), a.clone()])?;
        Ok(Outputs::new().with("q", nand.output("q")?))
    }
}

pub(crate) fn evaluate(ctx: &mut EvaluationContext<'_>) -> Result<()> {
    map_wires(ctx, |a| !a)
}
