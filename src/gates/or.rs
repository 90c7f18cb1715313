use crate::core::components::{EvaluationContext, Outputs};
use crate::core::errors::Result;
use crate::gates::{zip_wires, Nand, Not};

circuit! {
    /// `q = a | b`, by De Morgan: NAND of both inverted inputs
    name: Or,
    component_name: "or",
    inputs: [a, b],
    build: |builder, inputs| {
        let not_a = builder.build::<Not>([inputs.bus("a")?.clone()])?;
        let not_b = builder.build::<Not>([inputs.bus("b")?.clone()])?;
        let nand = builder.build::<Nand>([not_a.output("q")?, not_b.output("q")?])?;
        Ok(Outputs::new().with("q", nand.output("q")?))
    }
}

pub(crate) fn evaluate(ctx: &mut EvaluationContext<'_>) -> Result<()> {
    zip_wires(ctx, |a, b| a || b)
}
