use crate::core::components::{EvaluationContext, Outputs};
use crate::core::errors::Result;
use crate::gates::{zip_wires, Nand};

circuit! {
    /// `q = a ^ b` from four NANDs, three layers deep
    name: Xor,
    component_name: "xor",
    inputs: [a, b],
    build: |builder, inputs| {
        let a = inputs.bus("a")?;
        let b = inputs.bus("b")?;
        let both = builder.build::<Nand>([a.clone(), b.clone()])?.output("q")?;
        let left = builder.build::<Nand>([a.clone(), both.clone()])?.output("q")?;
        let right = builder.build::<Nand>([b.clone(), both])?.output("q")?;
        let q = builder.build::<Nand>([left, right])?.output("q")?;
        Ok(Outputs::new().with("q", q))
    }
}

pub(crate) fn evaluate(ctx: &mut EvaluationContext<'_>) -> Result<()> {
    zip_wires(ctx, |a, b| a != b)
}
