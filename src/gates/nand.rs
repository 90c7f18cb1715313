use crate::core::builder::CircuitBuilder;
use crate::core::components::{ComponentDef, EvaluationContext, Inputs, Outputs};
use crate::core::errors::Result;
use crate::core::types::Bus;
use crate::gates::zip_wires;

/// The primitive gate: `q = !(a & b)`, bitwise over equally wide buses.
///
/// Its build function only allocates the output bus. All behavior comes from
/// the registered evaluator.
#[derive(Debug, Clone, Copy, Default)]
pub struct Nand;

impl ComponentDef for Nand {
    const NAME: &'static str = "nand";
    const INPUTS: &'static [&'static str] = &["a", "b"];

    fn build(_builder: &mut CircuitBuilder, inputs: &Inputs) -> Result<Outputs> {
        let a = inputs.bus("a")?;
        let b = inputs.bus("b")?;
        a.ensure_same_width(b)?;
        Ok(Outputs::new().with("q", Bus::new(a.len())?))
    }
}

pub(crate) fn evaluate(ctx: &mut EvaluationContext<'_>) -> Result<()> {
    zip_wires(ctx, |a, b| !(a && b))
}
