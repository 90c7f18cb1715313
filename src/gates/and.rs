use crate::core::components::{EvaluationContext, Outputs};
use crate::core::errors::Result;
use crate::gates::{zip_wires, Nand, Not};

circuit! {
    /// `q = a & b`, as an inverted NAND
    name: And,
    component_name: "and",
    inputs: [a, b],
    build: |builder, inputs| {
        let nand = builder.build::<Nand>([inputs.bus("a")?.clone(), inputs.bus("b")?.clone()])?;
        let not = builder.build::<Not>([nand.output("q")?])?;
        Ok(Outputs::new().with("q", not.output("q")?))
    }
}

pub(crate) fn evaluate(ctx: &mut EvaluationContext<'_>) -> Result<()> {
    zip_wires(ctx, |a, b| a && b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gates::test_support::{output, registries, single_bit};

    #[test]
    fn test_truth_table_settles_in_two_steps() {
        let table = [(0, 0, 0), (0, 1, 0), (1, 0, 0), (1, 1, 1)];
        for (label, registry) in registries() {
            for (a, b, q) in table {
                let mut sim = single_bit::<And>(registry.clone());
                sim.set_input_values([("a", a), ("b", b)]).unwrap();
                sim.steps(2).unwrap();
                assert_eq!(output(&sim, "q"), q, "{}: and({}, {})", label, a, b);
            }
        }
    }

    #[test]
    fn test_nand_only_needs_both_layers() {
        let (_, registry) = registries().remove(0);
        let mut sim = single_bit::<And>(registry);
        sim.set_input_values([("a", 0), ("b", 0)]).unwrap();
        sim.step().unwrap();
        // The inverter still sees the zeroed NAND output
        assert_eq!(output(&sim, "q"), 1);
        sim.step().unwrap();
        assert_eq!(output(&sim, "q"), 0);
    }
}
