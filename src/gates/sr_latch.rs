use crate::core::components::Outputs;
use crate::core::types::Bus;
use crate::gates::Nand;

circuit! {
    /// Set/reset latch from two cross-coupled NANDs. Both inputs are active
    /// low: `s = 0` sets `q`, `r = 0` resets it, and `s = r = 1` holds.
    ///
    /// The first NAND is built against a placeholder bus that is then
    /// connected to the second NAND's output, closing the loop.
    name: SrLatch,
    component_name: "sr_latch",
    inputs: [s, r],
    build: |builder, inputs| {
        let s = inputs.bus("s")?;
        let r = inputs.bus("r")?;
        s.ensure_same_width(r)?;

        let feedback = Bus::new(s.len())?;
        let q = builder.build::<Nand>([s.clone(), feedback.clone()])?.output("q")?;
        let q_not = builder.build::<Nand>([r.clone(), q.clone()])?.output("q")?;
        builder.connect(&q_not, &feedback)?;

        Ok(Outputs::new().with("q", q).with("q_not", q_not))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::execution::Simulator;
    use crate::gates::test_support::{registries, single_bit};

    fn outputs(sim: &Simulator) -> (u64, u64) {
        let values = sim.get_output_values().unwrap();
        (values["q"], values["q_not"])
    }

    fn drive(sim: &mut Simulator, s: u64, r: u64, steps: usize) -> Vec<(u64, u64)> {
        sim.set_input_values([("s", s), ("r", r)]).unwrap();
        (0..steps)
            .map(|_| {
                sim.step().unwrap();
                outputs(sim)
            })
            .collect()
    }

    #[test]
    fn test_set_and_reset_settle() {
        for (_, registry) in registries() {
            let mut sim = single_bit::<SrLatch>(registry.clone());
            assert_eq!(drive(&mut sim, 0, 1, 3), vec![(1, 1), (1, 0), (1, 0)]);

            let mut sim = single_bit::<SrLatch>(registry);
            assert_eq!(drive(&mut sim, 1, 0, 3), vec![(1, 1), (0, 1), (0, 1)]);
        }
    }

    #[test]
    fn test_set_and_reset_together_force_both_high() {
        for (_, registry) in registries() {
            let mut sim = single_bit::<SrLatch>(registry);
            assert_eq!(drive(&mut sim, 0, 0, 3), vec![(1, 1); 3]);

            // Same outcome starting from the reset state
            drive(&mut sim, 1, 0, 2);
            assert_eq!(drive(&mut sim, 0, 0, 3), vec![(1, 1); 3]);
        }
    }

    #[test]
    fn test_hold_remembers_last_write() {
        for (_, registry) in registries() {
            let mut sim = single_bit::<SrLatch>(registry);

            drive(&mut sim, 0, 1, 2);
            assert_eq!(drive(&mut sim, 1, 1, 4), vec![(1, 0); 4]);

            drive(&mut sim, 1, 0, 2);
            assert_eq!(drive(&mut sim, 1, 1, 4), vec![(0, 1); 4]);
        }
    }

    #[test]
    fn test_hold_from_zero_state_oscillates() {
        for (_, registry) in registries() {
            let mut sim = single_bit::<SrLatch>(registry);
            assert_eq!(
                drive(&mut sim, 1, 1, 4),
                vec![(1, 1), (0, 0), (1, 1), (0, 0)]
            );
        }
    }

    #[test]
    fn test_feedback_is_recorded_as_a_connection() {
        let (_, registry) = registries().remove(0);
        let sim = single_bit::<SrLatch>(registry);
        let root = sim.root();
        assert_eq!(root.subcomponents().len(), 2);
        assert_eq!(root.connections().len(), 1);
        assert_eq!(root.connections()[0].source, root.output("q_not").unwrap());
    }
}
