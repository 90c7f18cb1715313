use crate::core::components::Outputs;
use crate::core::types::Bus;
use crate::gates::Not;

circuit! {
    /// Free-running one-wire clock: an inverter fed back into itself, so `q`
    /// flips on every step.
    name: Clock,
    component_name: "clock",
    inputs: [],
    build: |builder, _inputs| {
        let feedback = Bus::new(1)?;
        let q = builder.build::<Not>([feedback.clone()])?.output("q")?;
        builder.connect(&q, &feedback)?;
        Ok(Outputs::new().with("q", q))
    }
}
