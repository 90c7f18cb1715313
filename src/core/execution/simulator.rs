use crate::core::components::component::{Component, Connection};
use crate::core::components::evaluation_context::EvaluationContext;
use crate::core::components::registry::{EvaluateFn, PrimitiveRegistry};
use crate::core::components::traits::ComponentDef;
use crate::core::errors::{CircuitError, Result};
use crate::core::execution::config::SimulationConfig;
use crate::core::execution::extraction::{extract, extract_single_primitive, Extraction};
use crate::core::execution::state::SimulationState;
use crate::core::types::{Bus, Wire};
use log::{debug, trace};
use rayon::prelude::*;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

/// Extracted primitive paired with its evaluator
struct ScheduledPrimitive {
    component: Component,
    evaluate: EvaluateFn,
}

impl ScheduledPrimitive {
    /// Run the evaluator against the committed state and return its staged writes
    fn evaluate(&self, state: &SimulationState) -> Result<Vec<(Wire, bool)>> {
        let mut context = EvaluationContext::new(&self.component, state);
        (self.evaluate)(&mut context)?;
        Ok(context.into_staged())
    }
}

/// Discrete-time simulator over a flattened component hierarchy.
///
/// Each step evaluates every primitive against the values committed by the
/// previous step, then commits all staged outputs at once. A circuit whose
/// longest primitive path has depth D therefore needs D steps before its
/// outputs reflect an input change.
pub struct Simulator {
    root: Component,
    registry: Arc<PrimitiveRegistry>,
    primitives: Vec<ScheduledPrimitive>,
    state: SimulationState,
    config: SimulationConfig,
    thread_pool: Option<rayon::ThreadPool>,
    current_step: u64,
}

impl fmt::Debug for Simulator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Simulator")
            .field("root", &self.root.name())
            .field("primitives", &self.primitives.len())
            .field("current_step", &self.current_step)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Simulator {
    /// Simulate `root` with the default (sequential) configuration
    pub fn new(root: Component, registry: Arc<PrimitiveRegistry>) -> Result<Self> {
        Self::with_config(root, registry, SimulationConfig::default())
    }

    pub fn with_config(
        root: Component,
        registry: Arc<PrimitiveRegistry>,
        config: SimulationConfig,
    ) -> Result<Self> {
        let extraction = extract(&root, &registry)?;
        Self::from_extraction(root, registry, extraction, config)
    }

    /// Backend that only ever evaluates `T`: every childless leaf under `root`
    /// must be a `T`, and `registry` must provide its evaluator.
    pub fn single_primitive<T: ComponentDef>(
        root: Component,
        registry: Arc<PrimitiveRegistry>,
        config: SimulationConfig,
    ) -> Result<Self> {
        let extraction = extract_single_primitive::<T>(&root)?;
        Self::from_extraction(root, registry, extraction, config)
    }

    fn from_extraction(
        root: Component,
        registry: Arc<PrimitiveRegistry>,
        extraction: Extraction,
        config: SimulationConfig,
    ) -> Result<Self> {
        let Extraction {
            primitives,
            connections,
        } = extraction;

        if primitives.is_empty() {
            return Err(CircuitError::configuration(format!(
                "At least one component with a simulation function is needed under '{}'",
                root.name()
            )));
        }

        let primitives = primitives
            .into_iter()
            .map(|component| -> Result<ScheduledPrimitive> {
                let primitive = registry.get(component.kind()).ok_or_else(|| {
                    CircuitError::configuration(format!(
                        "No simulation function registered for '{}'",
                        component.name()
                    ))
                })?;
                Ok(ScheduledPrimitive {
                    evaluate: primitive.evaluate,
                    component,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let aliases = resolve_connections(&connections)?;
        for primitive in &primitives {
            for wire in primitive.component.outputs().buses().flat_map(Bus::wires) {
                if aliases.contains_key(wire) {
                    return Err(CircuitError::configuration(format!(
                        "Output wire {} of '{}' is also driven by a connection",
                        wire,
                        primitive.component.name()
                    )));
                }
            }
        }

        let mut state = SimulationState::with_aliases(aliases);
        for primitive in &primitives {
            let ports = primitive.component.inputs().buses();
            for wire in ports.chain(primitive.component.outputs().buses()).flat_map(Bus::wires) {
                state.write_wire(*wire, false);
            }
        }
        state.commit();

        let thread_pool = match (config.is_parallel(), config.thread_pool_size) {
            (true, Some(size)) => Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(size)
                    .build()
                    .map_err(|e| {
                        CircuitError::configuration(format!("Failed to build thread pool: {}", e))
                    })?,
            ),
            _ => None,
        };

        debug!(
            "Simulator for '{}': {} primitives, {} connections, {} wires, {:?} mode",
            root.name(),
            primitives.len(),
            connections.len(),
            state.known_wires(),
            config.concurrency_mode
        );

        Ok(Self {
            root,
            registry,
            primitives,
            state,
            config,
            thread_pool,
            current_step: 0,
        })
    }

    /// Evaluate every primitive once and commit the results
    pub fn step(&mut self) -> Result<()> {
        let writes = if self.config.is_parallel() {
            self.evaluate_parallel()?
        } else {
            self.evaluate_sequential()?
        };

        let staged = writes.len();
        self.state.stage(writes);
        self.state.commit();
        self.current_step += 1;

        trace!("=== Step {} committed {} writes ===", self.current_step, staged);
        Ok(())
    }

    /// Run exactly `n` steps
    pub fn steps(&mut self, n: u64) -> Result<()> {
        for _ in 0..n {
            self.step()?;
        }
        debug!("Ran {} steps, now at step {}", n, self.current_step);
        Ok(())
    }

    fn evaluate_sequential(&self) -> Result<Vec<(Wire, bool)>> {
        let mut writes = Vec::new();
        for primitive in &self.primitives {
            writes.extend(primitive.evaluate(&self.state)?);
        }
        Ok(writes)
    }

    /// Evaluate on the Rayon pool. Writes are merged back in extraction order,
    /// so the outcome matches the sequential pass exactly.
    fn evaluate_parallel(&self) -> Result<Vec<(Wire, bool)>> {
        let primitives = &self.primitives;
        let state = &self.state;
        let run = move || {
            primitives
                .par_iter()
                .map(|primitive| primitive.evaluate(state))
                .collect::<Result<Vec<_>>>()
        };
        let batches = match &self.thread_pool {
            Some(pool) => pool.install(run)?,
            None => run()?,
        };
        Ok(batches.into_iter().flatten().collect())
    }

    /// Seed the root's input buses and commit immediately. No primitive runs.
    pub fn set_input_values<I, K>(&mut self, values: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, u64)>,
        K: AsRef<str>,
    {
        let mut resolved = Vec::new();
        for (name, value) in values {
            let bus = self.root.inputs().get(name.as_ref()).ok_or_else(|| {
                CircuitError::configuration(format!(
                    "'{}' has no input named '{}'",
                    self.root.name(),
                    name.as_ref()
                ))
            })?;
            resolved.push((bus.clone(), value));
        }

        for (bus, value) in &resolved {
            self.state.write_bus(bus, *value)?;
        }
        self.state.commit();
        Ok(())
    }

    /// Committed values of the root's output buses, by name
    pub fn get_output_values(&self) -> Result<BTreeMap<String, u64>> {
        self.root
            .outputs()
            .iter()
            .map(|(name, bus)| {
                self.state
                    .read_bus(bus)
                    .map(|value| (name.to_string(), value))
            })
            .collect()
    }

    pub fn root(&self) -> &Component {
        &self.root
    }

    pub fn registry(&self) -> &Arc<PrimitiveRegistry> {
        &self.registry
    }

    /// Extracted primitives, in evaluation order
    pub fn primitives(&self) -> impl Iterator<Item = &Component> {
        self.primitives.iter().map(|primitive| &primitive.component)
    }

    pub fn primitive_count(&self) -> usize {
        self.primitives.len()
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    /// Direct access for harnesses that poke individual wires or buses
    pub fn state_mut(&mut self) -> &mut SimulationState {
        &mut self.state
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn current_step(&self) -> u64 {
        self.current_step
    }
}

/// Map every connection destination wire to the wire that ultimately drives it
fn resolve_connections(connections: &[Connection]) -> Result<HashMap<Wire, Wire>> {
    let mut drivers: HashMap<Wire, Wire> = HashMap::new();
    for connection in connections {
        connection.source.ensure_same_width(&connection.destination)?;
        let pairs = connection
            .source
            .wires()
            .iter()
            .zip(connection.destination.wires());
        for (source, destination) in pairs {
            if source == destination {
                continue;
            }
            if let Some(previous) = drivers.insert(*destination, *source) {
                if previous != *source {
                    return Err(CircuitError::configuration(format!(
                        "Wire {} is driven by more than one connection",
                        destination
                    )));
                }
            }
        }
    }

    let mut aliases = HashMap::with_capacity(drivers.len());
    for destination in drivers.keys() {
        let mut driver = *destination;
        let mut hops = 0;
        while let Some(next) = drivers.get(&driver) {
            driver = *next;
            hops += 1;
            if hops > drivers.len() {
                return Err(CircuitError::configuration(format!(
                    "Connections through wire {} form a loop with no driver",
                    destination
                )));
            }
        }
        aliases.insert(*destination, driver);
    }
    Ok(aliases)
}
