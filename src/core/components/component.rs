use crate::core::components::traits::ComponentDef;
use crate::core::errors::{CircuitError, Result};
use crate::core::types::Bus;
use std::any::TypeId;
use std::fmt;
use std::sync::Arc;

/// Stable type identity of a component, used as the primitive dispatch key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ComponentKind {
    id: TypeId,
    name: &'static str,
}

impl ComponentKind {
    pub fn of<T: ComponentDef>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: T::NAME,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Ordered name -> bus mapping used for component inputs and outputs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ports {
    entries: Vec<(String, Bus)>,
}

/// Inputs handed to a build function, keyed by declared input name
pub type Inputs = Ports;
/// Outputs returned from a build function
pub type Outputs = Ports;

impl Ports {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a port, keeping first-insertion order
    pub fn insert(&mut self, name: impl Into<String>, bus: Bus) {
        let name = name.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = bus,
            None => self.entries.push((name, bus)),
        }
    }

    /// Builder-style insert
    pub fn with(mut self, name: impl Into<String>, bus: Bus) -> Self {
        self.insert(name, bus);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Bus> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, bus)| bus)
    }

    /// Like `get`, but a missing port is a configuration error
    pub fn bus(&self, name: &str) -> Result<&Bus> {
        self.get(name).ok_or_else(|| {
            CircuitError::configuration(format!(
                "Port '{}' not found. Valid ports: {:?}",
                name,
                self.names().collect::<Vec<_>>()
            ))
        })
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn buses(&self) -> impl Iterator<Item = &Bus> {
        self.entries.iter().map(|(_, bus)| bus)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Bus)> {
        self.entries.iter().map(|(name, bus)| (name.as_str(), bus))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, Bus)> for Ports {
    fn from_iter<I: IntoIterator<Item = (S, Bus)>>(iter: I) -> Self {
        let mut ports = Ports::new();
        for (name, bus) in iter {
            ports.insert(name, bus);
        }
        ports
    }
}

/// Feedback edge declared inside a build: every destination wire is driven by
/// the source wire at the same index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub source: Bus,
    pub destination: Bus,
}

#[derive(Debug)]
struct ComponentNode {
    name: String,
    kind: ComponentKind,
    inputs: Inputs,
    outputs: Outputs,
    subcomponents: Vec<Component>,
    connections: Vec<Connection>,
}

/// Named circuit node: input buses, output buses and its direct children.
///
/// A component is immutable once built. Cloning is cheap and yields another
/// handle to the same node.
#[derive(Debug, Clone)]
pub struct Component {
    node: Arc<ComponentNode>,
}

impl Component {
    pub(crate) fn assemble(
        kind: ComponentKind,
        inputs: Inputs,
        outputs: Outputs,
        subcomponents: Vec<Component>,
        connections: Vec<Connection>,
    ) -> Self {
        Self {
            node: Arc::new(ComponentNode {
                name: kind.name().to_string(),
                kind,
                inputs,
                outputs,
                subcomponents,
                connections,
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.node.name
    }

    pub fn kind(&self) -> ComponentKind {
        self.node.kind
    }

    pub fn is<T: ComponentDef>(&self) -> bool {
        self.node.kind == ComponentKind::of::<T>()
    }

    pub fn inputs(&self) -> &Inputs {
        &self.node.inputs
    }

    pub fn outputs(&self) -> &Outputs {
        &self.node.outputs
    }

    pub fn input(&self, name: &str) -> Result<Bus> {
        self.node.inputs.bus(name).cloned()
    }

    pub fn output(&self, name: &str) -> Result<Bus> {
        self.node.outputs.bus(name).cloned()
    }

    /// Direct children, in the order they were built
    pub fn subcomponents(&self) -> &[Component] {
        &self.node.subcomponents
    }

    pub fn connections(&self) -> &[Connection] {
        &self.node.connections
    }

    pub fn is_leaf(&self) -> bool {
        self.node.subcomponents.is_empty()
    }

    pub fn ptr_eq(&self, other: &Component) -> bool {
        Arc::ptr_eq(&self.node, &other.node)
    }

    fn fmt_level(&self, f: &mut fmt::Formatter<'_>, level: usize) -> fmt::Result {
        write!(
            f,
            "{}Component(Name: {}, Inputs: [{}], Outputs: [{}])",
            "  ".repeat(level),
            self.name(),
            self.inputs().names().collect::<Vec<_>>().join(", "),
            self.outputs().names().collect::<Vec<_>>().join(", "),
        )?;
        if !self.is_leaf() {
            write!(f, ",")?;
        }
        for child in self.subcomponents() {
            writeln!(f)?;
            child.fmt_level(f, level + 1)?;
        }
        Ok(())
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_level(f, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ports_keep_order_and_replace() {
        let a = Bus::new(1).unwrap();
        let b = Bus::new(2).unwrap();
        let c = Bus::new(3).unwrap();

        let mut ports = Ports::new().with("b", b.clone()).with("a", a.clone());
        assert_eq!(ports.names().collect::<Vec<_>>(), vec!["b", "a"]);

        ports.insert("b", c.clone());
        assert_eq!(ports.len(), 2);
        assert_eq!(ports.get("b"), Some(&c));
        assert_eq!(ports.names().collect::<Vec<_>>(), vec!["b", "a"]);
    }

    #[test]
    fn test_missing_port_lists_valid_ports() {
        let ports: Ports = vec![("q", Bus::new(1).unwrap())].into_iter().collect();
        let err = ports.bus("out").unwrap_err();
        assert!(matches!(err, CircuitError::Configuration(_)));
        assert!(err.message().contains("'out'"));
        assert!(err.message().contains("\"q\""));
    }
}
