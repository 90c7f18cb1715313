use std::fmt;

/// Errors raised while building or simulating a circuit.
///
/// Every variant is a usage error: nothing here is transient, so callers are
/// expected to fix the circuit rather than retry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CircuitError {
    /// The circuit is wired or declared in a way the simulator cannot accept
    Configuration(String),
    /// A bit was supplied where a word was expected, or the reverse
    ValueType(String),
}

impl CircuitError {
    pub fn configuration(msg: impl Into<String>) -> Self {
        CircuitError::Configuration(msg.into())
    }

    pub fn value_type(msg: impl Into<String>) -> Self {
        CircuitError::ValueType(msg.into())
    }

    /// Message without the error kind prefix
    pub fn message(&self) -> &str {
        match self {
            CircuitError::Configuration(msg) | CircuitError::ValueType(msg) => msg,
        }
    }
}

impl fmt::Display for CircuitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CircuitError::Configuration(msg) => write!(f, "Configuration error: {}", msg),
            CircuitError::ValueType(msg) => write!(f, "Value type error: {}", msg),
        }
    }
}

impl std::error::Error for CircuitError {}

pub type Result<T> = std::result::Result<T, CircuitError>;
