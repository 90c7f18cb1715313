pub mod circuit_builder;

pub use circuit_builder::{CaptureScope, CircuitBuilder};
