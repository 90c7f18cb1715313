pub mod config;
pub mod extraction;
pub mod simulator;
pub mod state;

// Re-export commonly used types
pub use config::{ConcurrencyMode, SimulationConfig};
pub use extraction::{extract, extract_single_primitive, Extraction};
pub use simulator::Simulator;
pub use state::{Signal, SignalValue, SimulationState, MAX_WORD_WIDTH};
