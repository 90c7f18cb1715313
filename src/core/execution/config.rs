//! Configuration for circuit simulation
//!
//! This module provides configuration types for controlling how the per-step
//! primitive pass is executed.

use serde::{Deserialize, Serialize};

/// Enumeration of supported concurrency modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConcurrencyMode {
    /// Primitives are evaluated in extraction order on the calling thread
    #[default]
    Sequential,
    /// Primitives are evaluated in parallel with Rayon
    Rayon,
}

/// Configuration for simulation execution
///
/// Every primitive reads only the committed state and writes only to the
/// stage, so both modes produce identical results.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// The concurrency mode to use for execution
    pub concurrency_mode: ConcurrencyMode,
    /// The size of the dedicated thread pool for parallel execution.
    /// Only relevant when concurrency_mode is Rayon; `None` uses the global pool.
    pub thread_pool_size: Option<usize>,
}

impl SimulationConfig {
    /// Create a new simulation configuration with default values
    ///
    /// Default configuration uses Sequential mode with no thread pool
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the concurrency mode for the simulation
    pub fn with_concurrency(mut self, mode: ConcurrencyMode) -> Self {
        self.concurrency_mode = mode;
        self
    }

    /// Set the thread pool size for parallel execution
    ///
    /// # Note
    /// This setting only affects execution when concurrency_mode is Rayon
    pub fn with_thread_pool_size(mut self, size: usize) -> Self {
        self.thread_pool_size = Some(size);
        self
    }

    pub fn is_parallel(&self) -> bool {
        self.concurrency_mode == ConcurrencyMode::Rayon
    }
}
