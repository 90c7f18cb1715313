pub mod builder;
pub mod components;
pub mod errors;
pub mod execution;
pub mod simulate;
pub mod types;
