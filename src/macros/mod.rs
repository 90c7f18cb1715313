//! Declarative macros for circuit definitions.

#[macro_use]
pub mod component_macros;
