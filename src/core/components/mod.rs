pub mod component;
pub mod evaluation_context;
pub mod registry;
pub mod traits;

// Re-export commonly used types
pub use component::{Component, ComponentKind, Connection, Inputs, Outputs, Ports};
pub use evaluation_context::EvaluationContext;
pub use registry::{EvaluateFn, Primitive, PrimitiveRegistry};
pub use traits::ComponentDef;
