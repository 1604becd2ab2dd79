//! Intermediate Representation (IR) for candidate expressions

pub mod expr;
pub mod types;

// Re-export commonly used types
pub use expr::{Expr, function_source};
pub use types::{Case, InputSlots, MAX_INPUTS, format_number, input_name};
