//! Semantic analysis of expressions: evaluation, cost and normalization

pub mod concrete;
pub mod cost;
pub mod normalize;

// Re-export main functionality
pub use concrete::{CaseCheck, check_cases, evaluate};
pub use cost::expr_cost;
pub use normalize::normalize;
