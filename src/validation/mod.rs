//! Validation of the example cases that drive a search

pub mod cases;

pub use cases::{load_cases, validate_cases};
