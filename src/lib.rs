//! bfff: a brute-force function finder.
//!
//! Given example cases (input tuples and the number each should produce),
//! enumerates every expression tree up to a depth bound over a fixed menu of
//! arithmetic, bitwise and math primitives, and reports the ones that
//! reproduce every case, simplified and ranked by cost.

pub mod catalog;
pub mod error;
pub mod ir;
pub mod search;
pub mod semantics;
pub mod validation;

pub use catalog::{Catalog, CatalogPreset};
pub use error::{ConfigError, WorkerError};
pub use ir::{Case, Expr};
pub use search::{BatchResult, SearchConfig, Session, create_session};
