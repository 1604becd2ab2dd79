//! Exhaustive search for expressions that reproduce a set of cases
//!
//! - [`enumerate`]: depth-bounded enumeration of candidate trees
//! - [`session`]: resumable, batch-at-a-time checking of candidates
//! - [`worker`]: a session driven from a background thread

pub mod config;
pub mod enumerate;
pub mod result;
pub mod session;
pub mod worker;

pub use config::SearchConfig;
pub use enumerate::{Enumerator, count_trees};
pub use result::{BatchResult, Pass, Ranking, SearchStatistics};
pub use session::{Session, create_session};
