//! Background execution of a search session.
//!
//! A worker thread owns at most one [`Session`](crate::search::session::Session)
//! and answers [`Request`]s one at a time over crossbeam channels:
//!
//! - `init` builds a new session (replacing the old one) and answers `ready`
//!   or `error`
//! - `batch` runs one batch and answers `result`, or `error` if there is no
//!   session yet
//!
//! Dropping the [`WorkerHandle`] closes the channel and the thread exits.
//!
//! # Example
//!
//! ```ignore
//! let handle = spawn_worker(SearchConfig::default());
//! handle.call(Request::Init { cases, max_depth: 3 })?;
//! let response = handle.call(Request::Batch { count: 50_000 })?;
//! ```

pub mod channel;
pub mod handle;
pub mod protocol;

pub use handle::{Worker, WorkerHandle, serve, spawn_worker};
pub use protocol::{BatchReport, PassReport, Request, Response};
