//! Run module
//!
//! A run is one pass of the pipeline. This module holds the orchestrator
//! that sequences the steps and the per-run log sink.

mod log;
mod orchestrator;

pub use log::{LogEntry, RunLog};
pub use orchestrator::{Orchestrator, RunOutcome};
