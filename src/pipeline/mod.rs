//! Run orchestration.

pub mod run;

pub use run::{LogSink, Orchestrator, ProgressSink, RunOptions, RunState, RunStatus};
