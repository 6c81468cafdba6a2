/*!
 * ProcSim Library
 * Educational process lifecycle simulator: per-process state machines on
 * independent threads, coordinated by a locked registry and a serialized
 * event sink
 */

pub mod core;
pub mod events;
pub mod monitoring;
pub mod process;

// Re-exports
pub use crate::core::types::Pid;
pub use events::{CaptureSink, EventLog};
pub use monitoring::init_tracing;
pub use process::{
    standard_script, Originator, Process, ProcessError, ProcessRegistry, ProcessResult,
    ProcessSnapshot, ProcessState, ProcessWorker, ScriptStep, ScriptTimings,
};
