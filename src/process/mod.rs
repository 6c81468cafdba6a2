/*!
 * Process Module
 * Process entities, lifecycle script, workers, and the registry
 */

pub mod entity;
pub mod registry;
pub mod script;
pub mod types;
pub mod worker;

// Re-export for convenience
pub use entity::Process;
pub use registry::ProcessRegistry;
pub use script::{standard_script, ScriptStep, ScriptTimings, WORK_BURSTS, WORK_USAGE_DELTA};
pub use types::{Originator, ProcessError, ProcessResult, ProcessSnapshot, ProcessState};
pub use worker::ProcessWorker;
