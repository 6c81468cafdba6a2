/*!
 * Process Worker
 *
 * Drives one process through the lifecycle script on its own OS thread.
 * The thread runs the script to completion; there is no cancellation.
 * Faults (failed spawn, rejected transition, panic) stay local to the one
 * worker and are reported through tracing, leaving the registry and every
 * other process untouched.
 */

use super::entity::Process;
use super::script::ScriptStep;
use super::types::ProcessResult;
use crate::core::types::Pid;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::{debug, error};

/// Handle to one process's lifecycle thread.
pub struct ProcessWorker {
    pid: Pid,
    handle: Option<JoinHandle<()>>,
}

impl ProcessWorker {
    /// Spawn the lifecycle thread for `process`.
    ///
    /// A spawn failure leaves the worker inert: the process stays in the
    /// table in its current state and `join` is a no-op.
    pub fn launch(process: Arc<Process>, script: Vec<ScriptStep>) -> Self {
        let pid = process.pid();
        let handle = thread::Builder::new()
            .name(format!("process-{pid}"))
            .spawn(move || run_script(&process, &script));

        let handle = match handle {
            Ok(handle) => {
                debug!(pid, "lifecycle worker spawned");
                Some(handle)
            }
            Err(e) => {
                error!(pid, error = %e, "failed to spawn lifecycle worker");
                None
            }
        };

        Self { pid, handle }
    }

    #[inline]
    #[must_use]
    pub const fn pid(&self) -> Pid {
        self.pid
    }

    /// Take the join handle, leaving the worker joined-out.
    ///
    /// Returns `None` once the handle has been taken (or never existed),
    /// which makes repeated waits a safe no-op.
    pub fn take_handle(&mut self) -> Option<JoinHandle<()>> {
        self.handle.take()
    }

    /// Block until the lifecycle thread finishes.
    ///
    /// Safe to call on an already-joined worker. A panicked worker is
    /// reported and absorbed here.
    pub fn join(&mut self) {
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                error!(pid = self.pid, "lifecycle worker terminated abnormally");
            }
        }
    }
}

/// Interpret the script against one process, stopping at the first fault.
fn run_script(process: &Process, script: &[ScriptStep]) {
    for step in script {
        if let Err(e) = apply_step(process, step) {
            error!(pid = process.pid(), error = %e, "lifecycle script aborted");
            return;
        }
    }
    debug!(pid = process.pid(), "lifecycle script completed");
}

fn apply_step(process: &Process, step: &ScriptStep) -> ProcessResult<()> {
    match *step {
        ScriptStep::Enter(state) => process.transition_to(state),
        ScriptStep::Work {
            bursts,
            slice,
            usage_delta,
        } => {
            for _ in 0..bursts {
                // Sleep first, then account: no lock is held across the
                // sleep, and the progress line is emitted outside the
                // entity lock.
                thread::sleep(slice);
                let usage = process.increment_cpu_usage(usage_delta);
                process.events().line(format_args!(
                    "Process {} is running. CPU usage: {usage}",
                    process.pid()
                ));
            }
            Ok(())
        }
        ScriptStep::Idle(pause) => {
            thread::sleep(pause);
            Ok(())
        }
        ScriptStep::Finish => {
            process.transition_to(super::types::ProcessState::Terminated)?;
            process
                .events()
                .line(format_args!("Process {} Terminated!", process.pid()));
            Ok(())
        }
    }
}
