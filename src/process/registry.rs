/*!
 * Process Registry
 *
 * Owns every process and its worker for the lifetime of a run. One table
 * lock guards the shared collection; the table only grows, identities are
 * never reused, and terminated processes stay registered as full history.
 *
 * Creation holds the table lock across registration, the creation notice,
 * and the worker launch, so the notice is always visible before the new
 * worker's first line. Waiting takes the pending join handles under the
 * lock and joins outside it, so a slow worker never blocks the table.
 */

use super::entity::Process;
use super::script::{standard_script, ScriptTimings};
use super::types::{Originator, ProcessSnapshot};
use super::worker::ProcessWorker;
use crate::core::types::Pid;
use crate::events::EventLog;
use parking_lot::Mutex;
use std::sync::Arc;
use std::thread::JoinHandle;
use tracing::{error, info};

#[derive(Default)]
struct RegistryTable {
    processes: Vec<Arc<Process>>,
    workers: Vec<ProcessWorker>,
}

/// The shared process table and its workers.
pub struct ProcessRegistry {
    table: Mutex<RegistryTable>,
    events: Arc<EventLog>,
    timings: ScriptTimings,
}

impl ProcessRegistry {
    /// Registry with the standard lifecycle pacing.
    pub fn new(events: Arc<EventLog>) -> Self {
        Self::with_timings(events, ScriptTimings::default())
    }

    /// Registry with explicit lifecycle pacing (tests use compressed
    /// timings).
    pub fn with_timings(events: Arc<EventLog>, timings: ScriptTimings) -> Self {
        Self {
            table: Mutex::new(RegistryTable::default()),
            events,
            timings,
        }
    }

    /// Create a process requested by the user.
    pub fn create_by_user(&self) -> Pid {
        self.create(Originator::User)
    }

    /// Create a process requested by the kernel.
    pub fn create_by_kernel(&self) -> Pid {
        self.create(Originator::Kernel)
    }

    /// Create a process requested by another process.
    pub fn create_by_process(&self, parent: Pid) -> Pid {
        self.create(Originator::Process(parent))
    }

    /// Register a new process, announce it, and launch its worker.
    ///
    /// The whole sequence runs under the table lock: the worker's first
    /// state-change line cannot appear ahead of the creation notice.
    pub fn create(&self, origin: Originator) -> Pid {
        let mut table = self.table.lock();

        let pid = table.processes.len() as Pid + 1;
        let process = Arc::new(Process::new(pid, origin, Arc::clone(&self.events)));
        table.processes.push(Arc::clone(&process));

        self.events
            .line(format_args!("{}", origin.creation_notice(pid)));

        table
            .workers
            .push(ProcessWorker::launch(process, standard_script(self.timings)));

        info!(pid, origin = ?origin, "process registered");
        pid
    }

    /// Block until every launched worker has finished, in registration
    /// order.
    ///
    /// Never cancels or signals workers; with no timeout anywhere, this
    /// blocks for as long as the slowest worker runs. Safe to call again
    /// after completion (waiting on an already-joined worker is a no-op).
    pub fn wait_for_all(&self) {
        let pending: Vec<(Pid, JoinHandle<()>)> = {
            let mut table = self.table.lock();
            table
                .workers
                .iter_mut()
                .filter_map(|worker| {
                    let pid = worker.pid();
                    worker.take_handle().map(|handle| (pid, handle))
                })
                .collect()
        };

        for (pid, handle) in pending {
            if handle.join().is_err() {
                error!(pid, "lifecycle worker terminated abnormally");
            }
        }
    }

    /// Print one status line per process, in registration order.
    ///
    /// Each line is a consistent snapshot of that process; the block as a
    /// whole is not a cross-process snapshot while workers still run.
    pub fn show_status(&self) {
        let table = self.table.lock();
        for process in &table.processes {
            self.events.line(format_args!(
                "Process {}: {}",
                process.pid(),
                process.snapshot_state_label()
            ));
        }
    }

    /// Serializable view of every process, in registration order.
    #[must_use]
    pub fn status_snapshot(&self) -> Vec<ProcessSnapshot> {
        let table = self.table.lock();
        table.processes.iter().map(|p| p.snapshot()).collect()
    }

    /// Look up a process by identity.
    #[must_use]
    pub fn get(&self, pid: Pid) -> Option<Arc<Process>> {
        let table = self.table.lock();
        table
            .processes
            .get(pid.checked_sub(1)? as usize)
            .map(Arc::clone)
    }

    /// Number of processes ever registered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.lock().processes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
