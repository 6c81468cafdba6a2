/*!
 * Process Entity
 *
 * One process's identity, lifecycle state, and usage counters behind a
 * single embedded lock. The lock guards exactly this entity's fields; no
 * two entities ever contend on the same lock, so unrelated processes
 * transition fully in parallel.
 *
 * Lock discipline on the transition path: the entity lock is taken for the
 * mutation and released before the event sink lock is taken for the console
 * line. The two are never held together, so a slow write cannot block other
 * threads reading or mutating this entity.
 */

use super::types::{Originator, ProcessError, ProcessResult, ProcessSnapshot, ProcessState};
use crate::core::types::Pid;
use crate::events::EventLog;
use parking_lot::Mutex;
use std::sync::Arc;

/// Fields guarded by the entity lock.
#[derive(Debug)]
struct Accounting {
    state: ProcessState,
    cpu_usage: u64,
    // Declared for memory/IO accounting; the lifecycle script never
    // mutates it.
    resource_usage: u64,
}

/// A single simulated process.
///
/// Owned by the registry for its lifetime; workers hold a non-owning
/// `Arc` and touch state only through the synchronized accessors. Not
/// `Clone`: identity and the embedded lock must stay stable while a worker
/// thread holds a reference.
pub struct Process {
    pid: Pid,
    origin: Originator,
    accounting: Mutex<Accounting>,
    events: Arc<EventLog>,
}

impl Process {
    /// Register a new process in the `Ready` state.
    pub fn new(pid: Pid, origin: Originator, events: Arc<EventLog>) -> Self {
        Self {
            pid,
            origin,
            accounting: Mutex::new(Accounting {
                state: ProcessState::Ready,
                cpu_usage: 0,
                resource_usage: 0,
            }),
            events,
        }
    }

    #[inline]
    #[must_use]
    pub const fn pid(&self) -> Pid {
        self.pid
    }

    #[inline]
    #[must_use]
    pub const fn origin(&self) -> Originator {
        self.origin
    }

    #[inline]
    #[must_use]
    pub fn events(&self) -> &EventLog {
        &self.events
    }

    /// Move the process to a new lifecycle state and announce it.
    ///
    /// Transitions out of `Terminated` are a programming error and are
    /// rejected, never silently ignored.
    pub fn transition_to(&self, next: ProcessState) -> ProcessResult<()> {
        let label = {
            let mut accounting = self.accounting.lock();
            if accounting.state.is_terminal() {
                return Err(ProcessError::InvalidStateTransition {
                    pid: self.pid,
                    from: accounting.state,
                    to: next,
                });
            }
            accounting.state = next;
            next.label()
        };

        self.events
            .line(format_args!("Process {} State Changed to: {label}", self.pid));
        Ok(())
    }

    /// Add simulated CPU time and return the new total.
    ///
    /// The caller reports progress with the returned value outside the
    /// entity lock.
    pub fn increment_cpu_usage(&self, delta: u64) -> u64 {
        let mut accounting = self.accounting.lock();
        accounting.cpu_usage += delta;
        accounting.cpu_usage
    }

    /// Console label of the current state, read under the entity lock.
    #[must_use]
    pub fn snapshot_state_label(&self) -> &'static str {
        self.accounting.lock().state.label()
    }

    #[must_use]
    pub fn state(&self) -> ProcessState {
        self.accounting.lock().state
    }

    #[must_use]
    pub fn cpu_usage(&self) -> u64 {
        self.accounting.lock().cpu_usage
    }

    #[must_use]
    pub fn resource_usage(&self) -> u64 {
        self.accounting.lock().resource_usage
    }

    /// Consistent point-in-time view of the whole entity.
    #[must_use]
    pub fn snapshot(&self) -> ProcessSnapshot {
        let accounting = self.accounting.lock();
        ProcessSnapshot {
            pid: self.pid,
            origin: self.origin,
            state: accounting.state,
            cpu_usage: accounting.cpu_usage,
            resource_usage: accounting.resource_usage,
        }
    }
}

impl std::fmt::Debug for Process {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let accounting = self.accounting.lock();
        f.debug_struct("Process")
            .field("pid", &self.pid)
            .field("origin", &self.origin)
            .field("state", &accounting.state)
            .field("cpu_usage", &accounting.cpu_usage)
            .field("resource_usage", &accounting.resource_usage)
            .finish()
    }
}
