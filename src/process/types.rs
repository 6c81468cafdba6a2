/*!
 * Process Types
 * Lifecycle states, creation originators, and process errors
 */

use crate::core::types::Pid;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Process operation result
pub type ProcessResult<T> = Result<T, ProcessError>;

/// Process errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProcessError {
    #[error("invalid state transition for process {pid}: {from:?} -> {to:?}")]
    InvalidStateTransition {
        pid: Pid,
        from: ProcessState,
        to: ProcessState,
    },
}

/// Process lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessState {
    /// Process is registered and ready to run (the only initial state)
    Ready,
    /// Process is currently running
    Running,
    /// Process is waiting for an event
    Waiting,
    /// Process is blocked on a resource (currently never assigned by the
    /// lifecycle script; kept in the closed set for future extension)
    Blocking,
    /// Process has terminated (terminal; no transition leaves this state)
    Terminated,
}

impl ProcessState {
    /// Console label for this state.
    #[inline]
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            ProcessState::Ready => "READY",
            ProcessState::Running => "RUNNING",
            ProcessState::Waiting => "WAITING",
            ProcessState::Blocking => "BLOCKING",
            ProcessState::Terminated => "TERMINATED",
        }
    }

    /// Check if no further transition may occur from this state.
    #[inline(always)]
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, ProcessState::Terminated)
    }
}

impl fmt::Display for ProcessState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Who requested a process creation
///
/// Shapes only the wording of the creation notice; carries no further
/// semantics. `Unknown` stands for a creation request with no recognized
/// attribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Originator {
    User,
    Kernel,
    Process(Pid),
    Unknown,
}

impl Originator {
    /// The console line announcing a creation attributed to this originator.
    #[must_use]
    pub fn creation_notice(self, pid: Pid) -> String {
        match self {
            Originator::User => format!("Process {pid} created by User."),
            // "Kernal" [sic] is the canonical console spelling
            Originator::Kernel => format!("Process {pid} created by Kernal."),
            Originator::Process(parent) => {
                format!("Process {pid} created by Process {parent}.")
            }
            Originator::Unknown => "Unknown creation!".to_string(),
        }
    }
}

/// Point-in-time view of one process, safe to copy out of the table
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ProcessSnapshot {
    pub pid: Pid,
    pub origin: Originator,
    pub state: ProcessState,
    pub cpu_usage: u64,
    pub resource_usage: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn state_labels_are_uppercase_console_names() {
        assert_eq!(ProcessState::Ready.label(), "READY");
        assert_eq!(ProcessState::Running.label(), "RUNNING");
        assert_eq!(ProcessState::Waiting.label(), "WAITING");
        assert_eq!(ProcessState::Blocking.label(), "BLOCKING");
        assert_eq!(ProcessState::Terminated.label(), "TERMINATED");
    }

    #[test]
    fn only_terminated_is_terminal() {
        assert!(ProcessState::Terminated.is_terminal());
        assert!(!ProcessState::Ready.is_terminal());
        assert!(!ProcessState::Running.is_terminal());
        assert!(!ProcessState::Waiting.is_terminal());
        assert!(!ProcessState::Blocking.is_terminal());
    }

    #[test]
    fn creation_notices_cover_every_originator() {
        assert_eq!(
            Originator::User.creation_notice(1),
            "Process 1 created by User."
        );
        assert_eq!(
            Originator::Kernel.creation_notice(2),
            "Process 2 created by Kernal."
        );
        assert_eq!(
            Originator::Process(1).creation_notice(3),
            "Process 3 created by Process 1."
        );
        assert_eq!(Originator::Unknown.creation_notice(4), "Unknown creation!");
    }

    #[test]
    fn snapshot_serializes_with_snake_case_fields() {
        let snapshot = ProcessSnapshot {
            pid: 1,
            origin: Originator::User,
            state: ProcessState::Terminated,
            cpu_usage: 50,
            resource_usage: 0,
        };

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["state"], "terminated");
        assert_eq!(json["origin"], "user");
        assert_eq!(json["cpu_usage"], 50);
    }
}
