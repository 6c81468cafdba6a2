/*!
 * Lifecycle Script
 *
 * The fixed lifecycle every process executes, represented as data: a table
 * of steps driven by the worker's interpreter. Keeping the script as a
 * table lets tests run the identical sequence with compressed pacing.
 */

use super::types::ProcessState;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Number of simulated work bursts per lifecycle.
pub const WORK_BURSTS: u32 = 5;

/// CPU usage added per work burst.
pub const WORK_USAGE_DELTA: u64 = 10;

/// Wall-clock pacing for the lifecycle script.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ScriptTimings {
    /// Sleep per simulated work burst.
    pub work_slice: Duration,
    /// Idle time spent in `Waiting`.
    pub wait_pause: Duration,
    /// Idle time spent in the second `Running` stretch.
    pub resume_pause: Duration,
}

impl Default for ScriptTimings {
    fn default() -> Self {
        Self {
            work_slice: Duration::from_millis(500),
            wait_pause: Duration::from_millis(1000),
            resume_pause: Duration::from_millis(1000),
        }
    }
}

impl ScriptTimings {
    /// Millisecond-scale pacing for tests.
    #[inline]
    #[must_use]
    pub const fn compressed() -> Self {
        Self {
            work_slice: Duration::from_millis(1),
            wait_pause: Duration::from_millis(2),
            resume_pause: Duration::from_millis(2),
        }
    }
}

/// One step of the lifecycle script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptStep {
    /// Move the process to a new lifecycle state.
    Enter(ProcessState),
    /// Simulated CPU bursts: sleep one slice, bump the usage counter,
    /// report progress.
    Work {
        bursts: u32,
        slice: Duration,
        usage_delta: u64,
    },
    /// Idle without touching process state.
    Idle(Duration),
    /// Final transition to `Terminated` plus the termination notice.
    Finish,
}

/// The lifecycle script: ready -> running -> waiting -> running ->
/// terminated, with five work bursts in the first running stretch.
#[must_use]
pub fn standard_script(timings: ScriptTimings) -> Vec<ScriptStep> {
    vec![
        ScriptStep::Enter(ProcessState::Running),
        ScriptStep::Work {
            bursts: WORK_BURSTS,
            slice: timings.work_slice,
            usage_delta: WORK_USAGE_DELTA,
        },
        ScriptStep::Enter(ProcessState::Waiting),
        ScriptStep::Idle(timings.wait_pause),
        ScriptStep::Enter(ProcessState::Running),
        ScriptStep::Idle(timings.resume_pause),
        ScriptStep::Finish,
    ]
}
