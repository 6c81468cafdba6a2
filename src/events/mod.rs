/*!
 * Event Sink
 * Serialized console output for process lifecycle events
 */

mod log;

pub use self::log::{CaptureSink, EventLog};
