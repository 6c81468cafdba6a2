/*!
 * Event Log
 *
 * The single serialized sink for the observable console surface. Every
 * lifecycle event (creation, state change, progress, status) is one line,
 * and each line is emitted atomically: the sink mutex is held across
 * format+write of that line only, never across sleeps or joins.
 *
 * The log is created by the driver and injected by handle (`Arc<EventLog>`)
 * into the registry and every process entity. It is the only writer to the
 * console surface; diagnostics go through `tracing` on stderr instead.
 */

use parking_lot::Mutex;
use std::fmt;
use std::io::{self, Write};
use std::sync::Arc;

/// Process-wide serialized line sink.
pub struct EventLog {
    sink: Mutex<Box<dyn Write + Send>>,
}

impl EventLog {
    /// Sink writing to standard output (the console contract).
    pub fn to_stdout() -> Arc<Self> {
        Self::with_sink(Box::new(io::stdout()))
    }

    /// Sink writing to an arbitrary writer.
    pub fn with_sink(sink: Box<dyn Write + Send>) -> Arc<Self> {
        Arc::new(Self {
            sink: Mutex::new(sink),
        })
    }

    /// Sink capturing everything in memory, returned alongside its buffer.
    ///
    /// Used by tests and embedders that assert on the emitted lines.
    pub fn capturing() -> (Arc<Self>, CaptureSink) {
        let capture = CaptureSink::default();
        (Self::with_sink(Box::new(capture.clone())), capture)
    }

    /// Emit one line atomically.
    ///
    /// The sink lock is the innermost lock in the system: callers must not
    /// hold it while taking any other lock, and it is released before the
    /// call returns.
    pub fn line(&self, args: fmt::Arguments<'_>) {
        let mut sink = self.sink.lock();
        if let Err(e) = writeln!(sink, "{args}").and_then(|()| sink.flush()) {
            tracing::warn!(error = %e, "event sink write failed");
        }
    }
}

impl fmt::Debug for EventLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventLog").finish_non_exhaustive()
    }
}

/// Cloneable in-memory sink for inspecting emitted lines.
#[derive(Clone, Default)]
pub struct CaptureSink {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl CaptureSink {
    /// Everything written so far, as UTF-8 text.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buffer.lock()).into_owned()
    }

    /// Captured output split into lines.
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_owned).collect()
    }
}

impl Write for CaptureSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn captured_lines_round_trip() {
        let (log, capture) = EventLog::capturing();
        log.line(format_args!("Process 1 Terminated!"));
        log.line(format_args!("Process 2: READY"));

        assert_eq!(
            capture.lines(),
            vec!["Process 1 Terminated!", "Process 2: READY"]
        );
    }

    #[test]
    fn concurrent_writers_never_interleave_within_a_line() {
        let (log, capture) = EventLog::capturing();

        let writers: Vec<_> = (0..8)
            .map(|w| {
                let log = Arc::clone(&log);
                thread::spawn(move || {
                    for i in 0..100 {
                        log.line(format_args!("writer {w} line {i} end"));
                    }
                })
            })
            .collect();
        for writer in writers {
            writer.join().unwrap();
        }

        let lines = capture.lines();
        assert_eq!(lines.len(), 800);
        for line in lines {
            assert!(
                line.starts_with("writer ") && line.ends_with(" end"),
                "torn line: {line:?}"
            );
        }
    }
}
