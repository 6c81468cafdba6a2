/*!
 * ProcSim - Main Entry Point
 *
 * Thin driver over the process registry:
 * - one process created by the user
 * - one created by the kernel
 * - one created by process 1
 * then wait for all workers and show the final status table.
 */

use procsim::{init_tracing, EventLog, ProcessRegistry};
use std::error::Error;
use std::sync::Arc;
use tracing::info;

fn main() -> Result<(), Box<dyn Error>> {
    // Initialize structured tracing (stderr; stdout is the event surface)
    init_tracing();

    info!("ProcSim starting...");

    let events = EventLog::to_stdout();
    let registry = ProcessRegistry::new(Arc::clone(&events));

    registry.create_by_user();
    registry.create_by_kernel();
    registry.create_by_process(1);

    registry.wait_for_all();
    registry.show_status();

    // Optional machine-readable snapshot after the console block
    let dump_json = std::env::var("PROCSIM_STATUS_JSON")
        .map(|v| v == "1" || v == "true")
        .unwrap_or(false);
    if dump_json {
        serde_json::to_writer_pretty(std::io::stdout().lock(), &registry.status_snapshot())?;
        println!();
    }

    info!(processes = registry.len(), "ProcSim finished");
    Ok(())
}
