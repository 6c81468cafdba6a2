/*!
 * Monitoring Module
 * Ambient diagnostics for the simulator
 */

pub mod tracer;

pub use tracer::init_tracing;
