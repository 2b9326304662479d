//! Structured lifecycle events for orchestrator invocations.
//!
//! Every event carries an `event` field so log pipelines can filter on it.
//! Failure and degradation events are emitted at `warn!`.

use tracing::{info, warn, Span};

/// Span tagging every event of one orchestrator invocation.
///
/// ```ignore
/// orchestrator.run(scenario).instrument(invocation_span(&id)).await
/// ```
pub fn invocation_span(invocation_id: &str) -> Span {
    tracing::info_span!("tripbench.invocation", invocation_id = %invocation_id)
}

pub fn emit_invocation_started(route: &str, legs: usize, model: &str) {
    info!(event = "invocation.started", route = %route, legs = legs, model = %model);
}

pub fn emit_invocation_parsed(tasks: usize, output_bytes: usize) {
    info!(event = "invocation.parsed", tasks = tasks, output_bytes = output_bytes);
}

pub fn emit_task_dispatched(seq: usize, role: &str, line: usize) {
    info!(event = "task.dispatched", seq = seq, role = %role, line = line);
}

/// An agent got unusable model output and fell back to neutral defaults.
pub fn emit_agent_degraded(role: &str, response_bytes: usize) {
    warn!(event = "agent.degraded", role = %role, response_bytes = response_bytes);
}

pub fn emit_invocation_finished(duration_ms: u64, total_results: usize) {
    info!(
        event = "invocation.finished",
        duration_ms = duration_ms,
        total_results = total_results,
    );
}

pub fn emit_invocation_failed(stage: &str, error: &dyn std::fmt::Display) {
    warn!(event = "invocation.failed", stage = %stage, error = %error);
}
