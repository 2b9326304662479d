//! Global atomic counters for harness observability.
//!
//! Counters are bumped silently at the call site. Call [`Metrics::flush`]
//! to emit current values as one `tracing::info!` event.

use std::sync::atomic::{AtomicU64, Ordering};

/// Global metrics singleton.
pub static METRICS: Metrics = Metrics::new();

/// Lock-free counters.
pub struct Metrics {
    invocations: AtomicU64,
    tasks_dispatched: AtomicU64,
    degraded_responses: AtomicU64,
    protocol_failures: AtomicU64,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    /// All counters at zero.
    pub const fn new() -> Self {
        Self {
            invocations: AtomicU64::new(0),
            tasks_dispatched: AtomicU64::new(0),
            degraded_responses: AtomicU64::new(0),
            protocol_failures: AtomicU64::new(0),
        }
    }

    /// Increment the orchestrator invocation counter.
    pub fn inc_invocations(&self) {
        self.invocations.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(metric = "invocations", "counter incremented");
    }

    /// Increment the counter of tasks handed to sub-agents.
    pub fn inc_tasks_dispatched(&self) {
        self.tasks_dispatched.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(metric = "tasks_dispatched", "counter incremented");
    }

    /// Increment the counter of agent responses with no usable JSON object.
    pub fn inc_degraded_responses(&self) {
        self.degraded_responses.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(metric = "degraded_responses", "counter incremented");
    }

    /// Increment the counter of orchestrator outputs rejected by the task parser.
    pub fn inc_protocol_failures(&self) {
        self.protocol_failures.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(metric = "protocol_failures", "counter incremented");
    }

    /// Emit all counters as a single `info!` event.
    pub fn flush(&self) {
        tracing::info!(
            metric = "flush",
            invocations = self.invocations(),
            tasks_dispatched = self.tasks_dispatched(),
            degraded_responses = self.degraded_responses(),
            protocol_failures = self.protocol_failures(),
        );
    }

    /// Current invocation count.
    pub fn invocations(&self) -> u64 {
        self.invocations.load(Ordering::Relaxed)
    }

    /// Current dispatched-task count.
    pub fn tasks_dispatched(&self) -> u64 {
        self.tasks_dispatched.load(Ordering::Relaxed)
    }

    /// Current degraded-response count.
    pub fn degraded_responses(&self) -> u64 {
        self.degraded_responses.load(Ordering::Relaxed)
    }

    /// Current protocol-failure count.
    pub fn protocol_failures(&self) -> u64 {
        self.protocol_failures.load(Ordering::Relaxed)
    }

    /// Reset all counters to zero (useful in tests).
    pub fn reset(&self) {
        self.invocations.store(0, Ordering::Relaxed);
        self.tasks_dispatched.store(0, Ordering::Relaxed);
        self.degraded_responses.store(0, Ordering::Relaxed);
        self.protocol_failures.store(0, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_increment() {
        let m = Metrics::new();
        m.inc_invocations();
        m.inc_tasks_dispatched();
        m.inc_tasks_dispatched();
        m.inc_degraded_responses();
        assert_eq!(m.invocations(), 1);
        assert_eq!(m.tasks_dispatched(), 2);
        assert_eq!(m.degraded_responses(), 1);
        assert_eq!(m.protocol_failures(), 0);
    }

    #[test]
    fn reset_zeroes_all() {
        let m = Metrics::new();
        m.inc_invocations();
        m.inc_protocol_failures();
        m.reset();
        assert_eq!(m.invocations(), 0);
        assert_eq!(m.protocol_failures(), 0);
    }
}
