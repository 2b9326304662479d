//! The orchestrator's output for one invocation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::scenario::Scenario;
use crate::domain::task::Payload;

/// Everything one orchestrator invocation produced.
///
/// `agent_results` groups outputs per role in dispatch order (duplicates kept
/// when a role is invoked several times). `dispatch_order` records the role of
/// every dispatched task so the original task order can be rebuilt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultBundle {
    pub scenario: Scenario,
    pub orchestrator_prompt: String,
    pub orchestrator_output: String,
    pub agent_results: BTreeMap<String, Vec<Payload>>,
    pub dispatch_order: Vec<String>,
}

impl ResultBundle {
    pub fn new(scenario: Scenario, orchestrator_prompt: String, orchestrator_output: String) -> Self {
        Self {
            scenario,
            orchestrator_prompt,
            orchestrator_output,
            agent_results: BTreeMap::new(),
            dispatch_order: Vec::new(),
        }
    }

    /// Append one agent output under its role.
    pub fn push_result(&mut self, role: &str, output: Payload) {
        self.agent_results
            .entry(role.to_string())
            .or_default()
            .push(output);
        self.dispatch_order.push(role.to_string());
    }

    /// Outputs recorded for `role`, in dispatch order.
    pub fn results_for(&self, role: &str) -> &[Payload] {
        self.agent_results
            .get(role)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn total_results(&self) -> usize {
        self.dispatch_order.len()
    }

    /// Rebuild the global dispatch sequence from the per-role lists.
    pub fn interleaved(&self) -> Vec<(&str, &Payload)> {
        let mut cursors: BTreeMap<&str, usize> = BTreeMap::new();
        let mut out = Vec::with_capacity(self.dispatch_order.len());
        for role in &self.dispatch_order {
            let cursor = cursors.entry(role.as_str()).or_insert(0);
            if let Some(output) = self.agent_results.get(role).and_then(|v| v.get(*cursor)) {
                out.push((role.as_str(), output));
            }
            *cursor += 1;
        }
        out
    }
}
