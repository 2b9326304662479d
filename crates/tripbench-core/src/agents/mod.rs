//! Sub-agents: prompt building and response parsing around a Model Adapter.
//!
//! # Module layout
//!
//! - [`Agent`]: the execution contract every role implements
//! - [`AgentRegistry`]: role name → agent lookup used by the orchestrator
//! - [`flight`], [`hotel`]: candidate-backed booking agents
//! - [`planner`]: day-by-day activity planner
//! - [`extract`]: brace-depth JSON extraction from raw model text
//! - [`ranking`]: shared filter/sort/top-K selection

pub mod extract;
pub mod flight;
pub mod hotel;
pub mod planner;
pub mod ranking;

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::task::Payload;
use crate::metrics::METRICS;
use crate::model::{GenerationOptions, GenerationResult, ModelAdapter};

pub use flight::FlightAgent;
pub use hotel::HotelAgent;
pub use planner::PlannerAgent;

/// Role served by [`FlightAgent`].
pub const FLIGHT_ROLE: &str = "FlightAgent";
/// Role served by [`HotelAgent`].
pub const HOTEL_ROLE: &str = "HotelAgent";
/// Role served by [`PlannerAgent`].
pub const PLANNER_ROLE: &str = "PlannerAgent";

/// Line preceding the embedded candidate array in booking prompts.
pub const CANDIDATE_DB_HEADER: &str = "CANDIDATE_DB (JSON array, top filtered rows):";
/// Suffix of the line preceding the fallback object in every agent prompt.
pub const FALLBACK_HEADER_SUFFIX: &str = "return:";

/// A role-specific sub-agent.
///
/// Implementors supply prompt building and response parsing; [`Agent::run`]
/// composes them around the model call. `parse_response` must never fail:
/// unusable output degrades to neutral defaults.
#[async_trait]
pub trait Agent: Send + Sync {
    fn role(&self) -> &str;

    fn model(&self) -> &dyn ModelAdapter;

    /// Deterministic for a given payload and candidate store.
    fn build_prompt(&self, task: &Payload) -> String;

    fn parse_response(&self, raw: &str, task: &Payload) -> Payload;

    fn options(&self) -> GenerationOptions {
        GenerationOptions::default()
    }

    /// Build the prompt, call the model once, parse. No retry, no caching.
    async fn run(&self, task: &Payload) -> GenerationResult<Payload> {
        let prompt = self.build_prompt(task);
        let raw = self.model().generate(&prompt, &self.options()).await?;
        Ok(self.parse_response(&raw, task))
    }
}

/// Extract the response object, logging and counting a degradation when absent.
pub(crate) fn extract_or_empty(role: &str, raw: &str) -> Payload {
    match extract::first_json_object(raw) {
        Some(obj) => obj,
        None => {
            crate::obs::emit_agent_degraded(role, raw.len());
            METRICS.inc_degraded_responses();
            Payload::new()
        }
    }
}

/// Insert `value` under `key` unless the key is already present.
pub(crate) fn set_default(obj: &mut Payload, key: &str, value: impl Into<serde_json::Value>) {
    obj.entry(key.to_string()).or_insert_with(|| value.into());
}

/// Agents addressable by role name.
#[derive(Default, Clone)]
pub struct AgentRegistry {
    agents: BTreeMap<String, Arc<dyn Agent>>,
}

impl AgentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `agent` under its own role, returning any agent it replaced.
    pub fn register(&mut self, agent: Arc<dyn Agent>) -> Option<Arc<dyn Agent>> {
        self.agents.insert(agent.role().to_string(), agent)
    }

    /// Flight, hotel and planner agents sharing one model.
    pub fn standard(
        model: Arc<dyn ModelAdapter>,
        flights_path: impl Into<std::path::PathBuf>,
        hotels_path: impl Into<std::path::PathBuf>,
    ) -> Self {
        Self::new()
            .with(Arc::new(FlightAgent::new(Arc::clone(&model), flights_path)))
            .with(Arc::new(HotelAgent::new(Arc::clone(&model), hotels_path)))
            .with(Arc::new(PlannerAgent::new(model)))
    }

    /// Builder-style [`AgentRegistry::register`].
    pub fn with(mut self, agent: Arc<dyn Agent>) -> Self {
        self.register(agent);
        self
    }

    pub fn get(&self, role: &str) -> Option<&Arc<dyn Agent>> {
        self.agents.get(role)
    }

    pub fn roles(&self) -> impl Iterator<Item = &str> {
        self.agents.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}

impl std::fmt::Debug for AgentRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentRegistry")
            .field("roles", &self.agents.keys().collect::<Vec<_>>())
            .finish()
    }
}
