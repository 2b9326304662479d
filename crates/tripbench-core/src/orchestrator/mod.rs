//! Orchestrator control loop.
//!
//! One invocation walks a fixed state machine:
//!
//! ```text
//! Init → PromptBuilt → ModelInvoked → Parsed → Dispatching → Done
//! ```
//!
//! `Parsed` requires at least one task and `Dispatching` requires every
//! referenced role to be registered; either failure ends the invocation with
//! no partial bundle. Dispatch is sequential in task order and nothing is
//! retried here.

pub mod prompt;

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, Instrument};

use crate::agents::AgentRegistry;
use crate::domain::bundle::ResultBundle;
use crate::domain::error::OrchestratorError;
use crate::domain::scenario::Scenario;
use crate::metrics::METRICS;
use crate::model::{GenerationOptions, ModelAdapter};
use crate::obs;
use crate::protocol::{parse_tasks, ProtocolError};

pub use prompt::{build_orchestrator_prompt, LEG_TABLE_HEADER};

/// Pure prompt builder: scenario in, orchestrator prompt out.
pub type PromptBuilder = fn(&Scenario) -> String;

/// Stages of a single invocation, reported on failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvocationState {
    Init,
    PromptBuilt,
    ModelInvoked,
    Parsed,
    Dispatching,
    Done,
}

impl fmt::Display for InvocationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            InvocationState::Init => "init",
            InvocationState::PromptBuilt => "prompt_built",
            InvocationState::ModelInvoked => "model_invoked",
            InvocationState::Parsed => "parsed",
            InvocationState::Dispatching => "dispatching",
            InvocationState::Done => "done",
        };
        write!(f, "{s}")
    }
}

/// Plans a trip with one model call, then dispatches the resulting tasks.
pub struct Orchestrator {
    model: Arc<dyn ModelAdapter>,
    registry: AgentRegistry,
    prompt_builder: PromptBuilder,
    options: GenerationOptions,
}

impl Orchestrator {
    /// Orchestrator using [`build_orchestrator_prompt`] and default options.
    pub fn new(model: Arc<dyn ModelAdapter>, registry: AgentRegistry) -> Self {
        Self {
            model,
            registry,
            prompt_builder: build_orchestrator_prompt,
            options: GenerationOptions::default(),
        }
    }

    pub fn with_prompt_builder(mut self, prompt_builder: PromptBuilder) -> Self {
        self.prompt_builder = prompt_builder;
        self
    }

    pub fn with_options(mut self, options: GenerationOptions) -> Self {
        self.options = options;
        self
    }

    pub fn registry(&self) -> &AgentRegistry {
        &self.registry
    }

    /// The prompt this orchestrator would send for `scenario`.
    pub fn prompt_for(&self, scenario: &Scenario) -> String {
        (self.prompt_builder)(scenario)
    }

    /// Run one invocation for `scenario`.
    ///
    /// # Errors
    ///
    /// - [`OrchestratorError::Generation`] when the orchestrator model or a
    ///   sub-agent's model call fails
    /// - [`OrchestratorError::Protocol`] when the model output holds no task
    ///   or a task payload fails to decode; the raw text is attached
    /// - [`OrchestratorError::UnregisteredRole`] when a task names a role
    ///   with no registered agent
    pub async fn invoke(&self, scenario: &Scenario) -> Result<ResultBundle, OrchestratorError> {
        let invocation_id = uuid::Uuid::new_v4().to_string();
        self.invoke_as(&invocation_id, scenario).await
    }

    /// [`Orchestrator::invoke`] with a caller-chosen invocation id for log correlation.
    pub async fn invoke_as(
        &self,
        invocation_id: &str,
        scenario: &Scenario,
    ) -> Result<ResultBundle, OrchestratorError> {
        let span = obs::invocation_span(invocation_id);
        let started = Instant::now();
        METRICS.inc_invocations();
        let mut state = InvocationState::Init;

        let result = self.run(scenario, &mut state).instrument(span.clone()).await;
        let _guard = span.enter();
        match &result {
            Ok(bundle) => {
                let elapsed = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
                obs::emit_invocation_finished(elapsed, bundle.total_results());
            }
            Err(e) => {
                if matches!(e, OrchestratorError::Protocol { .. }) {
                    METRICS.inc_protocol_failures();
                }
                obs::emit_invocation_failed(&state.to_string(), e);
            }
        }
        result
    }

    async fn run(
        &self,
        scenario: &Scenario,
        state: &mut InvocationState,
    ) -> Result<ResultBundle, OrchestratorError> {
        let prompt = (self.prompt_builder)(scenario);
        *state = InvocationState::PromptBuilt;
        obs::emit_invocation_started(&scenario.route(), scenario.legs().len(), self.model.name());

        let raw = self.model.generate(&prompt, &self.options).await?;
        *state = InvocationState::ModelInvoked;

        let tasks = match parse_tasks(&raw) {
            Ok(tasks) => tasks,
            Err(source) => return Err(protocol_error(source, raw)),
        };
        *state = InvocationState::Parsed;
        obs::emit_invocation_parsed(tasks.len(), raw.len());

        if let Some(task) = tasks.iter().find(|t| self.registry.get(t.role()).is_none()) {
            return Err(OrchestratorError::UnregisteredRole {
                role: task.role().to_string(),
                line: task.line(),
            });
        }
        *state = InvocationState::Dispatching;

        let mut bundle = ResultBundle::new(scenario.clone(), prompt, raw);
        for (seq, task) in tasks.iter().enumerate() {
            let agent = self
                .registry
                .get(task.role())
                .ok_or_else(|| OrchestratorError::UnregisteredRole {
                    role: task.role().to_string(),
                    line: task.line(),
                })?;

            obs::emit_task_dispatched(seq, task.role(), task.line());
            METRICS.inc_tasks_dispatched();
            let output = agent.run(task.payload()).await?;
            debug!(seq, role = task.role(), keys = output.len(), "agent returned");
            bundle.push_result(task.role(), output);
        }

        *state = InvocationState::Done;
        Ok(bundle)
    }
}

fn protocol_error(source: ProtocolError, raw_output: String) -> OrchestratorError {
    OrchestratorError::Protocol { source, raw_output }
}

impl fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Orchestrator")
            .field("model", &self.model.name())
            .field("registry", &self.registry)
            .field("options", &self.options)
            .finish()
    }
}
