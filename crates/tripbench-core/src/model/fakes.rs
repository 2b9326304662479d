//! Deterministic model stand-ins (tests and offline runs).
//!
//! - [`ScriptedModel`] replays canned responses and records every prompt.
//! - [`LegEchoModel`] reads the LEG TABLE of an orchestrator prompt and emits
//!   the canonical task lines for it.
//! - [`CatalogEchoModel`] answers agent prompts by picking the first embedded
//!   candidate, or the fallback object when there is none.
//! - [`FailingModel`] always fails.

use std::collections::VecDeque;
use std::sync::{Mutex, OnceLock};

use async_trait::async_trait;
use regex::Regex;

use crate::agents::{CANDIDATE_DB_HEADER, FALLBACK_HEADER_SUFFIX};
use crate::domain::error::GenerationError;
use crate::model::{GenerationOptions, GenerationResult, ModelAdapter};

/// Replays queued responses in order; repeats `fallback` once the queue drains.
#[derive(Debug, Default)]
pub struct ScriptedModel {
    queue: Mutex<VecDeque<String>>,
    fallback: String,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedModel {
    /// A model that answers every prompt with `response`.
    pub fn always(response: impl Into<String>) -> Self {
        Self {
            fallback: response.into(),
            ..Self::default()
        }
    }

    /// A model that answers with `responses` in order, then with an empty string.
    pub fn sequence<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            queue: Mutex::new(responses.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    /// Every prompt received so far, oldest first.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl ModelAdapter for ScriptedModel {
    async fn generate(&self, prompt: &str, _options: &GenerationOptions) -> GenerationResult<String> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }
        let next = self.queue.lock().ok().and_then(|mut q| q.pop_front());
        Ok(next.unwrap_or_else(|| self.fallback.clone()))
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

fn leg_line_re() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)-\s*Leg\s*\d+\s*:\s*(?P<origin>[^|→]+?)\s*→\s*(?P<dest>[^|]+?)\s*\|\s*book_hotel=(?P<hotel>true|false)\s*\|\s*days_to_plan=(?P<days>\d+)",
        )
        .ok()
    })
    .as_ref()
}

/// Echoes the ideal task list for the LEG TABLE found in the prompt.
///
/// For each leg: a FlightAgent task, a HotelAgent task when a hotel is
/// requested (nights = days to plan, at least 1), then a PlannerAgent task.
#[derive(Debug, Default, Clone, Copy)]
pub struct LegEchoModel;

#[async_trait]
impl ModelAdapter for LegEchoModel {
    async fn generate(&self, prompt: &str, _options: &GenerationOptions) -> GenerationResult<String> {
        let re = leg_line_re()
            .ok_or_else(|| GenerationError::Backend("leg echo: invalid leg pattern".to_string()))?;
        let mut out = Vec::new();
        for caps in re.captures_iter(prompt) {
            let origin = caps["origin"].trim();
            let dest = caps["dest"].trim();
            let hotel = caps["hotel"].eq_ignore_ascii_case("true");
            let days: u32 = caps["days"].parse().unwrap_or(1).max(1);

            out.push(task_line(
                "FlightAgent",
                serde_json::json!({ "origin": origin, "dest": dest }),
            ));
            if hotel {
                out.push(task_line(
                    "HotelAgent",
                    serde_json::json!({ "city": dest, "nights": days }),
                ));
            }
            out.push(task_line(
                "PlannerAgent",
                serde_json::json!({ "city": dest, "days": days }),
            ));
        }

        if out.is_empty() {
            return Err(GenerationError::Backend(
                "leg echo: no legs found in LEG TABLE".to_string(),
            ));
        }
        Ok(out.join("\n"))
    }

    fn name(&self) -> &str {
        "leg-echo"
    }
}

fn task_line(role: &str, payload: serde_json::Value) -> String {
    format!("[TASK] {role} | {payload}")
}

/// Picks the first candidate of an agent prompt, else its fallback object.
#[derive(Debug, Default, Clone, Copy)]
pub struct CatalogEchoModel;

#[async_trait]
impl ModelAdapter for CatalogEchoModel {
    async fn generate(&self, prompt: &str, _options: &GenerationOptions) -> GenerationResult<String> {
        let mut lines = prompt.lines();
        let mut fallback = None;
        while let Some(line) = lines.next() {
            let line = line.trim();
            if line == CANDIDATE_DB_HEADER {
                let catalog = lines.next().unwrap_or("[]");
                let rows: Vec<serde_json::Value> =
                    serde_json::from_str(catalog).unwrap_or_default();
                if let Some(first) = rows.into_iter().next() {
                    return Ok(first.to_string());
                }
            } else if line.ends_with(FALLBACK_HEADER_SUFFIX) && fallback.is_none() {
                fallback = lines.next().map(|l| l.trim().to_string());
            }
        }
        Ok(fallback.unwrap_or_default())
    }

    fn name(&self) -> &str {
        "catalog-echo"
    }
}

/// Always fails with a backend error.
#[derive(Debug, Clone)]
pub struct FailingModel {
    message: String,
}

impl FailingModel {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[async_trait]
impl ModelAdapter for FailingModel {
    async fn generate(&self, _prompt: &str, _options: &GenerationOptions) -> GenerationResult<String> {
        Err(GenerationError::Backend(self.message.clone()))
    }

    fn name(&self) -> &str {
        "failing"
    }
}
