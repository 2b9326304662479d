//! Flight booking agent.
//!
//! Task payload: `{"origin": "<city>", "dest": "<city>"}`.
//! Result: `{"origin", "dest", "airline", "date", "price"}`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::warn;

use crate::agents::ranking::{rank_candidates, TOP_K};
use crate::agents::{extract_or_empty, set_default, Agent, CANDIDATE_DB_HEADER, FLIGHT_ROLE};
use crate::domain::record::FlightRecord;
use crate::domain::task::{payload_str, Payload};
use crate::model::ModelAdapter;
use crate::store::read_jsonl;

const OUTPUT_SCHEMA: &str = r#"{
  "origin": "<origin city>",
  "dest": "<dest city>",
  "airline": "<airline>",
  "date": "<YYYY-MM-DD>",
  "price": <integer USD>
}"#;

/// Chooses one flight per leg from a JSONL flight store.
pub struct FlightAgent {
    model: Arc<dyn ModelAdapter>,
    flights_path: PathBuf,
}

impl FlightAgent {
    pub fn new(model: Arc<dyn ModelAdapter>, flights_path: impl Into<PathBuf>) -> Self {
        Self {
            model,
            flights_path: flights_path.into(),
        }
    }

    pub fn flights_path(&self) -> &Path {
        &self.flights_path
    }

    /// Cheapest then earliest flights for `origin → dest`, at most [`TOP_K`].
    pub fn candidates(&self, origin: &str, dest: &str) -> Vec<FlightRecord> {
        let rows = read_jsonl::<FlightRecord>(&self.flights_path).unwrap_or_else(|e| {
            warn!(path = %self.flights_path.display(), error = %e, "flight store unreadable");
            Vec::new()
        });
        rank_candidates(rows, |r| r.origin == origin && r.dest == dest, TOP_K)
    }
}

#[async_trait]
impl Agent for FlightAgent {
    fn role(&self) -> &str {
        FLIGHT_ROLE
    }

    fn model(&self) -> &dyn ModelAdapter {
        self.model.as_ref()
    }

    fn build_prompt(&self, task: &Payload) -> String {
        let origin = payload_str(task, "origin");
        let dest = payload_str(task, "dest");
        let catalog = serde_json::to_string(&self.candidates(&origin, &dest))
            .unwrap_or_else(|_| "[]".to_string());
        let fallback = json!({
            "origin": origin,
            "dest": dest,
            "airline": "",
            "date": "",
            "price": 0,
        });

        format!(
            "You are {FLIGHT_ROLE}. Choose ONE best flight for the requested leg.\n\
             \n\
             LEG:\n\
             - origin: {origin}\n\
             - dest: {dest}\n\
             \n\
             {CANDIDATE_DB_HEADER}\n\
             {catalog}\n\
             \n\
             Selection criteria (in order): 1) lowest price; 2) earlier date; 3) otherwise any.\n\
             If CANDIDATE_DB is empty, return:\n\
             {fallback}\n\
             \n\
             Output format (STRICT):\n\
             Return ONE JSON object only (no prose) with keys:\n\
             {OUTPUT_SCHEMA}\n\
             Output a single JSON object, no markdown, no commentary, no extra text."
        )
    }

    fn parse_response(&self, raw: &str, task: &Payload) -> Payload {
        let mut obj = extract_or_empty(FLIGHT_ROLE, raw);
        set_default(&mut obj, "origin", payload_str(task, "origin"));
        set_default(&mut obj, "dest", payload_str(task, "dest"));
        set_default(&mut obj, "airline", "");
        set_default(&mut obj, "date", "");
        set_default(&mut obj, "price", 0);
        obj
    }
}
