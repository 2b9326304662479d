//! Hotel booking agent.
//!
//! Task payload: `{"city": "<city>", "nights": <int>}`.
//! Result: `{"city", "hotel", "check_in", "nights", "price_per_night"}`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::warn;

use crate::agents::ranking::{rank_candidates, TOP_K};
use crate::agents::{extract_or_empty, set_default, Agent, CANDIDATE_DB_HEADER, HOTEL_ROLE};
use crate::domain::record::HotelRecord;
use crate::domain::task::{payload_int, payload_str, Payload};
use crate::model::ModelAdapter;
use crate::store::read_jsonl;

const OUTPUT_SCHEMA: &str = r#"{
  "city": "<city>",
  "hotel": "<hotel name>",
  "check_in": "<YYYY-MM-DD>",
  "nights": <integer>,
  "price_per_night": <integer USD>
}"#;

/// Chooses one hotel in the arrival city from a JSONL hotel store.
pub struct HotelAgent {
    model: Arc<dyn ModelAdapter>,
    hotels_path: PathBuf,
}

impl HotelAgent {
    pub fn new(model: Arc<dyn ModelAdapter>, hotels_path: impl Into<PathBuf>) -> Self {
        Self {
            model,
            hotels_path: hotels_path.into(),
        }
    }

    pub fn hotels_path(&self) -> &Path {
        &self.hotels_path
    }

    /// Cheapest per night then earliest check-in for `city`, at most [`TOP_K`].
    pub fn candidates(&self, city: &str) -> Vec<HotelRecord> {
        let rows = read_jsonl::<HotelRecord>(&self.hotels_path).unwrap_or_else(|e| {
            warn!(path = %self.hotels_path.display(), error = %e, "hotel store unreadable");
            Vec::new()
        });
        rank_candidates(rows, |r| r.city == city, TOP_K)
    }
}

/// Nights shown to the model: the task value, or 1 when absent.
fn requested_nights(task: &Payload) -> i64 {
    payload_int(task, "nights").unwrap_or(1)
}

#[async_trait]
impl Agent for HotelAgent {
    fn role(&self) -> &str {
        HOTEL_ROLE
    }

    fn model(&self) -> &dyn ModelAdapter {
        self.model.as_ref()
    }

    fn build_prompt(&self, task: &Payload) -> String {
        let city = payload_str(task, "city");
        let nights = requested_nights(task);
        let catalog =
            serde_json::to_string(&self.candidates(&city)).unwrap_or_else(|_| "[]".to_string());
        let fallback = json!({
            "city": city,
            "hotel": "",
            "check_in": "",
            "nights": nights,
            "price_per_night": 0,
        });

        format!(
            "You are {HOTEL_ROLE}. Choose ONE best hotel in the arrival city.\n\
             \n\
             ARRIVAL:\n\
             - city: {city}\n\
             - requested_nights: {nights}\n\
             \n\
             {CANDIDATE_DB_HEADER}\n\
             {catalog}\n\
             \n\
             Selection criteria: prefer lowest price_per_night; if tie, earliest check_in.\n\
             If CANDIDATE_DB is empty, return:\n\
             {fallback}\n\
             \n\
             Output format (STRICT):\n\
             Return ONE JSON object only (no prose) with keys:\n\
             {OUTPUT_SCHEMA}\n\
             Output a single JSON object, no markdown, no commentary, no extra text.\n\
             Always set \"nights\" to {nights} in the response."
        )
    }

    /// `nights` is authoritative from the task: an integer task value always
    /// wins; otherwise a positive integer from the model is kept; otherwise 1.
    fn parse_response(&self, raw: &str, task: &Payload) -> Payload {
        let mut obj = extract_or_empty(HOTEL_ROLE, raw);
        set_default(&mut obj, "city", payload_str(task, "city"));
        set_default(&mut obj, "hotel", "");
        set_default(&mut obj, "check_in", "");
        let nights = payload_int(task, "nights")
            .or_else(|| payload_int(&obj, "nights").filter(|n| *n > 0))
            .unwrap_or(1);
        obj.insert("nights".to_string(), json!(nights));
        set_default(&mut obj, "price_per_night", 0);
        obj
    }
}
