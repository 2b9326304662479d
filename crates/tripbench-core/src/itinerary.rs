//! Day-plan collaborator: asks a (search-augmented) model for a dated
//! itinerary and appends whatever comes back to a JSONL log.
//!
//! Model failures never escape: they are logged as `{"error": ...}` lines.
//! Only I/O errors on the log file are returned.

use std::path::Path;
use std::sync::Arc;

use serde_json::{json, Value};
use tracing::{info, warn};

use crate::domain::error::StoreResult;
use crate::model::{GenerationOptions, ModelAdapter};
use crate::store::append_jsonl;

const ITINERARY_SCHEMA: &str = r#"Return **ONLY** valid JSON strictly matching this schema - no markdown, no extra keys!

{
  "city": "<city name>",
  "start_date": "<YYYY-MM-DD>",
  "end_date": "<YYYY-MM-DD>",
  "days": [
    {
      "date": "<YYYY-MM-DD>",
      "morning": "<14-word max description>",
      "afternoon": "<14-word max description>",
      "evening": "<14-word max description>"
    }
  ]
}"#;

/// Token budget for one itinerary.
pub const ITINERARY_MAX_TOKENS: u32 = 800;

/// Writes one itinerary line per call.
pub struct ItineraryWriter {
    model: Arc<dyn ModelAdapter>,
    options: GenerationOptions,
}

impl ItineraryWriter {
    pub fn new(model: Arc<dyn ModelAdapter>) -> Self {
        Self {
            model,
            options: GenerationOptions::default().with_max_new_tokens(ITINERARY_MAX_TOKENS),
        }
    }

    pub fn build_prompt(city: &str, start_date: &str, end_date: &str) -> String {
        format!(
            "You are an expert travel planner. Today is {start_date}; the traveller departs on {end_date}.\n\
             Plan day-by-day activities **in {city}** for the dates in between.\n\
             Activities must not repeat. Use concise language.\n\
             \n\
             {ITINERARY_SCHEMA}"
        )
    }

    /// Generate an itinerary for `city` between the two dates and append it
    /// to `log_path`. Returns the logged object.
    pub async fn write_itinerary(
        &self,
        city: &str,
        start_date: &str,
        end_date: &str,
        log_path: &Path,
    ) -> StoreResult<Value> {
        let prompt = Self::build_prompt(city, start_date, end_date);
        let raw = match self.model.generate(&prompt, &self.options).await {
            Ok(text) => text,
            Err(e) => {
                warn!(city, error = %e, "itinerary generation failed");
                json!({ "error": e.to_string() }).to_string()
            }
        };

        let entry = match serde_json::from_str::<Value>(raw.trim()) {
            Ok(obj @ Value::Object(_)) => obj,
            _ => json!({
                "city": city,
                "start_date": start_date,
                "end_date": end_date,
                "raw": raw,
            }),
        };

        append_jsonl(log_path, std::slice::from_ref(&entry))?;
        info!(city, path = %log_path.display(), "itinerary logged");
        Ok(entry)
    }
}
