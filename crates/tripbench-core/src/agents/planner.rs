//! Day-by-day activity planner.
//!
//! Task payload: `{"city": "<city>", "days": <int>}`.
//! Result: `{"city", "days", "itinerary": [{"day", "morning", "afternoon", "evening"}, ..]}`.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::agents::{extract_or_empty, set_default, Agent, PLANNER_ROLE};
use crate::domain::task::{payload_int, payload_str, Payload};
use crate::model::ModelAdapter;

const OUTPUT_SCHEMA: &str = r#"{
  "city": "<city>",
  "days": <integer>,
  "itinerary": [
    {
      "day": <integer, 1-based>,
      "morning": "<14-word max description>",
      "afternoon": "<14-word max description>",
      "evening": "<14-word max description>"
    }
  ]
}"#;

/// Plans activities for each day spent in an arrival city.
pub struct PlannerAgent {
    model: Arc<dyn ModelAdapter>,
}

impl PlannerAgent {
    pub fn new(model: Arc<dyn ModelAdapter>) -> Self {
        Self { model }
    }
}

fn requested_days(task: &Payload) -> i64 {
    payload_int(task, "days").unwrap_or(1).max(1)
}

#[async_trait]
impl Agent for PlannerAgent {
    fn role(&self) -> &str {
        PLANNER_ROLE
    }

    fn model(&self) -> &dyn ModelAdapter {
        self.model.as_ref()
    }

    fn build_prompt(&self, task: &Payload) -> String {
        let city = payload_str(task, "city");
        let days = requested_days(task);
        let fallback = json!({ "city": city, "days": days, "itinerary": [] });

        format!(
            "You are {PLANNER_ROLE}. Plan day-by-day activities in the arrival city.\n\
             \n\
             STAY:\n\
             - city: {city}\n\
             - days: {days}\n\
             \n\
             Plan exactly {days} day(s). Activities must not repeat. Use concise language.\n\
             If you cannot plan this city, return:\n\
             {fallback}\n\
             \n\
             Output format (STRICT):\n\
             Return ONE JSON object only (no prose) with keys:\n\
             {OUTPUT_SCHEMA}\n\
             Output a single JSON object, no markdown, no commentary, no extra text."
        )
    }

    fn parse_response(&self, raw: &str, task: &Payload) -> Payload {
        let days = requested_days(task);
        let mut obj = extract_or_empty(PLANNER_ROLE, raw);
        set_default(&mut obj, "city", payload_str(task, "city"));
        obj.insert("days".to_string(), json!(days));

        let mut itinerary = match obj.remove("itinerary") {
            Some(Value::Array(entries)) => entries,
            _ => Vec::new(),
        };
        itinerary.truncate(usize::try_from(days).unwrap_or(usize::MAX));
        obj.insert("itinerary".to_string(), Value::Array(itinerary));
        obj
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fakes::ScriptedModel;

    fn agent() -> PlannerAgent {
        PlannerAgent::new(Arc::new(ScriptedModel::always("")))
    }

    fn task(v: Value) -> Payload {
        v.as_object().cloned().unwrap()
    }

    #[test]
    fn test_prompt_carries_schema_and_fallback() {
        let prompt = agent().build_prompt(&task(json!({"city": "Berlin", "days": 2})));
        assert!(prompt.contains("- days: 2"));
        assert!(prompt.contains("\"itinerary\": ["));
        assert!(prompt.contains(r#"{"city":"Berlin","days":2,"itinerary":[]}"#));
    }

    #[test]
    fn test_days_forced_and_itinerary_truncated() {
        let raw = r#"{"city":"Berlin","days":5,"itinerary":[
            {"day":1,"morning":"a","afternoon":"b","evening":"c"},
            {"day":2,"morning":"d","afternoon":"e","evening":"f"},
            {"day":3,"morning":"g","afternoon":"h","evening":"i"}
        ]}"#;
        let out = agent().parse_response(raw, &task(json!({"city": "Berlin", "days": 2})));
        assert_eq!(out["days"], 2);
        assert_eq!(out["itinerary"].as_array().unwrap().len(), 2);
        assert_eq!(out["itinerary"][1]["morning"], "d");
    }

    #[test]
    fn test_garbage_response_yields_empty_itinerary() {
        let out = agent().parse_response("```not json```", &task(json!({"city": "Dubai", "days": 3})));
        assert_eq!(out["city"], "Dubai");
        assert_eq!(out["days"], 3);
        assert_eq!(out["itinerary"], json!([]));
    }

    #[test]
    fn test_non_array_itinerary_is_replaced() {
        let out = agent().parse_response(
            r#"{"itinerary":"see the sights"}"#,
            &task(json!({"city": "Paris", "days": 1})),
        );
        assert_eq!(out["itinerary"], json!([]));
    }

    #[test]
    fn test_zero_or_missing_days_become_one() {
        let a = agent();
        assert_eq!(a.parse_response("{}", &task(json!({"city": "Paris", "days": 0})))["days"], 1);
        assert_eq!(a.parse_response("{}", &task(json!({"city": "Paris"})))["days"], 1);
    }
}
