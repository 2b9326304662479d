//! Model Adapter contract: prompt in, raw text out.
//!
//! Concrete backends live in the `tripbench-models` crate; deterministic
//! stand-ins for tests and offline runs live in [`fakes`].

pub mod fakes;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::error::GenerationError;

/// Result type for model calls.
pub type GenerationResult<T> = std::result::Result<T, GenerationError>;

/// Generation knobs understood by every backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationOptions {
    pub max_new_tokens: u32,
    pub temperature: f32,
    /// When false, backends decode greedily (temperature 0).
    pub do_sample: bool,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            max_new_tokens: 512,
            temperature: 0.7,
            do_sample: true,
        }
    }
}

impl GenerationOptions {
    /// Deterministic decoding with the default length budget.
    pub fn greedy() -> Self {
        Self {
            do_sample: false,
            ..Self::default()
        }
    }

    pub fn with_max_new_tokens(mut self, max_new_tokens: u32) -> Self {
        self.max_new_tokens = max_new_tokens;
        self
    }

    /// Build options from a loose JSON object.
    ///
    /// Recognised keys override the defaults; unknown keys and values of the
    /// wrong type are ignored.
    pub fn from_value(value: &Value) -> Self {
        let mut opts = Self::default();
        let Some(obj) = value.as_object() else {
            return opts;
        };
        if let Some(n) = obj.get("max_new_tokens").and_then(Value::as_u64) {
            opts.max_new_tokens = u32::try_from(n).unwrap_or(u32::MAX);
        }
        if let Some(t) = obj.get("temperature").and_then(Value::as_f64) {
            opts.temperature = t as f32;
        }
        if let Some(s) = obj.get("do_sample").and_then(Value::as_bool) {
            opts.do_sample = s;
        }
        opts
    }

    /// Temperature actually sent to a backend.
    pub fn effective_temperature(&self) -> f32 {
        if self.do_sample {
            self.temperature
        } else {
            0.0
        }
    }
}

/// Uniform text-generation capability.
///
/// Always yields a string (possibly empty); callers extract any structure
/// themselves. Failures surface as [`GenerationError`] and are never retried
/// by the orchestration core.
#[async_trait]
pub trait ModelAdapter: Send + Sync {
    async fn generate(&self, prompt: &str, options: &GenerationOptions)
        -> GenerationResult<String>;

    /// Short backend identifier used in logs.
    fn name(&self) -> &str {
        "model"
    }
}

#[async_trait]
impl<T: ModelAdapter + ?Sized> ModelAdapter for Arc<T> {
    async fn generate(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> GenerationResult<String> {
        (**self).generate(prompt, options).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value_ignores_unknown_fields() {
        let opts = GenerationOptions::from_value(&json!({
            "max_new_tokens": 64,
            "top_k": 40,
            "stop": ["\n"],
        }));
        assert_eq!(opts.max_new_tokens, 64);
        assert_eq!(opts.temperature, 0.7);
        assert!(opts.do_sample);
    }

    #[test]
    fn test_from_value_ignores_wrong_types() {
        let opts = GenerationOptions::from_value(&json!({
            "max_new_tokens": "lots",
            "do_sample": false,
        }));
        assert_eq!(opts.max_new_tokens, 512);
        assert!(!opts.do_sample);
    }

    #[test]
    fn test_from_value_non_object_yields_defaults() {
        assert_eq!(
            GenerationOptions::from_value(&json!([1, 2])),
            GenerationOptions::default()
        );
    }

    #[test]
    fn test_greedy_forces_zero_temperature() {
        let opts = GenerationOptions::greedy();
        assert_eq!(opts.effective_temperature(), 0.0);
        assert_eq!(GenerationOptions::default().effective_temperature(), 0.7);
    }

    #[test]
    fn test_serde_defaults_fill_missing_and_skip_unknown() {
        let opts: GenerationOptions =
            serde_json::from_str(r#"{"temperature":0.2,"seed":7}"#).unwrap();
        assert_eq!(opts.temperature, 0.2);
        assert_eq!(opts.max_new_tokens, 512);
    }
}
