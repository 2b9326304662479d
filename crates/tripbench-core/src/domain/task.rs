//! Task units: the `(role, payload)` pairs produced by the task protocol.

use serde::Serialize;

/// JSON object carried by a task or returned by an agent.
pub type Payload = serde_json::Map<String, serde_json::Value>;

/// A single unit of work addressed to an agent role.
///
/// Immutable once parsed. `role` is only checked for syntactic shape here;
/// whether an agent is registered for it is decided at dispatch time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskUnit {
    role: String,
    payload: Payload,
    /// 1-based line in the orchestrator output this task was read from.
    #[serde(skip)]
    line: usize,
}

impl TaskUnit {
    pub fn new(role: impl Into<String>, payload: Payload, line: usize) -> Self {
        Self {
            role: role.into(),
            payload,
            line,
        }
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    pub fn line(&self) -> usize {
        self.line
    }
}

/// Read a string field from a payload, trimmed; empty when absent or not a string.
pub fn payload_str(payload: &Payload, key: &str) -> String {
    payload
        .get(key)
        .and_then(|v| v.as_str())
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

/// Read an integer field, accepting JSON numbers and numeric strings.
pub fn payload_int(payload: &Payload, key: &str) -> Option<i64> {
    match payload.get(key)? {
        serde_json::Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
