//! Run log: one JSON line per orchestrator invocation.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::domain::bundle::ResultBundle;
use crate::domain::error::{OrchestratorError, StoreResult};
use crate::store::append_jsonl;

/// Hex SHA-256 of an orchestrator prompt.
pub fn prompt_digest(prompt: &str) -> String {
    hex::encode(Sha256::digest(prompt.as_bytes()))
}

/// A successful invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    pub run_id: String,
    pub recorded_at: DateTime<Utc>,
    pub prompt_digest: String,
    pub bundle: ResultBundle,
}

impl RunRecord {
    pub fn new(run_id: impl Into<String>, bundle: ResultBundle) -> Self {
        Self {
            run_id: run_id.into(),
            recorded_at: Utc::now(),
            prompt_digest: prompt_digest(&bundle.orchestrator_prompt),
            bundle,
        }
    }
}

/// A failed invocation. `raw_output` is set when the model answered but the
/// answer was rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunFailure {
    pub run_id: String,
    pub recorded_at: DateTime<Utc>,
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_output: Option<String>,
}

impl RunFailure {
    pub fn new(run_id: impl Into<String>, error: &OrchestratorError) -> Self {
        Self {
            run_id: run_id.into(),
            recorded_at: Utc::now(),
            error: error.to_string(),
            raw_output: error.raw_output().map(str::to_string),
        }
    }
}

/// Either line of the run log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RunLogEntry {
    Completed(RunRecord),
    Failed(RunFailure),
}

impl RunLogEntry {
    pub fn run_id(&self) -> &str {
        match self {
            RunLogEntry::Completed(r) => &r.run_id,
            RunLogEntry::Failed(f) => &f.run_id,
        }
    }
}

/// Append the outcome of one invocation to the run log at `path`.
pub fn record_outcome(
    path: &Path,
    run_id: &str,
    outcome: &Result<ResultBundle, OrchestratorError>,
) -> StoreResult<RunLogEntry> {
    let entry = match outcome {
        Ok(bundle) => RunLogEntry::Completed(RunRecord::new(run_id, bundle.clone())),
        Err(e) => RunLogEntry::Failed(RunFailure::new(run_id, e)),
    };
    append_jsonl(path, std::slice::from_ref(&entry))?;
    tracing::debug!(path = %path.display(), run_id, "run outcome recorded");
    Ok(entry)
}
