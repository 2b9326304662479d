//! File locations used by a harness run.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Candidate stores and logs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HarnessPaths {
    /// Flight store (`TRIPBENCH_FLIGHTS`)
    pub flights: PathBuf,
    /// Hotel store (`TRIPBENCH_HOTELS`)
    pub hotels: PathBuf,
    /// Run log (`TRIPBENCH_RUN_LOG`)
    pub run_log: PathBuf,
    /// Day-plan log (`TRIPBENCH_ITINERARY_LOG`)
    pub itinerary_log: PathBuf,
}

fn env_path(key: &str, default: &str) -> PathBuf {
    std::env::var_os(key)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(default))
}

impl Default for HarnessPaths {
    fn default() -> Self {
        HarnessPaths {
            flights: PathBuf::from("data/flights.jsonl"),
            hotels: PathBuf::from("data/hotels.jsonl"),
            run_log: PathBuf::from("logs/runs.jsonl"),
            itinerary_log: PathBuf::from("logs/itineraries.jsonl"),
        }
    }
}

impl HarnessPaths {
    /// Defaults, overridden by any `TRIPBENCH_*` variable that is set.
    pub fn from_env() -> Self {
        HarnessPaths {
            flights: env_path("TRIPBENCH_FLIGHTS", "data/flights.jsonl"),
            hotels: env_path("TRIPBENCH_HOTELS", "data/hotels.jsonl"),
            run_log: env_path("TRIPBENCH_RUN_LOG", "logs/runs.jsonl"),
            itinerary_log: env_path("TRIPBENCH_ITINERARY_LOG", "logs/itineraries.jsonl"),
        }
    }

    /// All four files under `root`, keeping the default relative layout.
    pub fn under(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let d = Self::default();
        HarnessPaths {
            flights: root.join(d.flights),
            hotels: root.join(d.hotels),
            run_log: root.join(d.run_log),
            itinerary_log: root.join(d.itinerary_log),
        }
    }
}
