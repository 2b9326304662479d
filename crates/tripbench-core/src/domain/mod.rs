//! Core data model: scenarios, task units, candidate records and result bundles.

pub mod bundle;
pub mod error;
pub mod record;
pub mod scenario;
pub mod task;

pub use bundle::ResultBundle;
pub use error::{GenerationError, OrchestratorError, ScenarioError, StoreError, StoreResult};
pub use record::{Candidate, FlightRecord, HotelRecord};
pub use scenario::{Leg, Scenario};
pub use task::{payload_int, payload_str, Payload, TaskUnit};
