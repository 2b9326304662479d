//! TripBench Core Library
//!
//! An orchestrator model turns a trip scenario into `[TASK]` lines; each task
//! is dispatched to a flight, hotel or planner sub-agent and the results are
//! collected into a [`ResultBundle`].

pub mod agents;
pub mod config;
pub mod domain;
pub mod itinerary;
pub mod metrics;
pub mod model;
pub mod obs;
pub mod orchestrator;
pub mod protocol;
pub mod recording;
pub mod store;
pub mod telemetry;

pub use agents::{
    Agent, AgentRegistry, FlightAgent, HotelAgent, PlannerAgent, FLIGHT_ROLE, HOTEL_ROLE,
    PLANNER_ROLE,
};
pub use config::HarnessPaths;
pub use domain::{
    Candidate, FlightRecord, GenerationError, HotelRecord, Leg, OrchestratorError, Payload,
    ResultBundle, Scenario, ScenarioError, StoreError, StoreResult, TaskUnit,
};
pub use itinerary::ItineraryWriter;
pub use model::{GenerationOptions, GenerationResult, ModelAdapter};
pub use orchestrator::{build_orchestrator_prompt, InvocationState, Orchestrator};
pub use protocol::{parse_tasks, ProtocolError};
pub use recording::{record_outcome, RunFailure, RunLogEntry, RunRecord};
pub use telemetry::init_tracing;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

