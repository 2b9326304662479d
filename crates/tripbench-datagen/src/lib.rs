//! Synthetic data for TripBench: candidate stores and random scenarios.
//!
//! Every generator takes an injected [`rand::Rng`] so runs can be seeded.

pub mod catalog;
pub mod dist;
pub mod flights;
pub mod hotels;
pub mod scenario;

pub use flights::{generate_flight_store, generate_flights, sample_flight, sample_flight_from};
pub use hotels::{generate_hotel_store, generate_hotels, sample_hotel, sample_hotel_from};
pub use scenario::{sample_scenario, SampledScenario};
