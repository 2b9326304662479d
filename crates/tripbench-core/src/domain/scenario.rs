//! Trip scenarios: an ordered route with per-city hotel and planning flags.

use serde::{Deserialize, Serialize};

use crate::domain::error::ScenarioError;

/// An ordered route of cities with parallel per-city booking data.
///
/// Invariants (checked by [`Scenario::new`] and on deserialization):
/// - `cities` is non-empty
/// - `cities`, `book_hotels` and `plan_days` have equal length
/// - no two adjacent cities are equal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ScenarioFields")]
pub struct Scenario {
    cities: Vec<String>,
    book_hotels: Vec<bool>,
    plan_days: Vec<u32>,
}

#[derive(Deserialize)]
struct ScenarioFields {
    cities: Vec<String>,
    book_hotels: Vec<bool>,
    plan_days: Vec<u32>,
}

impl TryFrom<ScenarioFields> for Scenario {
    type Error = ScenarioError;

    fn try_from(fields: ScenarioFields) -> Result<Self, Self::Error> {
        Scenario::new(fields.cities, fields.book_hotels, fields.plan_days)
    }
}

/// One origin → destination hop of a scenario.
///
/// Hotel and planning values belong to the arrival city.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Leg {
    /// 1-based position in the route.
    pub index: usize,
    pub origin: String,
    pub dest: String,
    pub book_hotel: bool,
    pub days_to_plan: u32,
}

impl Scenario {
    /// Validate and build a scenario.
    ///
    /// # Errors
    ///
    /// [`ScenarioError`] when any invariant listed on [`Scenario`] is violated.
    pub fn new(
        cities: Vec<String>,
        book_hotels: Vec<bool>,
        plan_days: Vec<u32>,
    ) -> Result<Self, ScenarioError> {
        if cities.is_empty() {
            return Err(ScenarioError::Empty);
        }
        if cities.len() != book_hotels.len() || cities.len() != plan_days.len() {
            return Err(ScenarioError::LengthMismatch {
                cities: cities.len(),
                book_hotels: book_hotels.len(),
                plan_days: plan_days.len(),
            });
        }
        if let Some(pos) = cities.windows(2).position(|w| w[0] == w[1]) {
            return Err(ScenarioError::AdjacentDuplicate {
                city: cities[pos + 1].clone(),
                position: pos + 1,
            });
        }
        Ok(Self {
            cities,
            book_hotels,
            plan_days,
        })
    }

    /// Cities in visiting order.
    pub fn cities(&self) -> &[String] {
        &self.cities
    }

    /// Hotel flag per city.
    pub fn book_hotels(&self) -> &[bool] {
        &self.book_hotels
    }

    /// Days to plan per city.
    pub fn plan_days(&self) -> &[u32] {
        &self.plan_days
    }

    /// Consecutive city pairs in route order.
    pub fn legs(&self) -> Vec<Leg> {
        self.cities
            .windows(2)
            .enumerate()
            .map(|(i, pair)| Leg {
                index: i + 1,
                origin: pair[0].clone(),
                dest: pair[1].clone(),
                book_hotel: self.book_hotels[i + 1],
                days_to_plan: self.plan_days[i + 1],
            })
            .collect()
    }

    /// Human-readable route, e.g. `Paris → Tokyo`.
    pub fn route(&self) -> String {
        self.cities.join(" → ")
    }
}
