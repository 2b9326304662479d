//! Random trip scenarios.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

use tripbench_core::{Scenario, ScenarioError};

use crate::catalog::{CITIES, MAX_CITIES, MIN_CITIES, PLAN_DAYS_RANGE, PROB_BOOK_HOTEL, PROB_OPTIONAL_TASK};

/// A sampled scenario plus the sampling metadata kept alongside it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SampledScenario {
    /// Number of cities.
    pub depth: usize,
    /// 1 or 2; informational only.
    pub width: u8,
    #[serde(flatten)]
    pub scenario: Scenario,
}

/// `n` catalog cities with no city repeated back to back.
fn route<R: Rng + ?Sized>(rng: &mut R, n: usize) -> Vec<String> {
    let mut cities: Vec<String> = Vec::with_capacity(n);
    while cities.len() < n {
        let Some(c) = CITIES.choose(rng) else { break };
        if cities.last().map(String::as_str) != Some(*c) {
            cities.push((*c).to_string());
        }
    }
    cities
}

pub fn sample_scenario<R: Rng + ?Sized>(rng: &mut R) -> Result<SampledScenario, ScenarioError> {
    let depth = rng.gen_range(MIN_CITIES..=MAX_CITIES);
    let width = 1 + u8::from(rng.gen_bool(PROB_OPTIONAL_TASK));

    let cities = route(rng, depth);
    let book_hotels = (0..cities.len()).map(|_| rng.gen_bool(PROB_BOOK_HOTEL)).collect();
    let plan_days = (0..cities.len())
        .map(|_| rng.gen_range(PLAN_DAYS_RANGE.0..=PLAN_DAYS_RANGE.1))
        .collect();

    Ok(SampledScenario {
        depth,
        width,
        scenario: Scenario::new(cities, book_hotels, plan_days)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_sampled_scenarios_are_valid() {
        let mut rng = StdRng::seed_from_u64(2024);
        for _ in 0..300 {
            let s = sample_scenario(&mut rng).unwrap();
            assert!((MIN_CITIES..=MAX_CITIES).contains(&s.depth));
            assert!(s.width == 1 || s.width == 2);
            assert_eq!(s.scenario.cities().len(), s.depth);
            assert!(s.scenario.cities().windows(2).all(|w| w[0] != w[1]));
            assert!(s.scenario.plan_days().iter().all(|d| (1..=3).contains(d)));
        }
    }

    #[test]
    fn test_serialises_flat() {
        let mut rng = StdRng::seed_from_u64(1);
        let s = sample_scenario(&mut rng).unwrap();
        let v = serde_json::to_value(&s).unwrap();
        assert!(v["depth"].is_u64());
        assert!(v["cities"].is_array());
        assert!(v["book_hotels"].is_array());
        assert!(v.get("scenario").is_none());
    }
}
