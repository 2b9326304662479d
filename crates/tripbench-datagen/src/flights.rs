//! Synthetic flight records.

use std::path::Path;

use chrono::NaiveDate;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::info;

use tripbench_core::store::{append_jsonl, read_jsonl, write_jsonl};
use tripbench_core::{FlightRecord, StoreResult};

use crate::catalog::{
    AIRLINES, CITIES, FLIGHT_DATE_MEAN_RANGE, FLIGHT_DATE_STD_RANGE, FLIGHT_PRICE_BOUNDS,
    FLIGHT_PRICE_MEAN_RANGE, FLIGHT_PRICE_SIGMA_RATIO,
};
use crate::dist::{future_date, trunc_gauss, uniform};

fn pick<'a, R: Rng + ?Sized>(rng: &mut R, items: &[&'a str]) -> &'a str {
    items.choose(rng).copied().unwrap_or_default()
}

fn rand_price<R: Rng + ?Sized>(rng: &mut R) -> i64 {
    let mu = uniform(rng, FLIGHT_PRICE_MEAN_RANGE) as f64;
    trunc_gauss(
        rng,
        mu,
        mu * FLIGHT_PRICE_SIGMA_RATIO,
        FLIGHT_PRICE_BOUNDS.0,
        FLIGHT_PRICE_BOUNDS.1,
    ) as i64
}

/// One random flight between two distinct catalog cities.
pub fn random_flight<R: Rng + ?Sized>(rng: &mut R, today: NaiveDate) -> FlightRecord {
    let mut pair = CITIES.choose_multiple(rng, 2).copied();
    let origin = pair.next().unwrap_or_default();
    let dest = pair.next().unwrap_or_default();
    FlightRecord {
        airline: pick(rng, AIRLINES).to_string(),
        origin: origin.to_string(),
        dest: dest.to_string(),
        date: future_date(rng, today, FLIGHT_DATE_MEAN_RANGE, FLIGHT_DATE_STD_RANGE),
        price: rand_price(rng),
    }
}

pub fn generate_flights<R: Rng + ?Sized>(rng: &mut R, today: NaiveDate, count: usize) -> Vec<FlightRecord> {
    (0..count).map(|_| random_flight(rng, today)).collect()
}

/// Write `count` fresh flights to `path`, replacing it unless `append` is set.
pub fn generate_flight_store<R: Rng + ?Sized>(
    rng: &mut R,
    today: NaiveDate,
    path: &Path,
    count: usize,
    append: bool,
) -> StoreResult<usize> {
    let records = generate_flights(rng, today, count);
    if append {
        append_jsonl(path, &records)?;
    } else {
        write_jsonl(path, &records)?;
    }
    info!(path = %path.display(), count, append, "flight store generated");
    Ok(records.len())
}

/// A uniformly chosen flight for `origin → dest`, if any.
pub fn sample_flight<R: Rng + ?Sized>(
    rng: &mut R,
    records: &[FlightRecord],
    origin: &str,
    dest: &str,
) -> Option<FlightRecord> {
    let matches: Vec<&FlightRecord> = records
        .iter()
        .filter(|r| r.origin == origin && r.dest == dest)
        .collect();
    matches.choose(rng).map(|r| (*r).clone())
}

/// [`sample_flight`] over the store at `path`.
pub fn sample_flight_from<R: Rng + ?Sized>(
    rng: &mut R,
    path: &Path,
    origin: &str,
    dest: &str,
) -> StoreResult<Option<FlightRecord>> {
    let records: Vec<FlightRecord> = read_jsonl(path)?;
    Ok(sample_flight(rng, &records, origin, dest))
}
