//! Synthetic hotel records.

use std::path::Path;

use chrono::NaiveDate;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::info;

use tripbench_core::store::{append_jsonl, read_jsonl, write_jsonl};
use tripbench_core::{HotelRecord, StoreResult};

use crate::catalog::{
    CHECK_IN_MEAN_RANGE, CHECK_IN_STD_RANGE, CITIES, HOTELS, HOTEL_PRICE_BOUNDS,
    HOTEL_PRICE_MEAN_RANGE, HOTEL_PRICE_SIGMA_RATIO, NIGHTS_BOUNDS, NIGHTS_MEAN_RANGE,
    NIGHTS_SIGMA_RATIO,
};
use crate::dist::{future_date, trunc_gauss, uniform};

fn rand_nights<R: Rng + ?Sized>(rng: &mut R) -> i64 {
    let mu = uniform(rng, NIGHTS_MEAN_RANGE) as f64;
    (trunc_gauss(rng, mu, mu * NIGHTS_SIGMA_RATIO, NIGHTS_BOUNDS.0, NIGHTS_BOUNDS.1) as i64).max(1)
}

fn rand_price_per_night<R: Rng + ?Sized>(rng: &mut R) -> i64 {
    let mu = uniform(rng, HOTEL_PRICE_MEAN_RANGE) as f64;
    trunc_gauss(
        rng,
        mu,
        mu * HOTEL_PRICE_SIGMA_RATIO,
        HOTEL_PRICE_BOUNDS.0,
        HOTEL_PRICE_BOUNDS.1,
    ) as i64
}

pub fn random_hotel<R: Rng + ?Sized>(rng: &mut R, today: NaiveDate) -> HotelRecord {
    let city = CITIES.choose(rng).copied().unwrap_or_default();
    let hotel = HOTELS.choose(rng).copied().unwrap_or_default();
    HotelRecord {
        hotel: hotel.to_string(),
        city: city.to_string(),
        check_in: future_date(rng, today, CHECK_IN_MEAN_RANGE, CHECK_IN_STD_RANGE),
        nights: rand_nights(rng),
        price_per_night: rand_price_per_night(rng),
    }
}

pub fn generate_hotels<R: Rng + ?Sized>(rng: &mut R, today: NaiveDate, count: usize) -> Vec<HotelRecord> {
    (0..count).map(|_| random_hotel(rng, today)).collect()
}

/// Write `count` fresh hotels to `path`, replacing it unless `append` is set.
pub fn generate_hotel_store<R: Rng + ?Sized>(
    rng: &mut R,
    today: NaiveDate,
    path: &Path,
    count: usize,
    append: bool,
) -> StoreResult<usize> {
    let records = generate_hotels(rng, today, count);
    if append {
        append_jsonl(path, &records)?;
    } else {
        write_jsonl(path, &records)?;
    }
    info!(path = %path.display(), count, append, "hotel store generated");
    Ok(records.len())
}

pub fn sample_hotel<R: Rng + ?Sized>(rng: &mut R, records: &[HotelRecord], city: &str) -> Option<HotelRecord> {
    let matches: Vec<&HotelRecord> = records.iter().filter(|r| r.city == city).collect();
    matches.choose(rng).map(|r| (*r).clone())
}

pub fn sample_hotel_from<R: Rng + ?Sized>(
    rng: &mut R,
    path: &Path,
    city: &str,
) -> StoreResult<Option<HotelRecord>> {
    let records: Vec<HotelRecord> = read_jsonl(path)?;
    Ok(sample_hotel(rng, &records, city))
}
