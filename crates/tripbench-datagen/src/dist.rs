//! Truncated normal sampling on top of `rand`.

use chrono::{Duration, NaiveDate};
use rand::Rng;

use crate::catalog::DATE_OFFSET_BOUNDS;

const MAX_REJECTIONS: usize = 10_000;

/// One standard-normal draw (Box–Muller).
fn standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    // gen::<f64>() is in [0, 1); shift away from 0 for ln
    let u1: f64 = 1.0 - rng.gen::<f64>();
    let u2: f64 = rng.gen::<f64>();
    (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos()
}

/// Normal(μ, σ) restricted to `[lower, upper]` by rejection.
///
/// Falls back to `μ` clamped into the bounds if no draw lands inside after
/// a large number of attempts.
pub fn trunc_gauss<R: Rng + ?Sized>(rng: &mut R, mu: f64, sigma: f64, lower: f64, upper: f64) -> f64 {
    for _ in 0..MAX_REJECTIONS {
        let x = mu + sigma * standard_normal(rng);
        if (lower..=upper).contains(&x) {
            return x;
        }
    }
    mu.clamp(lower, upper)
}

/// Uniform integer in the inclusive `range`.
pub fn uniform<R: Rng + ?Sized>(rng: &mut R, range: (i64, i64)) -> i64 {
    rng.gen_range(range.0..=range.1)
}

/// `today` plus a truncated-gaussian offset, at least one day ahead.
pub fn future_date<R: Rng + ?Sized>(
    rng: &mut R,
    today: NaiveDate,
    mean_range: (i64, i64),
    std_range: (i64, i64),
) -> String {
    let mean = uniform(rng, mean_range) as f64;
    let std = uniform(rng, std_range) as f64;
    let offset = (trunc_gauss(rng, mean, std, DATE_OFFSET_BOUNDS.0, DATE_OFFSET_BOUNDS.1) as i64).max(1);
    (today + Duration::days(offset)).format("%Y-%m-%d").to_string()
}
