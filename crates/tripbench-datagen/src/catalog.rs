//! Fixed vocabularies and distribution parameters for generated data.

pub const CITIES: &[&str] = &["Paris", "Tokyo", "New York", "Berlin", "Dubai"];
pub const AIRLINES: &[&str] = &["AirDemo", "SkyTest", "FlyMock"];
pub const HOTELS: &[&str] = &["HotelDemo", "StayTest", "InnMock"];

/// Scenario depth (number of cities), inclusive.
pub const MIN_CITIES: usize = 2;
pub const MAX_CITIES: usize = 5;
/// Chance that a scenario asks for a second optional task per stop.
pub const PROB_OPTIONAL_TASK: f64 = 0.5;
pub const PROB_BOOK_HOTEL: f64 = 0.8;
/// Days to plan per city, inclusive.
pub const PLAN_DAYS_RANGE: (u32, u32) = (1, 3);

/// Range μ is drawn from for flight prices (USD).
pub const FLIGHT_PRICE_MEAN_RANGE: (i64, i64) = (200, 700);
pub const FLIGHT_PRICE_BOUNDS: (f64, f64) = (50.0, 2000.0);
pub const FLIGHT_PRICE_SIGMA_RATIO: f64 = 0.2;
/// Departure offset from today: μ and σ ranges, in days.
pub const FLIGHT_DATE_MEAN_RANGE: (i64, i64) = (30, 120);
pub const FLIGHT_DATE_STD_RANGE: (i64, i64) = (5, 20);

/// Range μ is drawn from for hotel prices (USD per night).
pub const HOTEL_PRICE_MEAN_RANGE: (i64, i64) = (80, 350);
pub const HOTEL_PRICE_BOUNDS: (f64, f64) = (30.0, 1200.0);
pub const HOTEL_PRICE_SIGMA_RATIO: f64 = 0.25;
pub const NIGHTS_MEAN_RANGE: (i64, i64) = (3, 7);
pub const NIGHTS_BOUNDS: (f64, f64) = (1.0, 30.0);
pub const NIGHTS_SIGMA_RATIO: f64 = 0.4;
pub const CHECK_IN_MEAN_RANGE: (i64, i64) = (10, 60);
pub const CHECK_IN_STD_RANGE: (i64, i64) = (3, 15);

/// Date offsets are truncated to this window, in days.
pub const DATE_OFFSET_BOUNDS: (f64, f64) = (1.0, 365.0);
