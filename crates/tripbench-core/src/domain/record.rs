//! Candidate records backing the flight and hotel agents.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Cost assigned to a record with no usable price; ranks after every priced row.
pub const UNPRICED: i64 = 1_000_000_000;
/// Date assigned to a record with no date; ranks after every dated row.
pub const UNDATED: &str = "9999-12-31";

fn unpriced() -> i64 {
    UNPRICED
}

fn undated() -> String {
    UNDATED.to_string()
}

fn one_night() -> i64 {
    1
}

/// Integer, float (rounded) or numeric string; anything else is [`UNPRICED`].
fn lenient_price<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let value = Value::deserialize(deserializer)?;
    let price = match &value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.round() as i64)),
        Value::String(s) => s.trim().parse::<f64>().ok().map(|f| f.round() as i64),
        _ => None,
    };
    Ok(price.unwrap_or(UNPRICED))
}

/// A record that can be ranked for selection.
///
/// Ranking is ascending by `(primary cost, date)`: cheapest first, then earliest.
pub trait Candidate {
    fn cost(&self) -> i64;
    fn date(&self) -> &str;
}

/// One bookable flight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightRecord {
    #[serde(default)]
    pub airline: String,
    #[serde(default)]
    pub origin: String,
    #[serde(default)]
    pub dest: String,
    /// ISO date, `YYYY-MM-DD`.
    #[serde(default = "undated")]
    pub date: String,
    /// Price in USD.
    #[serde(default = "unpriced", deserialize_with = "lenient_price")]
    pub price: i64,
}

impl Candidate for FlightRecord {
    fn cost(&self) -> i64 {
        self.price
    }

    fn date(&self) -> &str {
        &self.date
    }
}

/// One bookable hotel stay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HotelRecord {
    #[serde(default)]
    pub hotel: String,
    #[serde(default)]
    pub city: String,
    /// ISO date, `YYYY-MM-DD`.
    #[serde(default = "undated")]
    pub check_in: String,
    #[serde(default = "one_night")]
    pub nights: i64,
    /// Price per night in USD.
    #[serde(default = "unpriced", deserialize_with = "lenient_price")]
    pub price_per_night: i64,
}

impl Candidate for HotelRecord {
    fn cost(&self) -> i64 {
        self.price_per_night
    }

    fn date(&self) -> &str {
        &self.check_in
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_and_string_prices_are_accepted() {
        let f: FlightRecord = serde_json::from_str(
            r#"{"airline":"A","origin":"Paris","dest":"Tokyo","date":"2026-01-01","price":420.0}"#,
        )
        .unwrap();
        assert_eq!(f.price, 420);

        let h: HotelRecord = serde_json::from_str(
            r#"{"hotel":"H","city":"Tokyo","check_in":"2026-01-01","nights":2,"price_per_night":"99.6"}"#,
        )
        .unwrap();
        assert_eq!(h.price_per_night, 100);
    }

    #[test]
    fn test_missing_fields_take_ranking_defaults() {
        let h: HotelRecord =
            serde_json::from_str(r#"{"hotel":"H","city":"Tokyo","price_per_night":80}"#).unwrap();
        assert_eq!(h.nights, 1);
        assert_eq!(h.check_in, UNDATED);

        let f: FlightRecord =
            serde_json::from_str(r#"{"origin":"Paris","dest":"Tokyo","price":null}"#).unwrap();
        assert_eq!(f.price, UNPRICED);
        assert_eq!(f.date, UNDATED);
        assert_eq!(f.airline, "");
    }
}
