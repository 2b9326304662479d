use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::SeedableRng;

use tripbench_core::store::read_jsonl;
use tripbench_core::{FlightRecord, HotelRecord};
use tripbench_datagen::{
    generate_flight_store, generate_hotel_store, sample_flight_from, sample_hotel_from,
};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 15).unwrap()
}

#[test]
fn test_generate_replaces_then_appends() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data/flights.jsonl");
    let mut rng = StdRng::seed_from_u64(10);

    generate_flight_store(&mut rng, today(), &path, 30, false).unwrap();
    generate_flight_store(&mut rng, today(), &path, 20, false).unwrap();
    assert_eq!(read_jsonl::<FlightRecord>(&path).unwrap().len(), 20);

    generate_flight_store(&mut rng, today(), &path, 5, true).unwrap();
    assert_eq!(read_jsonl::<FlightRecord>(&path).unwrap().len(), 25);
}

#[test]
fn test_sampling_from_generated_stores() {
    let dir = tempfile::tempdir().unwrap();
    let flights = dir.path().join("flights.jsonl");
    let hotels = dir.path().join("hotels.jsonl");
    let mut rng = StdRng::seed_from_u64(99);

    generate_flight_store(&mut rng, today(), &flights, 300, false).unwrap();
    generate_hotel_store(&mut rng, today(), &hotels, 100, false).unwrap();

    let f = sample_flight_from(&mut rng, &flights, "Berlin", "Dubai").unwrap().unwrap();
    assert_eq!(f.origin, "Berlin");
    assert_eq!(f.dest, "Dubai");

    let h: HotelRecord = sample_hotel_from(&mut rng, &hotels, "Tokyo").unwrap().unwrap();
    assert_eq!(h.city, "Tokyo");

    let missing = dir.path().join("nothing.jsonl");
    assert!(sample_flight_from(&mut rng, &missing, "Paris", "Tokyo").unwrap().is_none());
}
