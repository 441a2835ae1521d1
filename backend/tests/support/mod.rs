#![allow(dead_code)]

use std::path::PathBuf;

use windops_rust::models::{
    DateRange, Kilowatts, MetersPerSecond, PowerCurvePoint, Timestamp, TurbineDataset,
    TurbineEvent,
};

/// Path to a fixture under `backend/data/`.
pub fn fixture_path(file_name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("data")
        .join(file_name)
}

pub fn read_fixture(file_name: &str) -> String {
    std::fs::read_to_string(fixture_path(file_name)).expect("Failed to read fixture file")
}

pub fn sample(ts: f64, power: f64, wind: f64) -> PowerCurvePoint {
    PowerCurvePoint {
        timestamp: Some(Timestamp::new(ts)),
        power: Kilowatts::new(power),
        wind_speed: MetersPerSecond::new(wind),
        ref_power: Kilowatts::new(power.max(0.0)),
    }
}

pub fn event(ts: f64, name: &str, status: &str, event_type: &str) -> TurbineEvent {
    TurbineEvent {
        timestamp: Some(Timestamp::new(ts)),
        name: name.to_string(),
        status: status.to_string(),
        event_type: event_type.to_string(),
    }
}

pub fn window(start: f64, end: f64) -> DateRange {
    DateRange::new(Timestamp::new(start), Timestamp::new(end))
}

/// A producing series of `count` samples at `step`-second cadence.
pub fn producing_series(start: f64, step: f64, count: usize) -> Vec<PowerCurvePoint> {
    (0..count)
        .map(|i| sample(start + i as f64 * step, 1_400.0 + (i % 5) as f64 * 20.0, 8.0))
        .collect()
}

pub fn dataset(
    name: &str,
    events: Vec<TurbineEvent>,
    power_curve: Vec<PowerCurvePoint>,
) -> TurbineDataset {
    TurbineDataset {
        name: name.to_string(),
        checksum: format!("test_{}", name),
        events,
        power_curve,
    }
}
