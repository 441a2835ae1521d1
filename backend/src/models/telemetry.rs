//! Telemetry records uploaded by analysts.
//!
//! Two independent time-series feed the analysis core: discrete turbine
//! status/fault events and periodic power-curve samples. Both arrive from the
//! CSV ingestion boundary already sorted by timestamp; rows whose timestamp
//! could not be parsed carry `None` and are ignored during interval
//! construction.

use serde::{Deserialize, Serialize};

use crate::models::interval::TimeInterval;
use crate::models::time::Timestamp;

pub use qtty::power::Kilowatts;

/// Wind speed in metres per second.
pub type MetersPerSecond = qtty::velocity::Velocity<qtty::length::Meter, qtty::time::Second>;

/// Discrete state-change record from the turbine event log.
///
/// Only `timestamp`, `name`, `status` and `event_type` are consumed by the
/// analysis core; the event log may carry more columns, which the ingestion
/// boundary drops.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurbineEvent {
    pub timestamp: Option<Timestamp>,
    /// Signal name, e.g. the identifier of a binary ON/OFF channel.
    pub name: String,
    /// Transition value, typically "ON" or "OFF".
    pub status: String,
    /// Free-form classification string, e.g. "fault", "maintenance".
    pub event_type: String,
}

impl TurbineEvent {
    /// Case-insensitive, whitespace-tolerant status match.
    fn status_is(&self, expected: &str) -> bool {
        self.status.trim().eq_ignore_ascii_case(expected)
    }

    /// Whether this record is an ON transition.
    pub fn is_on(&self) -> bool {
        self.status_is("ON")
    }

    /// Whether this record is an OFF transition.
    pub fn is_off(&self) -> bool {
        self.status_is("OFF")
    }

    /// Whether `event_type` carries the given classification keyword,
    /// case-insensitive substring match.
    pub fn has_type_keyword(&self, keyword: &str) -> bool {
        self.event_type
            .to_lowercase()
            .contains(&keyword.to_lowercase())
    }
}

/// Periodic sample of instantaneous output and wind conditions.
///
/// Consecutive samples implicitly define intervals: the state observed at
/// sample *i* is assumed to hold for `[timestamp[i], timestamp[i+1])`.
/// No interpolation happens anywhere downstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerCurvePoint {
    pub timestamp: Option<Timestamp>,
    /// Measured instantaneous output.
    pub power: Kilowatts,
    /// Measured wind speed at the nacelle.
    pub wind_speed: MetersPerSecond,
    /// Manufacturer reference output for the measured wind speed.
    pub ref_power: Kilowatts,
}

impl PowerCurvePoint {
    /// Whether the turbine was producing at this sample.
    pub fn is_producing(&self) -> bool {
        self.power.value() > 0.0
    }
}

/// One uploaded pair of CSV exports, held in session memory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurbineDataset {
    pub name: String,
    /// SHA-256 over the uploaded CSV content.
    pub checksum: String,
    pub events: Vec<TurbineEvent>,
    pub power_curve: Vec<PowerCurvePoint>,
}

impl TurbineDataset {
    /// Earliest-to-latest span covered by either series, or `None` when no
    /// record carries a timestamp.
    pub fn extent(&self) -> Option<TimeInterval> {
        let mut min_start: Option<f64> = None;
        let mut max_end: Option<f64> = None;

        let mut consider = |ts: &Option<Timestamp>| {
            if let Some(ts) = ts {
                let v = ts.value();
                min_start = Some(min_start.map_or(v, |m| m.min(v)));
                max_end = Some(max_end.map_or(v, |m| m.max(v)));
            }
        };

        for event in &self.events {
            consider(&event.timestamp);
        }
        for point in &self.power_curve {
            consider(&point.timestamp);
        }

        match (min_start, max_end) {
            (Some(start), Some(end)) => Some(TimeInterval::new(
                Timestamp::new(start),
                Timestamp::new(end),
            )),
            _ => None,
        }
    }

    pub fn event_count(&self) -> usize {
        self.events.len()
    }

    pub fn sample_count(&self) -> usize {
        self.power_curve.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(ts: f64, name: &str, status: &str, event_type: &str) -> TurbineEvent {
        TurbineEvent {
            timestamp: Some(Timestamp::new(ts)),
            name: name.to_string(),
            status: status.to_string(),
            event_type: event_type.to_string(),
        }
    }

    fn sample(ts: f64, power: f64, wind: f64) -> PowerCurvePoint {
        PowerCurvePoint {
            timestamp: Some(Timestamp::new(ts)),
            power: Kilowatts::new(power),
            wind_speed: MetersPerSecond::new(wind),
            ref_power: Kilowatts::new(power),
        }
    }

    #[test]
    fn status_matching_tolerates_case_and_whitespace() {
        let e = event(0.0, "GridLoss", " on ", "Fault");
        assert!(e.is_on());
        assert!(!e.is_off());

        let e = event(0.0, "GridLoss", "Off", "Fault");
        assert!(e.is_off());
    }

    #[test]
    fn type_keyword_is_substring_case_insensitive() {
        let e = event(0.0, "PitchSystem", "ON", "Component Fault");
        assert!(e.has_type_keyword("fault"));
        assert!(!e.has_type_keyword("maintenance"));
    }

    #[test]
    fn producing_requires_positive_power() {
        assert!(sample(0.0, 150.0, 8.0).is_producing());
        assert!(!sample(0.0, 0.0, 8.0).is_producing());
        assert!(!sample(0.0, -2.5, 8.0).is_producing());
    }

    #[test]
    fn extent_spans_both_series() {
        let dataset = TurbineDataset {
            name: "unit".to_string(),
            checksum: String::new(),
            events: vec![event(500.0, "Maint", "ON", "maintenance")],
            power_curve: vec![sample(100.0, 10.0, 5.0), sample(700.0, 12.0, 6.0)],
        };

        let extent = dataset.extent().unwrap();
        assert_eq!(extent.start.value(), 100.0);
        assert_eq!(extent.end.value(), 700.0);
    }

    #[test]
    fn extent_ignores_null_timestamps() {
        let mut no_ts = event(0.0, "Maint", "ON", "maintenance");
        no_ts.timestamp = None;

        let dataset = TurbineDataset {
            name: "unit".to_string(),
            checksum: String::new(),
            events: vec![no_ts],
            power_curve: vec![],
        };

        assert!(dataset.extent().is_none());
    }
}
