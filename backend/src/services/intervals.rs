//! Interval construction from raw telemetry.
//!
//! Converts the two uploaded time-series into typed, half-open interval
//! sets per operating condition. Two constructions exist:
//!
//! * **Power-curve classification**: every adjacent sample pair
//!   `(p1, p2)` defines `[p1.t, p2.t)`, classified by the state observed
//!   at `p1`. Last observed value holds for the whole gap; nothing is
//!   interpolated.
//! * **Event pairing**: binary ON/OFF signals are paired per signal name
//!   into spans. Pairings longer than the configured maximum are assumed
//!   to have lost their OFF record and are discarded; spans separated by
//!   small gaps are merged, so a brief reconnection inside one outage does
//!   not count as a second failure.
//!
//! Records without a timestamp take part in neither construction.

use std::collections::HashMap;

use crate::algorithms::{merge_with_tolerance, union};
use crate::config::AnalysisConfig;
use crate::models::{PowerCurvePoint, TimeInterval, Timestamp, TurbineEvent};

/// Typed interval sets for one dataset.
///
/// `weather_outage` and `under_repair` are independent, non-exclusive
/// classifications: a span may appear in both. `unclassified_downtime` is
/// downtime that is neither weather-explained nor fault-flagged; it is
/// tracked but currently feeds no published KPI.
#[derive(Debug, Clone, Default)]
pub struct OperationalIntervals {
    pub operating: Vec<TimeInterval>,
    pub weather_outage: Vec<TimeInterval>,
    pub under_repair: Vec<TimeInterval>,
    pub maintenance: Vec<TimeInterval>,
    pub unclassified_downtime: Vec<TimeInterval>,
}

/// Build all interval sets for one dataset.
///
/// Inputs arrive timestamp-sorted from the ingestion boundary and are NOT
/// pre-clipped to any query window; clipping happens at
/// duration-summation time so boundary-straddling intervals keep their
/// in-window portion.
pub fn build_operational_intervals(
    events: &[TurbineEvent],
    samples: &[PowerCurvePoint],
    config: &AnalysisConfig,
) -> OperationalIntervals {
    let fault_events: Vec<&TurbineEvent> = events
        .iter()
        .filter(|e| e.timestamp.is_some() && e.has_type_keyword(&config.fault_event_keyword))
        .collect();
    let maintenance_events: Vec<&TurbineEvent> = events
        .iter()
        .filter(|e| e.timestamp.is_some() && e.has_type_keyword(&config.maintenance_event_keyword))
        .collect();

    let mut operating = Vec::new();
    let mut weather_outage = Vec::new();
    let mut unclassified_downtime = Vec::new();

    let timed: Vec<(&PowerCurvePoint, Timestamp)> = samples
        .iter()
        .filter_map(|p| p.timestamp.map(|t| (p, t)))
        .collect();

    for pair in timed.windows(2) {
        let (p1, t1) = pair[0];
        let (_, t2) = pair[1];
        if t2.value() <= t1.value() {
            continue;
        }
        let span = TimeInterval::new(t1, t2);

        if p1.is_producing() {
            operating.push(span);
            continue;
        }

        let is_weather =
            p1.wind_speed < config.cut_in_speed || p1.wind_speed > config.cut_out_speed;
        if is_weather {
            weather_outage.push(span);
        }

        let has_fault = fault_events
            .iter()
            .any(|e| e.timestamp.map(|ts| span.contains(&ts)).unwrap_or(false));

        if !is_weather && !has_fault {
            unclassified_downtime.push(span);
        }
    }

    OperationalIntervals {
        // Coalesce adjacent fragments so an operating span's true end is
        // visible to failure counting.
        operating: union(&[&operating]),
        weather_outage: union(&[&weather_outage]),
        under_repair: pair_event_intervals(
            fault_events.iter().copied(),
            config.max_event_interval_seconds(),
            config.gap_merge_tolerance_seconds(),
        ),
        maintenance: pair_event_intervals(
            maintenance_events.iter().copied(),
            config.max_event_interval_seconds(),
            config.gap_merge_tolerance_seconds(),
        ),
        unclassified_downtime: union(&[&unclassified_downtime]),
    }
}

/// Pair ON→OFF transitions of binary signals into spans, per signal name.
///
/// An ON without a following OFF before the data ends produces no
/// interval; an OFF without a pending ON is ignored; repeated ONs keep
/// the earliest pending start. Pairings longer than
/// `max_interval_seconds` are discarded, then the surviving spans are
/// merged across signals with `gap_tolerance_seconds` of slack.
pub fn pair_event_intervals<'a, I>(
    events: I,
    max_interval_seconds: f64,
    gap_tolerance_seconds: f64,
) -> Vec<TimeInterval>
where
    I: IntoIterator<Item = &'a TurbineEvent>,
{
    let mut by_name: HashMap<&str, Vec<(Timestamp, bool)>> = HashMap::new();

    for event in events {
        let Some(ts) = event.timestamp else { continue };
        if event.is_on() {
            by_name.entry(event.name.as_str()).or_default().push((ts, true));
        } else if event.is_off() {
            by_name.entry(event.name.as_str()).or_default().push((ts, false));
        }
    }

    let mut paired = Vec::new();

    for (name, mut transitions) in by_name {
        transitions.sort_by(|a, b| {
            a.0.value()
                .partial_cmp(&b.0.value())
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let mut pending: Option<Timestamp> = None;
        for (ts, is_on) in transitions {
            if is_on {
                if pending.is_none() {
                    pending = Some(ts);
                }
            } else if let Some(start) = pending.take() {
                let span = TimeInterval::new(start, ts);
                if span.duration().value() <= max_interval_seconds {
                    paired.push(span);
                } else {
                    log::warn!(
                        "Discarding implausible {:.1} h pairing of signal '{}'",
                        span.duration_hours().value(),
                        name
                    );
                }
            }
        }
    }

    merge_with_tolerance(&paired, gap_tolerance_seconds)
}
