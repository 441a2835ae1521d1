//! Availability metrics engine.
//!
//! The single pure entry point is [`calculate_metrics`]: it turns the two
//! uploaded time-series and a query window into the five dashboard KPIs.
//! The function is referentially transparent: it reads only its
//! arguments, holds no state across calls, and identical inputs produce
//! bit-identical outputs, so concurrent invocations need no coordination.
//!
//! "Insufficient data" (missing or degenerate window, fewer than two
//! power samples) is an ordinary dashboard state, not an error: it yields
//! the zeroed metrics value. Arithmetic artifacts deep inside a formula
//! (division by zero, infinities) are clamped to zero at the end so the
//! UI always receives renderable numbers.

use crate::algorithms::{clipped_duration, overlap_duration};
use crate::config::AnalysisConfig;
use crate::models::{DateRange, PowerCurvePoint, TimeInterval, TurbineEvent};
use crate::routes::metrics::AvailabilityMetrics;
use crate::services::intervals::build_operational_intervals;

/// Compute the five KPIs for one query window.
pub fn calculate_metrics(
    events: &[TurbineEvent],
    samples: &[PowerCurvePoint],
    window: &DateRange,
    config: &AnalysisConfig,
) -> AvailabilityMetrics {
    let Some(window) = window.resolve() else {
        return AvailabilityMetrics::zeroed();
    };
    if samples.len() < 2 {
        return AvailabilityMetrics::zeroed();
    }

    let intervals = build_operational_intervals(events, samples, config);

    let t_total = window.duration().value();
    let t_operating = clipped_duration(&intervals.operating, &window).value();
    let t_weather = clipped_duration(&intervals.weather_outage, &window).value();
    let t_maintenance = clipped_duration(&intervals.maintenance, &window).value();
    let t_repair = clipped_duration(&intervals.under_repair, &window).value();

    let operational_availability = 100.0 * t_operating / t_total;

    // Weather and planned maintenance are outside technical control, so
    // they leave the denominator.
    let technical_denominator = t_total - t_weather - t_maintenance;
    let technical_availability = if technical_denominator > 0.0 {
        100.0 * t_operating / technical_denominator
    } else {
        0.0
    };

    let failures = count_failures(
        &intervals.operating,
        &intervals.under_repair,
        config.failure_adjacency.value(),
    );

    let mtbf = if failures > 0 {
        (t_operating / 3_600.0) / failures as f64
    } else {
        0.0
    };
    let mttr = if failures > 0 {
        (t_repair / 3_600.0) / failures as f64
    } else {
        0.0
    };

    // Of the time weather alone would explain an outage, what fraction
    // also shows a technical fault. No weather downtime means there is
    // nothing to compare against: fully reliable.
    let reliability = if t_weather > 0.0 {
        let masked = overlap_duration(&intervals.under_repair, &intervals.weather_outage, &window)
            .value();
        100.0 * (1.0 - masked / t_weather)
    } else {
        100.0
    };

    AvailabilityMetrics {
        operational_availability: round2(clamp_percentage(operational_availability)),
        technical_availability: round2(clamp_percentage(technical_availability)),
        mtbf: qtty::Hours::new(round2(clamp_hours(mtbf))),
        mttr: qtty::Hours::new(round2(clamp_hours(mttr))),
        reliability: round2(clamp_percentage(reliability)),
    }
}

/// Number of distinct failure events: operating intervals whose end is
/// followed within `adjacency_seconds` by the start of a repair interval.
///
/// Counting repair-interval starts against merged operating spans avoids
/// double-counting one failure that left several adjacent repair
/// fragments.
fn count_failures(
    operating: &[TimeInterval],
    under_repair: &[TimeInterval],
    adjacency_seconds: f64,
) -> usize {
    under_repair
        .iter()
        .filter(|repair| {
            operating.iter().any(|op| {
                let lag = repair.start.value() - op.end.value();
                (0.0..=adjacency_seconds).contains(&lag)
            })
        })
        .count()
}

fn clamp_percentage(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    value.clamp(0.0, 100.0)
}

fn clamp_hours(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    value.max(0.0)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
