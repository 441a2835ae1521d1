//! Weekly KPI aggregation for trend charts.
//!
//! A thin driver over the metrics engine: enumerate the ISO calendar
//! weeks (Monday start) overlapping a range, clip partial weeks against
//! the range, and run the engine once per week that actually contains
//! data. Weeks with no matching records are skipped entirely: the chart
//! shows no bar rather than a zero bar.

use chrono::{Datelike, Duration, NaiveDate};

use crate::config::AnalysisConfig;
use crate::models::{DateRange, PowerCurvePoint, TimeInterval, Timestamp, TurbineEvent};
use crate::routes::trends::WeeklyTrendsData;
use crate::services::metrics::calculate_metrics;

/// Compute per-week KPI series over `range`.
pub fn calculate_weekly_metrics(
    events: &[TurbineEvent],
    samples: &[PowerCurvePoint],
    range: &DateRange,
    config: &AnalysisConfig,
) -> WeeklyTrendsData {
    let mut data = WeeklyTrendsData::default();

    let Some(span) = range.resolve() else {
        return data;
    };

    let mut week_start = monday_of(span.start);

    loop {
        let week_start_ts = date_to_timestamp(week_start);
        if week_start_ts.value() >= span.end.value() {
            break;
        }
        let week_end = week_start + Duration::days(7);
        let week_end_ts = date_to_timestamp(week_end);

        let effective_start = week_start_ts.value().max(span.start.value());
        let effective_end = week_end_ts.value().min(span.end.value());

        if effective_end > effective_start {
            let effective = TimeInterval::new(
                Timestamp::new(effective_start),
                Timestamp::new(effective_end),
            );

            let week_events: Vec<TurbineEvent> = events
                .iter()
                .filter(|e| in_window(&e.timestamp, &effective))
                .cloned()
                .collect();
            let week_samples: Vec<PowerCurvePoint> = samples
                .iter()
                .filter(|p| in_window(&p.timestamp, &effective))
                .cloned()
                .collect();

            if !(week_events.is_empty() && week_samples.is_empty()) {
                let metrics =
                    calculate_metrics(&week_events, &week_samples, &effective.into(), config);

                data.labels.push(week_start.format("%Y-%m-%d").to_string());
                data.ao_data.push(metrics.operational_availability);
                data.at_data.push(metrics.technical_availability);
                data.reliability_data.push(metrics.reliability);
            }
        }

        week_start = week_end;
    }

    data
}

/// Monday of the ISO week containing the instant.
fn monday_of(instant: Timestamp) -> NaiveDate {
    let date = instant.to_datetime().date_naive();
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

fn date_to_timestamp(date: NaiveDate) -> Timestamp {
    let midnight = date.and_hms_opt(0, 0, 0).expect("Valid midnight").and_utc();
    Timestamp::from_datetime(midnight)
}

fn in_window(timestamp: &Option<Timestamp>, window: &TimeInterval) -> bool {
    timestamp.map(|ts| window.contains(&ts)).unwrap_or(false)
}
