use anyhow::{Context, Result};
use std::path::Path;

use crate::models::{Kilowatts, MetersPerSecond, PowerCurvePoint, Timestamp, TurbineEvent};

/// Candidate header names for the timestamp column
const TIMESTAMP_KEYS: &[&str] = &[
    "timestamp",
    "time",
    "datetime",
    "date_time",
    "date",
    "event_time",
    "eventtime",
];

/// Candidate header names for the event signal name column
const NAME_KEYS: &[&str] = &["name", "event", "event_name", "signal", "signal_name"];

/// Candidate header names for the event status column
const STATUS_KEYS: &[&str] = &["status", "state", "value", "transition"];

/// Candidate header names for the event classification column
const TYPE_KEYS: &[&str] = &["event_type", "eventtype", "type", "category", "class"];

/// Candidate header names for the power output column
const POWER_KEYS: &[&str] = &["power", "power_kw", "active_power", "output", "power_output"];

/// Candidate header names for the wind speed column
const WIND_SPEED_KEYS: &[&str] = &[
    "wind_speed",
    "windspeed",
    "wind",
    "wind_speed_ms",
    "wind_ms",
];

/// Candidate header names for the reference power column
const REF_POWER_KEYS: &[&str] = &[
    "ref_power",
    "refpower",
    "reference_power",
    "expected_power",
    "theoretical_power",
];

/// Split a CSV line respecting quoted fields (handles commas inside quotes).
/// Returns owned strings because quoted fields need unquoting.
fn csv_split(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if in_quotes {
                    // Check for escaped quote ("")
                    if chars.peek() == Some(&'"') {
                        current.push('"');
                        chars.next();
                    } else {
                        in_quotes = false;
                    }
                } else {
                    in_quotes = true;
                }
            }
            ',' if !in_quotes => {
                fields.push(current.clone());
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    fields.push(current);
    fields
}

/// Find the index of the first header matching any candidate name.
fn find_column(columns: &[String], candidates: &[&str]) -> Option<usize> {
    columns.iter().position(|col| {
        let normalized = col.trim().to_lowercase().replace(' ', "_");
        candidates.contains(&normalized.as_str())
    })
}

/// Parse a timestamp cell from the formats turbine SCADA exports use.
///
/// Accepted, in order: Unix epoch seconds (milliseconds are detected and
/// scaled down), RFC 3339, ISO 8601 without timezone (assumed UTC), and
/// `YYYY-MM-DD HH:MM:SS` with optional fraction.
fn parse_timestamp_value(raw: &str) -> Option<Timestamp> {
    let s = raw.trim().trim_matches('"');
    if s.is_empty() || s.eq_ignore_ascii_case("nan") || s.eq_ignore_ascii_case("null") {
        return None;
    }

    if let Ok(epoch) = s.parse::<f64>() {
        if !epoch.is_finite() {
            return None;
        }
        // Millisecond epochs land far beyond any plausible second epoch.
        let seconds = if epoch.abs() > 100_000_000_000.0 {
            epoch / 1_000.0
        } else {
            epoch
        };
        return Some(Timestamp::new(seconds));
    }

    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
        return Some(Timestamp::from_datetime(dt.with_timezone(&chrono::Utc)));
    }

    for fmt in &[
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
    ] {
        if let Ok(naive) = chrono::NaiveDateTime::parse_from_str(s, fmt) {
            return Some(Timestamp::from_datetime(naive.and_utc()));
        }
    }

    None
}

/// Parse an f64 cell, treating empty/nan/null/"-" as absent.
fn parse_f64_value(raw: &str) -> Option<f64> {
    let s = raw.trim().trim_matches('"');
    if s.is_empty()
        || s.eq_ignore_ascii_case("nan")
        || s.eq_ignore_ascii_case("null")
        || s == "-"
    {
        return None;
    }
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn get_field<'a>(fields: &'a [String], idx: Option<usize>) -> Option<&'a str> {
    idx.and_then(|i| fields.get(i)).map(|s| s.as_str())
}

/// Parse a turbine event log CSV into timestamp-sorted events.
///
/// Rows whose timestamp cannot be parsed are dropped with a warning; a
/// header without a recognizable timestamp column is an error.
pub fn parse_event_log_str(csv: &str) -> Result<Vec<TurbineEvent>> {
    let mut lines = csv.lines().filter(|l| !l.trim().is_empty());
    let header = lines.next().context("Event log CSV is empty")?;
    let columns = csv_split(header);

    let timestamp_idx = find_column(&columns, TIMESTAMP_KEYS)
        .context("Event log CSV has no recognizable timestamp column")?;
    let name_idx = find_column(&columns, NAME_KEYS);
    let status_idx = find_column(&columns, STATUS_KEYS);
    let type_idx = find_column(&columns, TYPE_KEYS);

    let mut events = Vec::new();

    for (line_no, line) in lines.enumerate() {
        let fields = csv_split(line);

        let raw_ts = match get_field(&fields, Some(timestamp_idx)) {
            Some(raw) => raw,
            None => continue,
        };
        let timestamp = match parse_timestamp_value(raw_ts) {
            Some(ts) => ts,
            None => {
                log::warn!(
                    "Skipping event log row {}: unparseable timestamp '{}'",
                    line_no + 2,
                    raw_ts
                );
                continue;
            }
        };

        events.push(TurbineEvent {
            timestamp: Some(timestamp),
            name: get_field(&fields, name_idx).unwrap_or("").trim().to_string(),
            status: get_field(&fields, status_idx)
                .unwrap_or("")
                .trim()
                .to_string(),
            event_type: get_field(&fields, type_idx).unwrap_or("").trim().to_string(),
        });
    }

    events.sort_by(|a, b| {
        timestamp_key(&a.timestamp)
            .partial_cmp(&timestamp_key(&b.timestamp))
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    Ok(events)
}

/// Parse a power-curve CSV into timestamp-sorted samples.
pub fn parse_power_curve_str(csv: &str) -> Result<Vec<PowerCurvePoint>> {
    let mut lines = csv.lines().filter(|l| !l.trim().is_empty());
    let header = lines.next().context("Power curve CSV is empty")?;
    let columns = csv_split(header);

    let timestamp_idx = find_column(&columns, TIMESTAMP_KEYS)
        .context("Power curve CSV has no recognizable timestamp column")?;
    let power_idx = find_column(&columns, POWER_KEYS)
        .context("Power curve CSV has no recognizable power column")?;
    let wind_idx = find_column(&columns, WIND_SPEED_KEYS);
    let ref_power_idx = find_column(&columns, REF_POWER_KEYS);

    let mut points = Vec::new();

    for (line_no, line) in lines.enumerate() {
        let fields = csv_split(line);

        let raw_ts = match get_field(&fields, Some(timestamp_idx)) {
            Some(raw) => raw,
            None => continue,
        };
        let timestamp = match parse_timestamp_value(raw_ts) {
            Some(ts) => ts,
            None => {
                log::warn!(
                    "Skipping power curve row {}: unparseable timestamp '{}'",
                    line_no + 2,
                    raw_ts
                );
                continue;
            }
        };

        let power = get_field(&fields, Some(power_idx))
            .and_then(parse_f64_value)
            .unwrap_or(0.0);
        let wind_speed = get_field(&fields, wind_idx)
            .and_then(parse_f64_value)
            .unwrap_or(0.0);
        let ref_power = get_field(&fields, ref_power_idx)
            .and_then(parse_f64_value)
            .unwrap_or(0.0);

        points.push(PowerCurvePoint {
            timestamp: Some(timestamp),
            power: Kilowatts::new(power),
            wind_speed: MetersPerSecond::new(wind_speed),
            ref_power: Kilowatts::new(ref_power),
        });
    }

    points.sort_by(|a, b| {
        timestamp_key(&a.timestamp)
            .partial_cmp(&timestamp_key(&b.timestamp))
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    Ok(points)
}

fn timestamp_key(timestamp: &Option<Timestamp>) -> f64 {
    timestamp.map(|ts| ts.value()).unwrap_or(f64::MIN)
}

/// Parse a turbine event log CSV file.
pub fn parse_event_log_file(path: &Path) -> Result<Vec<TurbineEvent>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read event log file: {}", path.display()))?;
    parse_event_log_str(&content)
}

/// Parse a power-curve CSV file.
pub fn parse_power_curve_file(path: &Path) -> Result<Vec<PowerCurvePoint>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read power curve file: {}", path.display()))?;
    parse_power_curve_str(&content)
}

/// Compute a checksum for uploaded CSV content.
pub fn compute_dataset_checksum(parts: &[&str]) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part.as_bytes());
    }
    let result = hasher.finalize();
    hex::encode(result)
}
