use serde::*;

/// Instant on the turbine's operational timeline.
/// Stored as seconds since the Unix epoch (1970-01-01 00:00:00 UTC).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Timestamp(qtty::Seconds);

impl Timestamp {
    /// Create a new timestamp from Unix-epoch seconds.
    pub fn new<V: Into<qtty::Seconds>>(v: V) -> Self {
        Self(v.into())
    }

    /// Raw Unix-epoch seconds as f64.
    pub fn value(&self) -> f64 {
        self.0.value()
    }

    /// Convert to chrono DateTime<Utc>.
    pub fn to_datetime(&self) -> chrono::DateTime<chrono::Utc> {
        let secs = self.value();
        let secs_i64 = secs.floor() as i64;
        let nanos = ((secs - secs.floor()) * 1e9) as u32;
        chrono::DateTime::from_timestamp(secs_i64, nanos)
            .unwrap_or_else(|| chrono::DateTime::UNIX_EPOCH)
    }

    /// Create from chrono DateTime<Utc>.
    pub fn from_datetime(dt: chrono::DateTime<chrono::Utc>) -> Self {
        Self::new(dt.timestamp() as f64 + dt.timestamp_subsec_nanos() as f64 / 1e9)
    }

    /// Seconds elapsed since another timestamp. Negative if `other` is later.
    pub fn seconds_since(&self, other: &Timestamp) -> qtty::Seconds {
        qtty::Seconds::new(self.value() - other.value())
    }
}

impl From<f64> for Timestamp {
    fn from(v: f64) -> Self {
        Timestamp::new(v)
    }
}
