//! Domain models for turbine telemetry and time windows.

pub mod interval;
pub mod telemetry;
pub mod time;

pub use interval::{DateRange, TimeInterval};
pub use telemetry::{Kilowatts, MetersPerSecond, PowerCurvePoint, TurbineDataset, TurbineEvent};
pub use time::Timestamp;
