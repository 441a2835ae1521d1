//! Pure computational algorithms shared by the service layer.

pub mod intervals;

pub use intervals::{clipped_duration, merge_with_tolerance, overlap_duration, union};
