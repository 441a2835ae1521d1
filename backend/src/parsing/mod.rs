//! CSV ingestion boundary.
//!
//! Turbine SCADA exports differ in column naming and timestamp formats;
//! the parser maps headers against candidate-name lists and tries the
//! timestamp formats in order. Malformed rows are filtered out here so
//! the analysis core only ever sees records it can use.

pub mod csv_parser;

pub use csv_parser::{
    compute_dataset_checksum, parse_event_log_file, parse_event_log_str, parse_power_curve_file,
    parse_power_curve_str,
};
