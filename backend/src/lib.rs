//! # WindOps Rust Backend
//!
//! Analysis engine for the WindOps wind-turbine operations dashboard.
//!
//! Analysts upload CSV exports of turbine event logs and power-curve
//! samples; this crate derives interval-based reliability/availability
//! KPIs over arbitrary query windows and serves them to the browser
//! frontend through a REST API.
//!
//! ## Features
//!
//! - **Data Loading**: Parse event-log and power-curve CSV exports
//! - **Interval Construction**: Typed operating/outage/repair/maintenance
//!   intervals from raw telemetry
//! - **Interval Algebra**: Window clipping, pairwise overlap, union
//! - **Metrics**: Operational/Technical Availability, MTBF, MTTR,
//!   Reliability for any query window
//! - **Weekly Trends**: Per-calendar-week KPI series for trend charts
//! - **Session State**: In-memory datasets, window selections, annotations
//! - **HTTP API**: RESTful endpoints for frontend integration
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`api`]: Data Transfer Objects (DTOs) for API responses
//! - [`models`]: Domain models (timestamps, intervals, telemetry records)
//! - [`algorithms`]: Pure interval algebra
//! - [`services`]: Interval construction and KPI derivation
//! - [`parsing`]: CSV ingestion boundary
//! - [`store`]: In-memory session state
//! - [`routes`]: Route-specific data types
//! - [`http`]: Axum-based HTTP server and request handlers
//!
//! The analysis core ([`services`] and [`algorithms`]) is a pure function
//! of its arguments: no I/O, no shared mutable state, no caches. Each
//! recomputation starts from scratch, which keeps concurrent invocations
//! trivially safe and results reproducible.

pub mod api;

pub mod algorithms;
pub mod config;
pub mod models;
pub mod parsing;

pub mod routes;

pub mod services;

pub mod store;

#[cfg(feature = "http-server")]
pub mod http;
