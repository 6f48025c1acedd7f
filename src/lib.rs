//! Extracts record-progression time series (value, actor, date, venue) from
//! loosely structured HTML tables.
//!
//! The core lives in [`extractor`]: candidate tables are found by CSS class,
//! headers are matched against configurable keywords and the table yielding
//! the most valid rows wins. [`fetcher`], [`api`] and [`export`] wrap it for
//! HTTP use.

pub mod api;
pub mod app_state;
pub mod config;
pub mod export;
pub mod extractor;
pub mod fetcher;
pub mod health;
pub mod telemetry;

pub use extractor::{Record, TableExtractor};
