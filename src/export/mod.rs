//! Projections of extracted records for presentation: chart series and CSV.

pub mod chart;
pub mod csv_out;

pub use chart::{ChartSeries, chart_series};
pub use csv_out::records_to_csv;
