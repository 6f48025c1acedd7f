use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::extractor::Record;

/// Category axis (observation dates) with one plotted value per category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

pub fn chart_series(records: &[Record]) -> ChartSeries {
    let (labels, values) = records
        .iter()
        .map(|record| (record.observed_at.clone(), record.observed_value))
        .unzip();
    ChartSeries { labels, values }
}
