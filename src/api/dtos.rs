use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::extractor::Record;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ScrapeQuery {
    /// Page to fetch and extract records from.
    pub url: Option<String>,
}

impl ScrapeQuery {
    /// The `url` parameter, if present and not blank.
    pub fn page_url(&self) -> Option<&str> {
        self.url.as_deref().map(str::trim).filter(|url| !url.is_empty())
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ScrapeResponse {
    pub data: Vec<Record>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}
