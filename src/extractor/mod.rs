pub mod header;
pub mod model;
pub mod rows;
pub mod selector;

#[cfg(test)]
mod tests;

pub use model::{Field, FieldKeywords, HeaderMapping, Record};

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use thiserror::Error;

static CLASS_NAME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^-?[A-Za-z_][A-Za-z0-9_-]*$").expect("hardcoded class name regex is valid")
});

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("invalid table marker '{marker}': {reason}")]
    InvalidMarker { marker: String, reason: String },
}

/// Compiled table marker plus header keywords, shareable across requests.
#[derive(Debug, Clone)]
pub struct TableExtractor {
    marker: String,
    table_selector: Selector,
    keywords: FieldKeywords,
}

impl TableExtractor {
    pub fn new(marker: &str, keywords: FieldKeywords) -> Result<Self, ExtractError> {
        let marker = marker.trim();
        if !CLASS_NAME_REGEX.is_match(marker) {
            return Err(ExtractError::InvalidMarker {
                marker: marker.to_string(),
                reason: "not a CSS class name".to_string(),
            });
        }

        let table_selector =
            Selector::parse(&format!("table.{marker}")).map_err(|error| ExtractError::InvalidMarker {
                marker: marker.to_string(),
                reason: error.to_string(),
            })?;

        Ok(Self {
            marker: marker.to_string(),
            table_selector,
            keywords,
        })
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// Parses `html` and returns the records of the best candidate table.
    pub fn extract(&self, html: &str) -> Vec<Record> {
        let document = Html::parse_document(html);
        self.extract_document(&document)
    }

    pub fn extract_document(&self, document: &Html) -> Vec<Record> {
        selector::select_best(document, &self.table_selector, &self.keywords)
    }
}

impl Default for TableExtractor {
    fn default() -> Self {
        Self::new("wikitable", FieldKeywords::default())
            .expect("default table marker is a valid class name")
    }
}
