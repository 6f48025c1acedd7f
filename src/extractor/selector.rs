use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::extractor::{
    header::classify,
    model::{FieldKeywords, Record},
    rows::{self, cell_texts, table_rows},
};

const HEADER_ROW: usize = 0;

/// Runs header classification and row extraction on a single candidate table.
pub fn extract_table(table: ElementRef<'_>, keywords: &FieldKeywords) -> Vec<Record> {
    let Some(header_row) = table_rows(table).into_iter().nth(HEADER_ROW) else {
        return Vec::new();
    };
    let mapping = classify(&cell_texts(header_row), keywords);
    rows::extract(table, &mapping, HEADER_ROW)
}

/// Returns the records of the marked table that yields the most valid rows.
///
/// Every candidate is evaluated. Ties keep the earliest table, and a page with
/// no candidates or no valid rows gives an empty result.
pub fn select_best(document: &Html, table_marker: &Selector, keywords: &FieldKeywords) -> Vec<Record> {
    let mut best: Vec<Record> = Vec::new();

    for (position, table) in document.select(table_marker).enumerate() {
        let records = extract_table(table, keywords);
        debug!(table = position, records = records.len(), "evaluated candidate table");
        if records.len() > best.len() {
            best = records;
        }
    }

    best
}
