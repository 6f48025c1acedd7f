use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Selector};

use crate::extractor::model::{HeaderMapping, MappedColumns, Record};

static ROW_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("tr").expect("hardcoded row selector is valid"));

static NUMBER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9]+(?:\.[0-9]+)?").expect("hardcoded number regex is valid"));

/// Rows belonging to `table` itself, skipping rows of nested tables.
pub fn table_rows<'a>(table: ElementRef<'a>) -> Vec<ElementRef<'a>> {
    table
        .select(&ROW_SELECTOR)
        .filter(|row| belongs_to(*row, table))
        .collect()
}

fn belongs_to(row: ElementRef<'_>, table: ElementRef<'_>) -> bool {
    row.ancestors()
        .find(|node| {
            node.value()
                .as_element()
                .is_some_and(|element| element.name() == "table")
        })
        .is_some_and(|node| node.id() == table.id())
}

/// Text of the row's direct `th`/`td` children, left to right.
pub fn cell_texts(row: ElementRef<'_>) -> Vec<String> {
    row.children()
        .filter_map(ElementRef::wrap)
        .filter(|cell| matches!(cell.value().name(), "th" | "td"))
        .map(|cell| cell.text().collect::<String>())
        .collect()
}

/// First decimal number in `text`, or 0 when there is none.
pub fn parse_leading_number(text: &str) -> f64 {
    NUMBER_REGEX
        .find(text)
        .and_then(|found| found.as_str().parse::<f64>().ok())
        .unwrap_or(0.0)
}

/// Builds a record from one row's cells if it passes the validity filter.
pub fn build_record<S: AsRef<str>>(cells: &[S], columns: MappedColumns) -> Option<Record> {
    let cell = |index: usize| cells.get(index).map_or("", |text| text.as_ref().trim());

    let observed_value = parse_leading_number(cell(columns.value));
    let actor = cell(columns.actor);
    let observed_at = cell(columns.date);
    let location = cell(columns.location);

    if observed_value > 0.0 && !actor.is_empty() && !observed_at.is_empty() && !location.is_empty() {
        Some(Record {
            observed_value,
            actor: actor.to_string(),
            observed_at: observed_at.to_string(),
            location: location.to_string(),
        })
    } else {
        None
    }
}

/// Extracts every valid record after `header_row_index`, in document order.
pub fn extract(table: ElementRef<'_>, mapping: &HeaderMapping, header_row_index: usize) -> Vec<Record> {
    let Some(columns) = mapping.columns() else {
        return Vec::new();
    };

    table_rows(table)
        .into_iter()
        .skip(header_row_index.saturating_add(1))
        .filter_map(|row| build_record(&cell_texts(row), columns))
        .collect()
}
