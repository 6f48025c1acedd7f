use std::fs;

use crate::extractor::{ExtractError, FieldKeywords, Record, TableExtractor};

#[test]
fn test_extract_single_wikitable() {
    let html = r#"<html><body><table class="wikitable">
        <tr><th>Mark</th><th>Athlete</th><th>Date</th><th>Venue</th></tr>
        <tr><td>1.46 m (4 ft 9+1⁄4 in)</td><td>Jane Doe</td><td>12 June 1932</td><td>Los Angeles</td></tr>
    </table></body></html>"#;

    let records = TableExtractor::default().extract(html);

    assert_eq!(
        records,
        vec![Record {
            observed_value: 1.46,
            actor: "Jane Doe".to_string(),
            observed_at: "12 June 1932".to_string(),
            location: "Los Angeles".to_string(),
        }]
    );
}

#[test]
fn test_extract_progression_page() {
    let html = fs::read_to_string("src/extractor/tests/fixtures/high_jump.html")
        .expect("Failed to read test fixture");

    let records = TableExtractor::default().extract(&html);

    // The sortable table has more valid rows than the early-records table
    assert_eq!(records.len(), 4);
    assert_eq!(records[0].observed_value, 1.65);
    assert_eq!(records[0].actor, "Jean Shiley (USA)");
    assert_eq!(records[0].observed_at, "7 August 1932");
    assert_eq!(records[0].location, "Los Angeles, United States");
    assert_eq!(records[3].observed_value, 2.09);
    assert_eq!(records[3].actor, "Stefka Kostadinova (BUL)");
    assert!(records.iter().all(|record| record.actor != "Unknown"));
}

#[test]
fn test_extract_without_marked_table() {
    let html = fs::read_to_string("src/extractor/tests/fixtures/no_marker.html")
        .expect("Failed to read test fixture");

    assert!(TableExtractor::default().extract(&html).is_empty());
}

#[test]
fn test_extract_with_custom_marker() {
    let html = fs::read_to_string("src/extractor/tests/fixtures/no_marker.html")
        .expect("Failed to read test fixture");

    let extractor = TableExtractor::new("infobox", FieldKeywords::default()).unwrap();
    let records = extractor.extract(&html);

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].observed_value, 2.45);
    assert_eq!(records[0].location, "Salamanca");
}

#[test]
fn test_extract_empty_document() {
    assert!(TableExtractor::default().extract("").is_empty());
}

#[test]
fn test_extract_malformed_html() {
    let html = r#"<table class="wikitable"><tr><th>Mark<th>Athlete<th>Date<th>Venue
        <tr><td>1.50 m<td>Ann<td>1 May 1950<td>Oslo"#;

    let records = TableExtractor::default().extract(html);

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].actor, "Ann");
}

#[test]
fn test_invalid_marker_is_rejected() {
    for marker in ["", "wiki table", "table.x", "1abc"] {
        match TableExtractor::new(marker, FieldKeywords::default()) {
            Err(ExtractError::InvalidMarker { .. }) => {}
            other => panic!("Expected InvalidMarker for {marker:?}, got {other:?}"),
        }
    }
}

#[cfg(feature = "fuzz")]
mod fuzz {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_extract_never_panics(html in ".*") {
            let _ = TableExtractor::default().extract(&html);
        }

        #[test]
        fn test_extracted_records_are_valid(
            rows in proptest::collection::vec(("[0-9]{0,2}(\\.[0-9]{1,2})?", "[a-z ]{0,6}", "[0-9 ]{0,4}", "[A-Z ]{0,5}"), 0..8)
        ) {
            let body: String = rows
                .iter()
                .map(|(mark, athlete, date, venue)| {
                    format!("<tr><td>{mark}</td><td>{athlete}</td><td>{date}</td><td>{venue}</td></tr>")
                })
                .collect();
            let html = format!(
                r#"<table class="wikitable"><tr><th>Mark</th><th>Athlete</th><th>Date</th><th>Venue</th></tr>{body}</table>"#
            );
            for record in TableExtractor::default().extract(&html) {
                prop_assert!(record.observed_value > 0.0);
                prop_assert!(!record.actor.is_empty());
                prop_assert!(!record.observed_at.is_empty());
                prop_assert!(!record.location.is_empty());
            }
        }
    }
}
