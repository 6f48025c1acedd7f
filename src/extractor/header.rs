use crate::extractor::model::{Field, FieldKeywords, HeaderMapping};

/// Maps each field to the first header cell containing one of its keywords.
pub fn classify<S: AsRef<str>>(header_cells: &[S], keywords: &FieldKeywords) -> HeaderMapping {
    let mut mapping = HeaderMapping::default();

    for (column, cell) in header_cells.iter().enumerate() {
        let header = cell.as_ref().trim().to_lowercase();
        for field in Field::ALL {
            if mapping.get(field).is_none() && keywords.matches(field, &header) {
                mapping.insert_first(field, column);
            }
        }
    }

    mapping
}
