use csv::WriterBuilder;

use crate::extractor::Record;

const HEADERS: [&str; 4] = ["observedValue", "actor", "observedAt", "location"];

/// Renders records as CSV with a header row of field names.
pub fn records_to_csv(records: &[Record]) -> Result<String, csv::Error> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::<u8>::new());

    writer.write_record(HEADERS)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    let bytes = writer
        .into_inner()
        .map_err(|error| csv::Error::from(error.into_error()))?;
    String::from_utf8(bytes).map_err(|error| {
        csv::Error::from(std::io::Error::new(std::io::ErrorKind::InvalidData, error))
    })
}
