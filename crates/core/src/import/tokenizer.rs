use csv::{ReaderBuilder, StringRecord, Terminator, Trim};

use crate::errors::CoreError;

/// Read one statement line as a CSV record, every field trimmed.
///
/// Lines are read one at a time so each record keeps its position among the
/// statement's lines. Quoted fields may contain commas and `""` escapes; an
/// unterminated quote is closed by the end of the line. The record has one
/// more field than there are commas outside quotes.
pub fn read_record(line: &str) -> Result<StringRecord, CoreError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .terminator(Terminator::Any(b'\n'))
        .from_reader(line.as_bytes());

    Ok(reader.records().next().transpose()?.unwrap_or_default())
}
