use csv::ReaderBuilder;

use crate::columns::Schema;
use crate::error::{Result, SchemaError};
use crate::format::SourceFormat;
use crate::table::{HeaderRow, RawTable};

pub(super) fn read_csv(bytes: &[u8], schema: &Schema) -> Result<RawTable> {
    let bytes = bytes.strip_prefix(b"\xef\xbb\xbf").unwrap_or(bytes);
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);
    let mut raw_rows = Vec::new();
    for record in reader.byte_records() {
        let record = record.map_err(|e| SchemaError::unreadable(SourceFormat::Csv, e))?;
        let row: Vec<String> = record
            .iter()
            .map(|field| String::from_utf8_lossy(field).into_owned())
            .collect();
        raw_rows.push(row);
    }
    Ok(RawTable::from_rows(None, raw_rows, HeaderRow::Detect(schema)))
}
