//! Readers that turn source bytes into [`RawTable`]s.

mod csv;
mod spreadsheet;
mod word;

use crate::columns::Schema;
use crate::error::Result;
use crate::format::SourceFormat;
use crate::table::RawTable;

pub use word::document_tables;

/// Reads every table contained in `bytes`.
///
/// CSV yields one table, spreadsheets one per sheet, word documents one per
/// top-level table. Header rows of CSV and sheets are located against
/// `schema`.
pub fn read_tables(
    bytes: &[u8],
    format: SourceFormat,
    schema: &Schema,
) -> Result<Vec<RawTable>> {
    match format {
        SourceFormat::Csv => csv::read_csv(bytes, schema).map(|table| vec![table]),
        SourceFormat::Spreadsheet => spreadsheet::read_sheets(bytes, schema),
        SourceFormat::WordTable => word::read_word_tables(bytes),
    }
}
