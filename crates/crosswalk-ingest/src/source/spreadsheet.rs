use std::io::Cursor;

use calamine::{Data, Reader, open_workbook_auto_from_rs};
use tracing::debug;

use crate::columns::Schema;
use crate::error::{Result, SchemaError};
use crate::format::SourceFormat;
use crate::table::{HeaderRow, RawTable};

pub(super) fn read_sheets(bytes: &[u8], schema: &Schema) -> Result<Vec<RawTable>> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
        .map_err(|e| SchemaError::unreadable(SourceFormat::Spreadsheet, e))?;
    let sheet_names = workbook.sheet_names().to_vec();
    let mut tables = Vec::with_capacity(sheet_names.len());
    for name in sheet_names {
        let range = workbook
            .worksheet_range(&name)
            .map_err(|e| SchemaError::unreadable(SourceFormat::Spreadsheet, e))?;
        let raw_rows: Vec<Vec<String>> = range
            .rows()
            .map(|row| row.iter().map(cell_text).collect())
            .collect();
        debug!(sheet = %name, rows = raw_rows.len(), "read worksheet");
        tables.push(RawTable::from_rows(Some(name), raw_rows, HeaderRow::Detect(schema)));
    }
    Ok(tables)
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(n) => {
            // whole numbers print without a trailing ".0"
            if n.fract() == 0.0 && n.abs() < 1e15 {
                format!("{}", *n as i64)
            } else {
                format!("{n}")
            }
        }
        Data::Int(n) => n.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::columns::NDIS_SCHEMA;

    #[test]
    fn formats_numeric_cells() {
        assert_eq!(cell_text(&Data::Float(1500.0)), "1500");
        assert_eq!(cell_text(&Data::Float(12.5)), "12.5");
        assert_eq!(cell_text(&Data::Int(7)), "7");
        assert_eq!(cell_text(&Data::Empty), "");
        assert_eq!(cell_text(&Data::String("Hoist".to_string())), "Hoist");
    }

    #[test]
    fn rejects_non_workbook_bytes() {
        let err = read_sheets(b"definitely not a workbook", &NDIS_SCHEMA).unwrap_err();
        assert!(matches!(err, SchemaError::Unreadable { .. }));
    }
}
