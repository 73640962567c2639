//! Turning source bytes into uniform records.

use std::str::FromStr;

use crosswalk_model::{EnableNswEntry, NdisSupportItem};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::columns::{
    CATEGORY, ColumnBindings, DESCRIPTION, ENABLENSW_SCHEMA, ITEM_CODE, ITEM_NAME, NDIS_SCHEMA,
    SUBCATEGORY, Schema, UNIT_PRICE, resolve_columns,
};
use crate::error::{Result, SchemaError};
use crate::format::SourceFormat;
use crate::source::read_tables;
use crate::table::select_table;

/// What normalization did with a source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizeReport {
    pub schema: &'static str,
    pub format: SourceFormat,
    /// Name of the selected sheet or word table.
    pub table: Option<String>,
    pub tables_found: usize,
    /// Non-blank data rows in the selected table.
    pub rows_read: usize,
    /// Rows dropped because a required field was empty.
    pub rows_skipped: usize,
    pub bindings: ColumnBindings,
}

/// Normalized records plus the report describing how they were obtained.
#[derive(Debug, Clone)]
pub struct Normalized<T> {
    pub records: Vec<T>,
    pub report: NormalizeReport,
}

/// Reads an NDIS code guide in any supported format.
pub fn normalize_ndis(bytes: &[u8], format: SourceFormat) -> Result<Normalized<NdisSupportItem>> {
    normalize(bytes, format, &NDIS_SCHEMA, ndis_item)
}

/// Reads an EnableNSW category list in any supported format.
pub fn normalize_enablensw(
    bytes: &[u8],
    format: SourceFormat,
) -> Result<Normalized<EnableNswEntry>> {
    normalize(bytes, format, &ENABLENSW_SCHEMA, enablensw_entry)
}

fn normalize<T>(
    bytes: &[u8],
    format: SourceFormat,
    schema: &Schema,
    build: impl Fn(&Row<'_>) -> Option<T>,
) -> Result<Normalized<T>> {
    let tables = read_tables(bytes, format, schema)?;
    let tables_found = tables.len();
    let table = select_table(tables).ok_or(SchemaError::NoTable { format })?;
    let bindings = resolve_columns(&table, schema)?;

    let mut records = Vec::new();
    let mut rows_read = 0usize;
    let mut rows_skipped = 0usize;
    for (idx, cells) in table.rows.iter().enumerate() {
        if cells.iter().all(|cell| cell.is_empty()) {
            continue;
        }
        rows_read += 1;
        let row = Row {
            cells,
            bindings: &bindings,
            table: table.name.as_deref(),
        };
        match build(&row) {
            Some(record) => records.push(record),
            None => {
                rows_skipped += 1;
                debug!(schema = schema.name, row = idx + 1, "skipped row missing a required field");
            }
        }
    }
    if records.is_empty() {
        return Err(SchemaError::NoValidRows {
            schema: schema.name,
            rows_read,
        });
    }
    if rows_skipped > 0 {
        warn!(
            schema = schema.name,
            skipped = rows_skipped,
            read = rows_read,
            "skipped rows missing required fields"
        );
    }
    info!(
        schema = schema.name,
        %format,
        table = table.name.as_deref().unwrap_or("-"),
        records = records.len(),
        "normalized source"
    );
    Ok(Normalized {
        records,
        report: NormalizeReport {
            schema: schema.name,
            format,
            table: table.name,
            tables_found,
            rows_read,
            rows_skipped,
            bindings,
        },
    })
}

/// One data row seen through the resolved column bindings.
#[derive(Debug, Clone, Copy)]
struct Row<'a> {
    cells: &'a [String],
    bindings: &'a ColumnBindings,
    table: Option<&'a str>,
}

impl<'a> Row<'a> {
    /// The non-missing value of a bound field.
    fn value(&self, field: &str) -> Option<&'a str> {
        let column = self.bindings.column(field)?;
        let value = self.cells.get(column)?.trim();
        if value.is_empty() || value.eq_ignore_ascii_case("nan") {
            None
        } else {
            Some(value)
        }
    }

    fn table(&self) -> Option<&'a str> {
        self.table
    }
}

fn ndis_item(row: &Row<'_>) -> Option<NdisSupportItem> {
    let code = row.value(ITEM_CODE)?;
    let name = row.value(ITEM_NAME)?;
    let mut item = NdisSupportItem::new(code, name);
    if let Some(category) = row.value(CATEGORY) {
        item = item.with_category(category);
    }
    if let Some(description) = row.value(DESCRIPTION) {
        item = item.with_description(description);
    }
    if let Some(price) = row.value(UNIT_PRICE).and_then(parse_price) {
        item = item.with_unit_price(price);
    }
    if let Some(table) = row.table() {
        item = item.with_source_table(table);
    }
    Some(item)
}

fn enablensw_entry(row: &Row<'_>) -> Option<EnableNswEntry> {
    let category = row.value(CATEGORY)?;
    let subcategory = row.value(SUBCATEGORY)?;
    Some(EnableNswEntry::new(
        category,
        subcategory,
        row.value(DESCRIPTION),
    ))
}

/// Parses a price such as `$1,500.00`; anything else yields `None`.
pub fn parse_price(raw: &str) -> Option<Decimal> {
    let cleaned: String = raw
        .chars()
        .filter(|ch| !matches!(ch, '$' | ',') && !ch.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    Decimal::from_str(&cleaned).ok()
}
