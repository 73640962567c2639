use std::io::{Cursor, Read};

use quick_xml::Reader;
use quick_xml::events::Event;
use tracing::debug;
use zip::ZipArchive;
use zip::result::ZipError;

use crate::error::{Result, SchemaError};
use crate::format::SourceFormat;
use crate::table::{HeaderRow, RawTable};

const DOCUMENT_PART: &str = "word/document.xml";

pub(super) fn read_word_tables(bytes: &[u8]) -> Result<Vec<RawTable>> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| SchemaError::unreadable(SourceFormat::WordTable, e))?;
    let mut xml = String::new();
    match archive.by_name(DOCUMENT_PART) {
        Ok(mut part) => {
            part.read_to_string(&mut xml)
                .map_err(|e| SchemaError::unreadable(SourceFormat::WordTable, e))?;
        }
        Err(ZipError::FileNotFound) => return Err(SchemaError::MissingDocumentPart),
        Err(e) => return Err(SchemaError::unreadable(SourceFormat::WordTable, e)),
    }
    document_tables(&xml)
}

#[derive(Debug, Default)]
struct TableBuilder {
    rows: Vec<Vec<String>>,
    row: Option<Vec<String>>,
    cell: Option<String>,
}

impl TableBuilder {
    fn push_text(&mut self, text: &str) {
        if let Some(cell) = self.cell.as_mut() {
            cell.push_str(text);
        }
    }
}

/// Extracts the top-level tables of a WordprocessingML main document part.
///
/// Each table is named `Table_N` (1-based, document order) and its first row
/// is the header. Text of nested tables is not attributed to the enclosing
/// cell.
pub fn document_tables(xml: &str) -> Result<Vec<RawTable>> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<TableBuilder> = Vec::new();
    let mut tables = Vec::new();
    let mut in_text = false;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| SchemaError::unreadable(SourceFormat::WordTable, e))?;
        match event {
            Event::Start(e) => match e.local_name().as_ref() {
                b"tbl" => stack.push(TableBuilder::default()),
                b"tr" => {
                    if let Some(table) = stack.last_mut() {
                        table.row = Some(Vec::new());
                    }
                }
                b"tc" => {
                    if let Some(table) = stack.last_mut() {
                        table.cell = Some(String::new());
                    }
                }
                b"t" => in_text = true,
                _ => {}
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                b"tab" | b"br" | b"cr" => outer_text(&mut stack, " "),
                b"tc" => {
                    if let Some(table) = stack.last_mut()
                        && let Some(row) = table.row.as_mut()
                    {
                        row.push(String::new());
                    }
                }
                _ => {}
            },
            Event::Text(e) if in_text => {
                outer_text(&mut stack, &String::from_utf8_lossy(&e));
            }
            Event::GeneralRef(e) if in_text => {
                if let Some(ch) = resolve_entity(&String::from_utf8_lossy(&e)) {
                    outer_text(&mut stack, ch.encode_utf8(&mut [0; 4]));
                }
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"t" => in_text = false,
                b"p" => outer_text(&mut stack, " "),
                b"tc" => {
                    if let Some(table) = stack.last_mut()
                        && let Some(cell) = table.cell.take()
                        && let Some(row) = table.row.as_mut()
                    {
                        row.push(cell.split_whitespace().collect::<Vec<_>>().join(" "));
                    }
                }
                b"tr" => {
                    if let Some(table) = stack.last_mut()
                        && let Some(row) = table.row.take()
                    {
                        table.rows.push(row);
                    }
                }
                b"tbl" => {
                    if let Some(table) = stack.pop()
                        && stack.is_empty()
                    {
                        let name = format!("Table_{}", tables.len() + 1);
                        debug!(table = %name, rows = table.rows.len(), "read word table");
                        tables.push(RawTable::from_rows(Some(name), table.rows, HeaderRow::First));
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(tables)
}

/// Appends text to the open cell of the outermost table only.
fn outer_text(stack: &mut [TableBuilder], text: &str) {
    if let [outer] = stack {
        outer.push_text(text);
    }
}

fn resolve_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            let code = name.strip_prefix('#')?;
            let value = match code.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => code.parse().ok()?,
            };
            char::from_u32(value)
        }
    }
}
