//! End-to-end normalization of realistic sources.

use std::fs;
use std::io::{Cursor, Write};

use crosswalk_ingest::{
    CATEGORY, ITEM_CODE, ITEM_NAME, NDIS_SCHEMA, Resolution, SchemaError, SourceFormat,
    normalize_enablensw, normalize_ndis, read_tables,
};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_xlsxwriter::{Workbook, XlsxError};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

fn word_row(cells: &[&str]) -> String {
    let cells: String = cells
        .iter()
        .map(|text| format!("<w:tc><w:p><w:r><w:t>{text}</w:t></w:r></w:p></w:tc>"))
        .collect();
    format!("<w:tr>{cells}</w:tr>")
}

fn word_table(rows: &[&[&str]]) -> String {
    let rows: String = rows.iter().map(|row| word_row(row)).collect();
    format!("<w:tbl>{rows}</w:tbl>")
}

fn docx(body: &str) -> Vec<u8> {
    let xml = format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
         <w:document xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\">\
         <w:body>{body}</w:body></w:document>"
    );
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    writer
        .start_file("[Content_Types].xml", SimpleFileOptions::default())
        .expect("start content types");
    writer.write_all(b"<Types/>").expect("write content types");
    writer
        .start_file("word/document.xml", SimpleFileOptions::default())
        .expect("start document");
    writer.write_all(xml.as_bytes()).expect("write document");
    writer.finish().expect("finish zip").into_inner()
}

#[test]
fn word_document_uses_largest_table() {
    let body = format!(
        "{}{}",
        word_table(&[&["Version", "Date"], &["2025-26", "1 July"]]),
        word_table(&[
            &["Support Item Number", "Support Item Name", "Category", "Unit Price"],
            &["05_122203111_0103_1_2", "Manual wheelchair", "Personal Mobility", "$1,500.00"],
            &["05_122203112_0103_1_2", "Wheelchair repair", "Personal Mobility", ""],
            &["03_090612111_0103_1_1", "Shower chair", "Daily Living", "310"],
        ]),
    );
    let normalized = normalize_ndis(&docx(&body), SourceFormat::WordTable).expect("normalize");
    assert_eq!(normalized.report.tables_found, 2);
    assert_eq!(normalized.report.table.as_deref(), Some("Table_2"));
    assert_eq!(normalized.records.len(), 3);
    let first = &normalized.records[0];
    assert_eq!(first.item_name, "Manual wheelchair");
    assert_eq!(first.unit_price, Some(Decimal::new(150000, 2)));
    assert_eq!(first.source_table.as_deref(), Some("Table_2"));
}

#[test]
fn word_document_without_tables_is_rejected() {
    let body = "<w:p><w:r><w:t>No tables here</w:t></w:r></w:p>";
    let err = normalize_ndis(&docx(body), SourceFormat::WordTable).unwrap_err();
    assert!(matches!(err, SchemaError::NoTable { .. }));
}

#[test]
fn zip_without_document_part_is_rejected() {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    writer
        .start_file("readme.txt", SimpleFileOptions::default())
        .expect("start file");
    writer.write_all(b"hello").expect("write");
    let bytes = writer.finish().expect("finish").into_inner();
    let err = normalize_ndis(&bytes, SourceFormat::WordTable).unwrap_err();
    assert!(matches!(err, SchemaError::MissingDocumentPart));
}

#[test]
fn item_number_header_is_the_code_column() {
    let csv = "Item Number,Item Name\n05_1,Manual wheelchair\n";
    let normalized = normalize_ndis(csv.as_bytes(), SourceFormat::Csv).expect("normalize");
    let binding = normalized.report.bindings.get(ITEM_CODE).expect("code binding");
    assert_eq!(binding.header, "Item Number");
    assert_eq!(binding.resolution, Resolution::Alias);
    assert_eq!(normalized.records[0].item_code, "05_1");
}

#[test]
fn unknown_headers_fall_back_to_content() {
    let csv = "Ref,Text\n05_122203111_0103_1_2,Manual wheelchair with folding frame\n\
               05_122203112_0103_1_2,Power wheelchair\n";
    let normalized = normalize_ndis(csv.as_bytes(), SourceFormat::Csv).expect("normalize");
    let code = normalized.report.bindings.get(ITEM_CODE).expect("code");
    let name = normalized.report.bindings.get(ITEM_NAME).expect("name");
    assert_eq!(code.header, "Ref");
    assert_eq!(name.header, "Text");
    assert_eq!(code.resolution, Resolution::Heuristic);
}

#[test]
fn csv_file_from_disk_with_banner() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("enablensw.csv");
    fs::write(
        &path,
        "EnableNSW equipment list,,\n,,\nCategory,Subcategory,Description\n\
         Mobility,Manual wheelchairs,Self-propelled\n\
         Vision,Magnifiers,\n",
    )
    .expect("write csv");
    let format = SourceFormat::from_path(&path).expect("format");
    let bytes = fs::read(&path).expect("read csv");
    let normalized = normalize_enablensw(&bytes, format).expect("normalize");
    assert_eq!(normalized.records.len(), 2);
    assert_eq!(normalized.report.rows_skipped, 0);
    assert_eq!(
        normalized.records[0].description.as_deref(),
        Some("Self-propelled")
    );
}

#[test]
fn enablensw_header_with_blank_cell_is_kept() {
    let csv = "Category,Subcategory,\n\
               Mobility,Manual wheelchairs,note\n\
               Vision,Magnifiers,hand held\n";
    let normalized = normalize_enablensw(csv.as_bytes(), SourceFormat::Csv).expect("normalize");
    assert_eq!(normalized.records.len(), 2);
    assert_eq!(normalized.records[0].category, "Mobility");
    assert_eq!(normalized.records[0].subcategory, "Manual wheelchairs");
    assert_eq!(normalized.records[1].subcategory, "Magnifiers");
}

#[test]
fn ndis_header_with_blank_cells_keeps_first_item() {
    let csv = "Support Item Number,Support Item Name,Category,,\n\
               05_1,Manual wheelchair,Personal Mobility,Standard,Folding\n\
               05_2,Walker,Personal Mobility,Standard,Rigid\n";
    let normalized = normalize_ndis(csv.as_bytes(), SourceFormat::Csv).expect("normalize");
    assert_eq!(normalized.records.len(), 2);
    let first = &normalized.records[0];
    assert_eq!(first.item_code, "05_1");
    assert_eq!(first.item_name, "Manual wheelchair");
    assert_eq!(first.category.as_deref(), Some("Personal Mobility"));

    let bindings = &normalized.report.bindings;
    for field in [ITEM_CODE, ITEM_NAME, CATEGORY] {
        let binding = bindings.get(field).expect("binding");
        assert_eq!(binding.resolution, Resolution::Alias, "{field}");
    }
    assert_eq!(bindings.get(ITEM_NAME).map(|b| b.column), Some(1));
}

fn code_guide_workbook() -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();

    let notes = workbook.add_worksheet().set_name("Notes")?;
    notes.write_string(0, 0, "Release notes")?;
    notes.write_string(1, 0, "Prices effective 1 July")?;

    let items = workbook.add_worksheet().set_name("Items")?;
    items.write_string(0, 0, "NDIS Assistive Technology Code Guide")?;
    let headers = [
        "Support Item Number",
        "Support Item Name",
        "Category",
        "Unit Price",
    ];
    for (col, header) in (0u16..).zip(headers) {
        items.write_string(2, col, header)?;
    }
    let rows = [
        ("05_122203111_0103_1_2", "Manual wheelchair", 1500.0),
        ("05_122203112_0103_1_2", "Wheelchair repair", 120.5),
    ];
    for (row, (code, name, price)) in (3u32..).zip(rows) {
        items.write_string(row, 0, code)?;
        items.write_string(row, 1, name)?;
        items.write_string(row, 2, "Personal Mobility")?;
        items.write_number(row, 3, price)?;
    }

    workbook.save_to_buffer()
}

#[test]
fn workbook_uses_largest_sheet_below_its_banner() {
    let bytes = code_guide_workbook().expect("build workbook");
    let normalized = normalize_ndis(&bytes, SourceFormat::Spreadsheet).expect("normalize");

    assert_eq!(normalized.report.tables_found, 2);
    assert_eq!(normalized.report.table.as_deref(), Some("Items"));
    assert_eq!(normalized.report.rows_skipped, 0);
    assert_eq!(normalized.records.len(), 2);

    let chair = &normalized.records[0];
    assert_eq!(chair.item_code, "05_122203111_0103_1_2");
    assert_eq!(chair.item_name, "Manual wheelchair");
    assert_eq!(chair.unit_price, Some(Decimal::from(1500)));
    assert_eq!(chair.source_table.as_deref(), Some("Items"));
    assert_eq!(normalized.records[1].unit_price, Some(Decimal::new(1205, 1)));
}

#[test]
fn workbook_cells_print_whole_floats_as_integers() {
    let bytes = code_guide_workbook().expect("build workbook");
    let tables = read_tables(&bytes, SourceFormat::Spreadsheet, &NDIS_SCHEMA).expect("read");
    let items = tables
        .iter()
        .find(|table| table.name.as_deref() == Some("Items"))
        .expect("items sheet");
    assert_eq!(items.headers[0], "Support Item Number");
    let prices: Vec<&str> = items.column(3).collect();
    assert_eq!(prices, vec!["1500", "120.5"]);
}

#[test]
fn report_serializes_bindings() {
    let csv = "Code,Name,Price\n05_1,Chair,10\n";
    let normalized = normalize_ndis(csv.as_bytes(), SourceFormat::Csv).expect("normalize");
    let json = serde_json::to_value(&normalized.report).expect("serialize report");
    assert_eq!(json["format"], "csv");
    assert_eq!(json["bindings"][0]["field"], "item_code");
    assert_eq!(json["bindings"][0]["resolution"], "alias");
    assert_eq!(json["bindings"][2]["field"], "unit_price");
}

proptest! {
    #[test]
    fn rows_are_kept_in_source_order(names in proptest::collection::vec("[a-z]{4,12}", 1..30)) {
        let mut csv = String::from("Code,Name\n");
        for (idx, name) in names.iter().enumerate() {
            csv.push_str(&format!("CODE_{idx:03},{name}\n"));
        }
        let normalized = normalize_ndis(csv.as_bytes(), SourceFormat::Csv).expect("normalize");
        prop_assert_eq!(normalized.records.len(), names.len());
        for (idx, (item, name)) in normalized.records.iter().zip(&names).enumerate() {
            prop_assert_eq!(&item.item_code, &format!("CODE_{idx:03}"));
            prop_assert_eq!(&item.item_name, name);
        }
    }
}
