//! Writing report sections to disk.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use csv::{Terminator, WriterBuilder};
use tracing::info;

use crate::error::{ReportError, Result};
use crate::sections::{CrosswalkReport, CrosswalkRow, PivotRow};

pub const SUMMARY_FILE: &str = "crosswalk_summary.csv";
pub const TABLE_FILE: &str = "crosswalk_table.csv";
pub const PIVOT_FILE: &str = "crosswalk_pivot.csv";
pub const JSON_FILE: &str = "crosswalk_report.json";

/// Which files to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Csv,
    Json,
    Both,
}

impl ReportFormat {
    fn csv(self) -> bool {
        matches!(self, ReportFormat::Csv | ReportFormat::Both)
    }

    fn json(self) -> bool {
        matches!(self, ReportFormat::Json | ReportFormat::Both)
    }
}

/// Writes the requested report files into `dir`, creating it if needed.
/// Returns the written paths.
pub fn write_report(
    report: &CrosswalkReport,
    dir: &Path,
    format: ReportFormat,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).map_err(|source| ReportError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    let mut written = Vec::new();
    if format.csv() {
        written.push(write_file(&dir.join(SUMMARY_FILE), &summary_csv(report)?)?);
        written.push(write_file(&dir.join(TABLE_FILE), &table_csv(report)?)?);
        written.push(write_file(&dir.join(PIVOT_FILE), &pivot_csv(report)?)?);
    }
    if format.json() {
        let json = serde_json::to_string_pretty(report)?;
        written.push(write_file(&dir.join(JSON_FILE), &json)?);
    }
    info!(dir = %dir.display(), files = written.len(), "wrote report");
    Ok(written)
}

/// Metadata and methodology as `Section,Item,Value` rows.
pub fn summary_csv(report: &CrosswalkReport) -> Result<String> {
    let mut rows: Vec<[String; 3]> = report
        .metadata_pairs()
        .into_iter()
        .map(|(label, value)| ["Metadata".to_string(), label.to_string(), value])
        .collect();
    rows.extend(
        report
            .methodology
            .iter()
            .map(|line| ["Methodology".to_string(), String::new(), line.clone()]),
    );
    render_csv(SUMMARY_FILE, &["Section", "Item", "Value"], rows)
}

/// The full crosswalk table, one row per EnableNSW entry.
pub fn table_csv(report: &CrosswalkReport) -> Result<String> {
    render_csv(
        TABLE_FILE,
        &CrosswalkRow::HEADERS,
        report.crosswalk.iter().map(CrosswalkRow::to_record),
    )
}

/// The per-category pivot summary.
pub fn pivot_csv(report: &CrosswalkReport) -> Result<String> {
    render_csv(
        PIVOT_FILE,
        &PivotRow::HEADERS,
        report.pivot.iter().map(PivotRow::to_record),
    )
}

fn render_csv<I, R>(name: &str, headers: &[&str], rows: I) -> Result<String>
where
    I: IntoIterator<Item = R>,
    R: IntoIterator,
    R::Item: AsRef<[u8]>,
{
    let csv_error = |source: csv::Error| ReportError::Csv {
        path: PathBuf::from(name),
        source,
    };
    let mut writer = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    writer.write_record(headers).map_err(csv_error)?;
    for row in rows {
        writer.write_record(row).map_err(csv_error)?;
    }
    let bytes = writer.into_inner().map_err(|e| ReportError::Io {
        path: PathBuf::from(name),
        source: e.into_error(),
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn write_file(path: &Path, contents: &str) -> Result<PathBuf> {
    let mut file = fs::File::create(path).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    file.write_all(contents.as_bytes())
        .map_err(|source| ReportError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(path.to_path_buf())
}
