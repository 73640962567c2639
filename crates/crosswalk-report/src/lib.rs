//! Crosswalk report generation.
//!
//! A report has three sections:
//!
//! - **Metadata and methodology**: run facts, thresholds and how matching works
//! - **Crosswalk table**: one row per EnableNSW entry with its NDIS match
//! - **Pivot summary**: mapping rates and tier counts per EnableNSW category
//!
//! Sections are written as three CSV files or one JSON document.

mod error;
mod sections;
mod writer;

pub use error::{ReportError, Result};
pub use sections::{
    CrosswalkReport, CrosswalkRow, PivotRow, REPORT_TITLE, ReportMetadata, methodology,
};
pub use writer::{
    JSON_FILE, PIVOT_FILE, ReportFormat, SUMMARY_FILE, TABLE_FILE, pivot_csv, summary_csv,
    table_csv, write_report,
};
