//! Schema normalization for crosswalk sources.
//!
//! NDIS code guides and EnableNSW category lists arrive as CSV files,
//! spreadsheets or tables inside word-processor documents, with column
//! headers that differ from release to release. This crate turns any of them
//! into uniform [`NdisSupportItem`](crosswalk_model::NdisSupportItem) and
//! [`EnableNswEntry`](crosswalk_model::EnableNswEntry) records.
//!
//! # Example
//!
//! ```ignore
//! use crosswalk_ingest::{SourceFormat, normalize_ndis};
//!
//! let bytes = std::fs::read("NDIS_AT_Code_Guide.docx")?;
//! let ndis = normalize_ndis(&bytes, SourceFormat::WordTable)?;
//! println!("{} items from {:?}", ndis.records.len(), ndis.report.table);
//! ```

mod columns;
mod error;
mod format;
mod normalize;
mod source;
mod table;

// === Error Types ===
pub use error::{Result, SchemaError};

// === Source Formats ===
pub use format::SourceFormat;
pub use source::{document_tables, read_tables};

// === Tables ===
pub use table::{HeaderRow, RawTable, select_table};

// === Column Resolution ===
pub use columns::{
    CATEGORY, ColumnBinding, ColumnBindings, DESCRIPTION, ENABLENSW_SCHEMA, FieldSpec, Heuristic,
    ITEM_CODE, ITEM_NAME, NDIS_SCHEMA, Resolution, SUBCATEGORY, Schema, UNIT_PRICE,
    resolve_columns,
};

// === Normalization ===
pub use normalize::{NormalizeReport, Normalized, normalize_enablensw, normalize_ndis, parse_price};
