//! Error types for schema normalization.

use thiserror::Error;

use crate::format::SourceFormat;

/// Errors that reject a source file as a whole.
///
/// Individual malformed rows never produce a `SchemaError`; they are skipped
/// and counted in the [`NormalizeReport`](crate::NormalizeReport).
#[derive(Debug, Error)]
pub enum SchemaError {
    // === Container Errors ===
    /// The bytes could not be decoded as the declared format.
    #[error("failed to read {format} source: {message}")]
    Unreadable {
        format: SourceFormat,
        message: String,
    },

    /// A word-processor document without the main document part.
    #[error("word document has no main document part")]
    MissingDocumentPart,

    /// The file extension does not map to a supported format.
    #[error("unsupported source extension '{extension}'")]
    UnsupportedExtension { extension: String },

    // === Table Errors ===
    /// No table with at least one data row was found.
    #[error("no table with data rows found in {format} source")]
    NoTable { format: SourceFormat },

    /// A required logical field matched neither an alias nor a heuristic.
    #[error("cannot resolve required {schema} field '{field}' from columns [{columns}]")]
    UnresolvedField {
        schema: &'static str,
        field: &'static str,
        columns: String,
    },

    /// Every data row lacked at least one required field.
    #[error("no {schema} row survived normalization ({rows_read} read, all skipped)")]
    NoValidRows {
        schema: &'static str,
        rows_read: usize,
    },
}

impl SchemaError {
    pub(crate) fn unreadable(format: SourceFormat, message: impl ToString) -> Self {
        Self::Unreadable {
            format,
            message: message.to_string(),
        }
    }
}

/// Result type for normalization operations.
pub type Result<T> = std::result::Result<T, SchemaError>;
