use std::fmt;
use std::path::Path;

use serde::Serialize;

use crate::error::{Result, SchemaError};

/// Container format of a tabular source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceFormat {
    Csv,
    Spreadsheet,
    WordTable,
}

impl SourceFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            SourceFormat::Csv => "csv",
            SourceFormat::Spreadsheet => "spreadsheet",
            SourceFormat::WordTable => "word table",
        }
    }

    /// Maps a file extension (without the dot, any case) to a format.
    pub fn from_extension(extension: &str) -> Result<Self> {
        match extension.trim().to_ascii_lowercase().as_str() {
            "csv" | "txt" => Ok(SourceFormat::Csv),
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Ok(SourceFormat::Spreadsheet),
            "docx" => Ok(SourceFormat::WordTable),
            _ => Err(SchemaError::UnsupportedExtension {
                extension: extension.to_string(),
            }),
        }
    }

    /// Infers the format from a file path's extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();
        Self::from_extension(extension)
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
