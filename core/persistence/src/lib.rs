//! FILENAME: core/persistence/src/lib.rs
//! Dashboard Persistence Module
//!
//! File boundary of the dashboard: reads uploaded CSV/XLSX/XLS bytes
//! into a `DataTable` and writes tables back out for download. Uploads
//! are routed by file-name extension; exports by a caller-supplied
//! format name.

mod csv_io;
mod error;
mod xlsx_reader;
mod xlsx_writer;

pub use csv_io::{read_csv, write_csv};
pub use error::PersistenceError;
pub use xlsx_reader::{read_xls, read_xlsx};
pub use xlsx_writer::{write_xlsx, SHEET_NAME};

use std::fs;
use std::path::Path;

use dataset::{schema, DataTable};
use serde::{Deserialize, Serialize};

// ============================================================================
// UPLOADS
// ============================================================================

/// A file handed over by the upload control: original name plus raw bytes.
/// The name only matters for format detection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self { name: name.into(), bytes }
    }
}

/// Upload formats, detected from the file-name extension
/// (case-insensitive). The accepted set mirrors `schema::SUPPORTED_FILE_TYPES`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SourceFormat {
    Csv,
    Xlsx,
    Xls,
}

impl SourceFormat {
    pub fn from_file_name(name: &str) -> Result<Self, PersistenceError> {
        let extension = Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match extension.as_deref() {
            Some("csv") => Ok(SourceFormat::Csv),
            Some("xlsx") => Ok(SourceFormat::Xlsx),
            Some("xls") => Ok(SourceFormat::Xls),
            _ => Err(PersistenceError::InvalidFormat(format!(
                "'{}' (expected one of: {})",
                name,
                schema::SUPPORTED_FILE_TYPES.join(", ")
            ))),
        }
    }
}

/// Parses an upload into a table using the reader its extension selects.
pub fn read_upload(file: &UploadedFile) -> Result<DataTable, PersistenceError> {
    match SourceFormat::from_file_name(&file.name)? {
        SourceFormat::Csv => read_csv(&file.bytes),
        SourceFormat::Xlsx => read_xlsx(&file.bytes),
        SourceFormat::Xls => read_xls(&file.bytes),
    }
}

/// Reads a data file from disk, routed the same way as an upload.
pub fn read_path(path: &Path) -> Result<DataTable, PersistenceError> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string();
    let bytes = fs::read(path)?;
    read_upload(&UploadedFile { name, bytes })
}

// ============================================================================
// EXPORTS
// ============================================================================

/// Download formats offered by the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExportFormat {
    Csv,
    Xlsx,
}

impl ExportFormat {
    /// Accepts the names the dashboard's download control uses: "csv",
    /// and "excel" (or "xlsx") for workbooks.
    pub fn from_name(name: &str) -> Result<Self, PersistenceError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "excel" | "xlsx" => Ok(ExportFormat::Xlsx),
            other => Err(PersistenceError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Serializes a table for download. No bytes are produced for an
/// unsupported format name; the error carries the offending name.
pub fn export_table(table: &DataTable, format: ExportFormat) -> Result<Vec<u8>, PersistenceError> {
    match format {
        ExportFormat::Csv => write_csv(table),
        ExportFormat::Xlsx => write_xlsx(table),
    }
}

// ============================================================================
// TESTS
// ============================================================================
