//! FILENAME: core/persistence/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("XLSX read error: {0}")]
    XlsxRead(#[from] calamine::XlsxError),

    #[error("XLS read error: {0}")]
    XlsRead(#[from] calamine::XlsError),

    #[error("XLSX write error: {0}")]
    XlsxWrite(#[from] rust_xlsxwriter::XlsxError),

    #[error("Invalid file format: {0}")]
    InvalidFormat(String),

    #[error("Unsupported export format: {0}")]
    UnsupportedFormat(String),

    #[error("Workbook contains no sheets")]
    EmptyWorkbook,
}
