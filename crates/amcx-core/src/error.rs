//! Error types for the amcx-core library.

use thiserror::Error;

/// Main error type for the amcx library.
#[derive(Error, Debug)]
pub enum AmcxError {
    /// Document loading error.
    #[error("document error: {0}")]
    Document(#[from] DocumentError),

    /// Spreadsheet / tabular export error.
    #[error("export error: {0}")]
    Export(#[from] ExportError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be parsed or written.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised while opening a document.
///
/// All of these are recoverable at the batch level: the document is skipped
/// and the remaining documents are still processed.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The file is not a readable zip container.
    #[error("failed to open archive: {0}")]
    Archive(String),

    /// A required part is missing from the container.
    #[error("missing document part: {0}")]
    MissingPart(String),

    /// The document XML is malformed.
    #[error("malformed document XML: {0}")]
    Xml(String),

    /// Failed to extract text from a PDF.
    #[error("failed to extract PDF text: {0}")]
    Pdf(String),

    /// The file type is not supported.
    #[error("unsupported document type: {0}")]
    Unsupported(String),
}

/// Errors related to contract field extraction.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ExtractionError {
    /// A date-like candidate is not a real calendar date.
    #[error("invalid date: {value}")]
    InvalidDate { value: String },
}

/// Errors raised while serializing records.
#[derive(Error, Debug)]
pub enum ExportError {
    /// The xlsx writer failed.
    #[error("xlsx error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// The CSV writer failed.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for the amcx library.
pub type Result<T> = std::result::Result<T, AmcxError>;
