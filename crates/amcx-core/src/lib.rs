//! Core library for AMC contract extraction.
//!
//! This crate provides:
//! - Document loading (docx paragraphs and tables, text PDFs, plain text)
//! - Contract number detection from file names
//! - Rule-based extraction of the sixteen AMC record fields
//! - Service schedule derivation from the AMC period
//! - Batch processing and xlsx/CSV/JSON export

pub mod batch;
pub mod contract;
pub mod document;
pub mod error;
pub mod export;
pub mod filename;
pub mod models;

pub use batch::{
    BatchOutcome, Presenter, SkipReason, SkippedDocument, SourceDocument, run_session, submit,
};
pub use contract::{ContractExtractor, ContractParser, ExtractionResult};
pub use document::{DocumentContent, DocumentKind, DocumentLoader, Table, load_document};
pub use error::{AmcxError, DocumentError, ExportError, ExtractionError, Result};
pub use export::{ExportFormat, Exporter};
pub use filename::contract_number_from_filename;
pub use models::config::AmcxConfig;
pub use models::record::{AmcRecord, FIELD_NAMES};
