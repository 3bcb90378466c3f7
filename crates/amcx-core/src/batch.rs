//! Batch pipeline: documents in, ordered records out.
//!
//! Documents are processed one at a time in submission order. A document that
//! cannot be read, or has no text, is skipped with a warning; it never aborts
//! the batch.

use chrono::NaiveDateTime;
use tracing::{info, warn};

use crate::contract::ContractExtractor;
use crate::document::load_document;
use crate::error::{DocumentError, Result};
use crate::export::{ExportFormat, Exporter};
use crate::filename::contract_number_from_filename;
use crate::models::record::AmcRecord;

/// An uploaded file.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    /// Original file name, used for type detection and the contract number.
    pub filename: String,
    /// Raw file contents.
    pub data: Vec<u8>,
}

impl SourceDocument {
    pub fn new(filename: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: filename.into(),
            data: data.into(),
        }
    }
}

/// Why a document produced no record.
#[derive(Debug)]
pub enum SkipReason {
    /// The document could not be opened or parsed.
    Unreadable(DocumentError),
    /// The document opened but contains no text.
    EmptyText,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unreadable(e) => write!(f, "error reading document: {}", e),
            Self::EmptyText => f.write_str("document has no text"),
        }
    }
}

/// A document left out of the result set.
#[derive(Debug)]
pub struct SkippedDocument {
    pub filename: String,
    pub reason: SkipReason,
}

/// Outcome of a batch.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    /// One record per extracted document, in submission order.
    pub records: Vec<AmcRecord>,
    /// Documents that produced no record, in submission order.
    pub skipped: Vec<SkippedDocument>,
}

/// Extract a record from every readable document.
pub fn submit<E: ContractExtractor>(documents: &[SourceDocument], extractor: &E) -> BatchOutcome {
    let mut outcome = BatchOutcome::default();

    for document in documents {
        let content = match load_document(&document.filename, &document.data) {
            Ok(content) => content,
            Err(e) => {
                warn!("Error reading document {}: {}", document.filename, e);
                outcome.skipped.push(SkippedDocument {
                    filename: document.filename.clone(),
                    reason: SkipReason::Unreadable(e),
                });
                continue;
            }
        };

        if content.is_blank() {
            warn!("Skipping {}: no text", document.filename);
            outcome.skipped.push(SkippedDocument {
                filename: document.filename.clone(),
                reason: SkipReason::EmptyText,
            });
            continue;
        }

        let contract_no = contract_number_from_filename(&document.filename);
        let result = extractor.extract(&content, &contract_no);
        info!(
            "Extracted {} ({} empty fields, {}ms)",
            document.filename,
            result.warnings.len(),
            result.processing_time_ms
        );
        outcome.records.push(result.record);
    }

    outcome
}

/// Boundary between the extraction core and a user interface.
pub trait Presenter {
    /// Show the extracted records before export.
    fn render(&mut self, records: &[AmcRecord]) -> Result<()>;

    /// Hand the exported bytes to the user under the given file name.
    fn offer_download(&mut self, bytes: &[u8], filename: &str) -> Result<()>;

    /// Surface a non-fatal problem.
    fn warn(&mut self, message: &str);
}

/// Run a full upload-preview-export session.
///
/// Nothing is rendered or exported when no document produced a record.
pub fn run_session<E, P>(
    documents: &[SourceDocument],
    extractor: &E,
    exporter: &Exporter,
    format: ExportFormat,
    presenter: &mut P,
    now: NaiveDateTime,
) -> Result<BatchOutcome>
where
    E: ContractExtractor,
    P: Presenter + ?Sized,
{
    let outcome = submit(documents, extractor);

    for skipped in &outcome.skipped {
        presenter.warn(&format!("{}: {}", skipped.filename, skipped.reason));
    }

    if outcome.records.is_empty() {
        return Ok(outcome);
    }

    presenter.render(&outcome.records)?;

    let bytes = exporter.export(&outcome.records, format)?;
    let filename = exporter.output_filename(format, now);
    presenter.offer_download(&bytes, &filename)?;

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::ContractParser;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    #[derive(Default)]
    struct Recorder {
        rendered: usize,
        downloads: Vec<(usize, String)>,
        warnings: Vec<String>,
    }

    impl Presenter for Recorder {
        fn render(&mut self, records: &[AmcRecord]) -> Result<()> {
            self.rendered = records.len();
            Ok(())
        }

        fn offer_download(&mut self, bytes: &[u8], filename: &str) -> Result<()> {
            self.downloads.push((bytes.len(), filename.to_string()));
            Ok(())
        }

        fn warn(&mut self, message: &str) {
            self.warnings.push(message.to_string());
        }
    }

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 2)
            .unwrap()
            .and_hms_opt(14, 30, 0)
            .unwrap()
    }

    fn batch() -> Vec<SourceDocument> {
        vec![
            SourceDocument::new("CC1_first.txt", "Customer Name: First\nAMOUNT: 100\n"),
            SourceDocument::new("CC2_corrupt.docx", b"definitely not a zip".to_vec()),
            SourceDocument::new("CC3_blank.txt", "  \n\t\n"),
            SourceDocument::new("notes.doc", "Customer Name: Legacy\n"),
            SourceDocument::new("CC4_last.txt", "Customer Name: Last\n12500/-\n"),
        ]
    }

    #[test]
    fn test_submit_skips_bad_documents_and_keeps_order() {
        let outcome = submit(&batch(), &ContractParser::new());

        assert_eq!(outcome.records.len(), 2);
        assert_eq!(outcome.records.len(), batch().len() - outcome.skipped.len());

        assert_eq!(outcome.records[0].contract_no, "1");
        assert_eq!(outcome.records[0].customer_name, "First");
        assert_eq!(outcome.records[0].amount, "100");
        assert_eq!(outcome.records[1].contract_no, "4");
        assert_eq!(outcome.records[1].amount, "12500");

        let skipped: Vec<&str> = outcome.skipped.iter().map(|s| s.filename.as_str()).collect();
        assert_eq!(skipped, vec!["CC2_corrupt.docx", "CC3_blank.txt", "notes.doc"]);
        assert!(matches!(
            outcome.skipped[0].reason,
            SkipReason::Unreadable(DocumentError::Archive(_))
        ));
        assert!(matches!(outcome.skipped[1].reason, SkipReason::EmptyText));
        assert!(matches!(
            outcome.skipped[2].reason,
            SkipReason::Unreadable(DocumentError::Unsupported(_))
        ));
    }

    #[test]
    fn test_run_session_renders_and_offers_download() {
        let mut presenter = Recorder::default();
        let outcome = run_session(
            &batch(),
            &ContractParser::new(),
            &Exporter::new(),
            ExportFormat::Xlsx,
            &mut presenter,
            now(),
        )
        .unwrap();

        assert_eq!(outcome.records.len(), 2);
        assert_eq!(presenter.rendered, 2);
        assert_eq!(presenter.warnings.len(), 3);
        assert!(presenter.warnings[0].starts_with("CC2_corrupt.docx: error reading document"));
        assert_eq!(presenter.downloads.len(), 1);
        assert_eq!(presenter.downloads[0].1, "amc_output_20250102_1430.xlsx");
        assert!(presenter.downloads[0].0 > 0);
    }

    #[test]
    fn test_run_session_without_records_offers_nothing() {
        let mut presenter = Recorder::default();
        let documents = vec![SourceDocument::new("CC9_bad.docx", b"PK".to_vec())];
        let outcome = run_session(
            &documents,
            &ContractParser::new(),
            &Exporter::new(),
            ExportFormat::Csv,
            &mut presenter,
            now(),
        )
        .unwrap();

        assert!(outcome.records.is_empty());
        assert_eq!(presenter.rendered, 0);
        assert!(presenter.downloads.is_empty());
        assert_eq!(presenter.warnings.len(), 1);
    }
}
