//! Document loading module.

mod docx;

pub use docx::DocxLoader;

use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::error::DocumentError;

/// Result type for document operations.
pub type Result<T> = std::result::Result<T, DocumentError>;

/// A table grid: rows of trimmed cell strings.
pub type Table = Vec<Vec<String>>;

/// Type of an input document, derived from its file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// Office Open XML word processing document.
    Docx,
    /// PDF with embedded text.
    Pdf,
    /// Plain text.
    Text,
}

impl DocumentKind {
    /// Detect the kind from a file name or path.
    pub fn from_filename(filename: &str) -> Option<Self> {
        let extension = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match extension.as_str() {
            "docx" => Some(Self::Docx),
            "pdf" => Some(Self::Pdf),
            "txt" | "text" => Some(Self::Text),
            _ => None,
        }
    }
}

/// Content pulled out of a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DocumentContent {
    /// Body paragraphs joined with newlines, in document order.
    pub text: String,
    /// Top-level tables in document order.
    pub tables: Vec<Table>,
}

impl DocumentContent {
    /// True when the document carries no usable text.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Trait for document loaders.
pub trait DocumentLoader {
    /// Load a document from raw bytes.
    fn load(&self, data: &[u8]) -> Result<DocumentContent>;
}

/// Loader for plain UTF-8 text files.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextLoader;

impl DocumentLoader for TextLoader {
    fn load(&self, data: &[u8]) -> Result<DocumentContent> {
        Ok(DocumentContent {
            text: String::from_utf8_lossy(data).into_owned(),
            tables: Vec::new(),
        })
    }
}

/// Loader for text-based PDFs. Tables are not recovered.
#[cfg(feature = "pdf")]
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfLoader;

#[cfg(feature = "pdf")]
impl DocumentLoader for PdfLoader {
    fn load(&self, data: &[u8]) -> Result<DocumentContent> {
        let text = pdf_extract::extract_text_from_mem(data)
            .map_err(|e| DocumentError::Pdf(e.to_string()))?;
        Ok(DocumentContent {
            text,
            tables: Vec::new(),
        })
    }
}

/// Load a document, picking the loader from the file name.
pub fn load_document(filename: &str, data: &[u8]) -> Result<DocumentContent> {
    let kind = DocumentKind::from_filename(filename)
        .ok_or_else(|| DocumentError::Unsupported(filename.to_string()))?;

    debug!("Loading {} as {:?} ({} bytes)", filename, kind, data.len());

    match kind {
        DocumentKind::Docx => DocxLoader::new().load(data),
        DocumentKind::Text => TextLoader.load(data),
        #[cfg(feature = "pdf")]
        DocumentKind::Pdf => PdfLoader.load(data),
        #[cfg(not(feature = "pdf"))]
        DocumentKind::Pdf => Err(DocumentError::Unsupported(
            "PDF support is disabled".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_filename() {
        assert_eq!(DocumentKind::from_filename("CC1_a.docx"), Some(DocumentKind::Docx));
        assert_eq!(DocumentKind::from_filename("scan.PDF"), Some(DocumentKind::Pdf));
        assert_eq!(DocumentKind::from_filename("notes.txt"), Some(DocumentKind::Text));
        assert_eq!(DocumentKind::from_filename("legacy.doc"), None);
        assert_eq!(DocumentKind::from_filename("noext"), None);
    }

    #[test]
    fn test_load_text_document() {
        let content = load_document("a.txt", b"Customer Name: Ravi\n").unwrap();
        assert_eq!(content.text, "Customer Name: Ravi\n");
        assert!(content.tables.is_empty());
        assert!(!content.is_blank());
    }

    #[test]
    fn test_load_unsupported() {
        let err = load_document("a.doc", b"whatever").unwrap_err();
        assert!(matches!(err, DocumentError::Unsupported(_)));
    }

    #[test]
    fn test_corrupt_docx_is_an_error() {
        let err = load_document("CC1_bad.docx", b"not a zip archive").unwrap_err();
        assert!(matches!(err, DocumentError::Archive(_)));
    }
}
