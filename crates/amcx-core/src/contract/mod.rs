//! Contract field extraction module.

mod parser;
pub mod rules;

pub use parser::{ContractParser, ExtractionResult};

use crate::document::DocumentContent;

/// Trait for contract field extractors.
pub trait ContractExtractor {
    /// Extract a record from loaded document content.
    ///
    /// `contract_no` comes from the file name; see
    /// [`crate::filename::contract_number_from_filename`].
    fn extract(&self, content: &DocumentContent, contract_no: &str) -> ExtractionResult;
}
