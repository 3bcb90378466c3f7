//! Rule-based contract parser.

use std::time::Instant;

use tracing::{debug, info};

use crate::document::{DocumentContent, Table};
use crate::models::record::{AmcRecord, FIELD_NAMES, FieldValue};

use super::ContractExtractor;
use super::rules::{
    extract_address, extract_amc_period, extract_amount, extract_contact_number,
    extract_contract_type, extract_customer_name, extract_location, extract_unit_details,
    first_valid_date, format_dmy,
};

/// Result of contract extraction.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    /// Extracted record.
    pub record: AmcRecord,
    /// Fields left at their default.
    pub warnings: Vec<String>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Contract parser applying the field rules in sequence.
///
/// Every rule is independent: a miss only leaves that field at its default.
/// The rules take no settings; Service Frequency is always
/// [`DEFAULT_SERVICE_FREQUENCY`](crate::models::DEFAULT_SERVICE_FREQUENCY).
#[derive(Debug, Clone, Copy, Default)]
pub struct ContractParser;

impl ContractParser {
    /// Create a new parser.
    pub fn new() -> Self {
        Self
    }

    /// Parse a contract from its text, file-name contract number and tables.
    pub fn parse(&self, text: &str, contract_no: &str, tables: &[Table]) -> ExtractionResult {
        let start = Instant::now();

        info!(
            "Parsing contract {:?} from {} characters of text and {} tables",
            contract_no,
            text.len(),
            tables.len()
        );

        let mut record = AmcRecord::with_contract_no(contract_no);

        record.contract_type = extract_contract_type(text).unwrap_or_default();
        record.customer_name = extract_customer_name(text).unwrap_or_default();
        record.contact_number = extract_contact_number(text).unwrap_or_default();
        record.address = extract_address(text).unwrap_or_default();
        record.location = extract_location(text).unwrap_or_default();
        record.contract_date = first_valid_date(text).map(format_dmy).unwrap_or_default();
        record.amount = extract_amount(text).unwrap_or_default();

        // Start, end and the four service months are set together or not at all.
        if let Some(period) = extract_amc_period(text) {
            if let Some(months) = period.service_months() {
                record.amc_start_date = format_dmy(period.start);
                record.amc_end_date = format_dmy(period.end);
                record.set_service_months(months);
            }
        }

        record.unit_details = extract_unit_details(text, tables);

        let warnings = missing_fields(&record);

        debug!(
            "Extracted contract {:?} with {} empty fields",
            record.contract_no,
            warnings.len()
        );

        ExtractionResult {
            record,
            warnings,
            processing_time_ms: start.elapsed().as_millis() as u64,
        }
    }
}

impl ContractExtractor for ContractParser {
    fn extract(&self, content: &DocumentContent, contract_no: &str) -> ExtractionResult {
        self.parse(&content.text, contract_no, &content.tables)
    }
}

fn missing_fields(record: &AmcRecord) -> Vec<String> {
    FIELD_NAMES
        .iter()
        .zip(record.values())
        .filter(|(_, value)| matches!(value, FieldValue::Text(s) if s.is_empty()))
        .map(|(name, _)| format!("Could not extract {}", name))
        .collect()
}
