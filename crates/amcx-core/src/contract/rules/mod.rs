//! Rule-based field extractors for AMC contracts.

pub mod amounts;
pub mod dates;
pub mod parties;
pub mod patterns;
pub mod units;

pub use amounts::extract_amount;
pub use dates::{
    extract_amc_period, first_valid_date, format_dmy, format_month, ordinal, parse_dmy,
    AmcPeriod, DateExtractor, SERVICE_MONTH_OFFSETS,
};
pub use parties::{
    extract_address, extract_contact_number, extract_contract_type, extract_customer_name,
    extract_location,
};
pub use units::{extract_unit_details, units_from_tables, units_from_text};

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all occurrences of the field.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// A matched value with its location in the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Byte range in source text.
    pub position: Option<(usize, usize)>,
    /// Source text that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, source: impl Into<String>) -> Self {
        Self {
            value,
            position: None,
            source: source.into(),
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }
}

/// A single attempt in a fallback chain.
pub type Matcher = fn(&str) -> Option<String>;

/// Run matchers in order and keep the first non-empty result.
pub fn first_match(text: &str, matchers: &[Matcher]) -> Option<String> {
    matchers
        .iter()
        .filter_map(|matcher| matcher(text))
        .find(|value| !value.is_empty())
}
