//! Common regex patterns for AMC contract extraction.

use lazy_static::lazy_static;
use regex::Regex;

/// Contract type labels, in order of preference.
pub const CONTRACT_TYPES: [&str; 2] = [
    "ANNUAL MAINTENANCE CONTRACT",
    "LABOUR MAINTENANCE CONTRACT",
];

/// Lower-case header cells that mark a table as the unit listing.
pub const UNIT_HEADER_KEYWORDS: [&str; 6] = ["brand", "range", "rate", "qty", "amount", "ton"];

lazy_static! {
    // Contract type labels (same order as CONTRACT_TYPES)
    pub static ref CONTRACT_TYPE_PATTERNS: Vec<Regex> = CONTRACT_TYPES
        .iter()
        .map(|label| Regex::new(&format!("(?i){}", regex::escape(label))).unwrap())
        .collect();

    // Labeled single-line values
    pub static ref CUSTOMER_NAME: Regex = Regex::new(
        r"(?is)Customer Name\s*:\s*(.*?)(?:\n|$)"
    ).unwrap();

    pub static ref CONTACT_NUMBER: Regex = Regex::new(
        r"(?is)Contact Number\s*:\s*(.*?)(?:\n|$)"
    ).unwrap();

    pub static ref LOCATION: Regex = Regex::new(
        r"(?i)Location\s*:\s*(.*?)(?:\n|$)"
    ).unwrap();

    // Address runs until the next known label, possibly across lines
    pub static ref ADDRESS: Regex = Regex::new(
        r"(?is)Address\s*:\s*(.*?)(?:Contact Number|Location|Unit Details)"
    ).unwrap();

    pub static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();

    // dd.mm.yyyy
    pub static ref DATE_DMY: Regex = Regex::new(
        r"\b(\d{2}\.\d{2}\.\d{4})\b"
    ).unwrap();

    pub static ref AMC_PERIOD: Regex = Regex::new(
        r"(?i)AMC PERIOD\s*[:\-]?\s*(\d{2}\.\d{2}\.\d{4})\s*(?:to|-)\s*(\d{2}\.\d{2}\.\d{4})"
    ).unwrap();

    // Amounts: "AMOUNT: Rs. 12,500.00" or a bare "12500/-"
    pub static ref AMOUNT_LABELED: Regex = Regex::new(
        r"(?i)AMOUNT\s*[:\-]?\s*(?:Rs\.?|₹)?\s*([\d,]+(?:\.\d{1,2})?)"
    ).unwrap();

    pub static ref AMOUNT_SLASH_DASH: Regex = Regex::new(
        r"(?:Rs\.?|₹)?\s*([\d,]+(?:\.\d{1,2})?)\s*/-"
    ).unwrap();

    // Free-text unit listing
    pub static ref UNIT_DETAILS_LABEL: Regex = Regex::new(
        r"(?i)UNIT DETAILS\s*:?"
    ).unwrap();

    pub static ref UNIT_DETAILS_END: Regex = Regex::new(
        r"(?i)AMOUNT|AMC PERIOD|CONTRACT NO|DATE|SERVICE|TERMS & CONDITIONS"
    ).unwrap();

    pub static ref UNIT_NOISE: Regex = Regex::new(
        r"(?i)Terms & Conditions|routine service"
    ).unwrap();

    pub static ref TOTAL_WORD: Regex = Regex::new(r"(?i)\bTOTAL\b").unwrap();
}
