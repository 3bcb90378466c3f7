//! Amount extraction for AMC contracts.
//!
//! Amounts are kept as written (`12,500.00`); they are copied into the
//! spreadsheet verbatim rather than re-formatted.

use super::first_match;
use super::patterns::{AMOUNT_LABELED, AMOUNT_SLASH_DASH};

/// `AMOUNT: Rs. 12,500.00`
fn labeled_amount(text: &str) -> Option<String> {
    AMOUNT_LABELED.captures(text).map(|caps| caps[1].trim().to_string())
}

/// `12500/-`, with an optional currency marker.
fn trailing_dash_amount(text: &str) -> Option<String> {
    AMOUNT_SLASH_DASH.captures(text).map(|caps| caps[1].trim().to_string())
}

/// Extract the contract amount.
///
/// Prefers an `AMOUNT` label; falls back to a number written with the
/// trailing `/-` marker.
pub fn extract_amount(text: &str) -> Option<String> {
    first_match(text, &[labeled_amount, trailing_dash_amount])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labeled_amount() {
        assert_eq!(extract_amount("AMOUNT: Rs. 12,500.00"), Some("12,500.00".to_string()));
        assert_eq!(extract_amount("Total Amount - ₹ 8000"), Some("8000".to_string()));
        assert_eq!(extract_amount("amount:Rs 1,00,000.5 only"), Some("1,00,000.5".to_string()));
    }

    #[test]
    fn test_slash_dash_fallback() {
        assert_eq!(extract_amount("Charges 12500/- per year"), Some("12500".to_string()));
        assert_eq!(extract_amount("Rs.4,500.00 /- inclusive"), Some("4,500.00".to_string()));
    }

    #[test]
    fn test_label_beats_fallback() {
        let text = "Visit charge 500/-\nAMOUNT: 9,999";
        assert_eq!(extract_amount(text), Some("9,999".to_string()));
    }

    #[test]
    fn test_no_amount() {
        assert_eq!(extract_amount("Rs. twelve thousand"), None);
        assert_eq!(extract_amount(""), None);
    }
}
