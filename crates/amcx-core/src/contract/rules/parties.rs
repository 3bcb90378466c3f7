//! Customer-facing labeled fields: contract type, customer, contact, address, location.

use super::patterns::{
    ADDRESS, CONTACT_NUMBER, CONTRACT_TYPES, CONTRACT_TYPE_PATTERNS, CUSTOMER_NAME, LOCATION,
    WHITESPACE_RUN,
};

/// Section marker that sometimes runs into the contact number line.
const UNIT_DETAILS_MARKER: &str = "UNIT DETAILS";

/// Label whose presence inside a Location capture means the layout was not understood.
const LOCATION_CONTAMINANT: &str = "CONTACT NUMBER";

/// Contract type by label preference, not by position in the text.
pub fn extract_contract_type(text: &str) -> Option<String> {
    CONTRACT_TYPES
        .iter()
        .zip(CONTRACT_TYPE_PATTERNS.iter())
        .find(|(_, pattern)| pattern.is_match(text))
        .map(|(label, _)| label.to_string())
}

pub fn extract_customer_name(text: &str) -> Option<String> {
    CUSTOMER_NAME
        .captures(text)
        .map(|caps| caps[1].trim().to_string())
}

/// Contact number, cut short where it runs into the unit details section.
pub fn extract_contact_number(text: &str) -> Option<String> {
    let caps = CONTACT_NUMBER.captures(text)?;
    let value = caps[1].trim();
    let value = value
        .split(UNIT_DETAILS_MARKER)
        .next()
        .unwrap_or(value)
        .trim();
    Some(value.to_string())
}

/// Address up to the next known label, with whitespace runs collapsed.
pub fn extract_address(text: &str) -> Option<String> {
    ADDRESS.captures(text).map(|caps| {
        WHITESPACE_RUN
            .replace_all(&caps[1], " ")
            .trim()
            .to_string()
    })
}

/// Location line, unless it swallowed the contact number label.
pub fn extract_location(text: &str) -> Option<String> {
    let caps = LOCATION.captures(text)?;
    let value = &caps[1];
    if value.to_uppercase().contains(LOCATION_CONTAMINANT) {
        return None;
    }
    Some(value.trim().to_string())
}
