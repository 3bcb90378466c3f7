//! Contract number lookup from uploaded file names.
//!
//! Contract files are conventionally named `CC<digits>_<customer>.docx`. The
//! number in the body text is often missing or formatted differently, so the
//! file name is the authoritative source for `Contract No`.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref CONTRACT_FILENAME: Regex = Regex::new(r"CC(\d+)_").unwrap();
}

/// Extract the contract number embedded in a file name.
///
/// Returns the digit run following the first `CC` that is itself followed by
/// an underscore, or an empty string when the name carries no number.
pub fn contract_number_from_filename(filename: &str) -> String {
    CONTRACT_FILENAME
        .captures(filename)
        .map(|caps| caps[1].to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contract_number_from_filename() {
        assert_eq!(contract_number_from_filename("CC1234_Client.docx"), "1234");
        assert_eq!(contract_number_from_filename("AMC CC0007_Rao & Sons.docx"), "0007");
    }

    #[test]
    fn test_contract_number_requires_underscore() {
        assert_eq!(contract_number_from_filename("CC1234.docx"), "");
        assert_eq!(contract_number_from_filename("CC_1234_x.docx"), "");
        assert_eq!(contract_number_from_filename("contract.docx"), "");
    }

    #[test]
    fn test_contract_number_first_match_wins() {
        assert_eq!(contract_number_from_filename("CCX_CC12_CC34_.docx"), "12");
    }
}
