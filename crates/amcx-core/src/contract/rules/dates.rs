//! Date extraction for AMC contracts.

use chrono::{Months, NaiveDate};
use tracing::trace;

use super::patterns::{AMC_PERIOD, DATE_DMY};
use super::{ExtractionMatch, FieldExtractor};
use crate::error::ExtractionError;

/// Months after the AMC start date at which each quarterly service falls due.
pub const SERVICE_MONTH_OFFSETS: [u32; 4] = [2, 5, 8, 11];

/// Parse a `dd.mm.yyyy` date.
pub fn parse_dmy(value: &str) -> Result<NaiveDate, ExtractionError> {
    NaiveDate::parse_from_str(value, "%d.%m.%Y").map_err(|_| ExtractionError::InvalidDate {
        value: value.to_string(),
    })
}

/// Render a date as `dd-mm-yyyy`.
pub fn format_dmy(date: NaiveDate) -> String {
    date.format("%d-%m-%Y").to_string()
}

/// Render a date as `Month Year`, e.g. `May 2024`.
pub fn format_month(date: NaiveDate) -> String {
    date.format("%B %Y").to_string()
}

/// English ordinal for a positive number: 1st, 2nd, 3rd, 4th, 11th, 22nd.
pub fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}

/// Extractor for `dd.mm.yyyy` dates anywhere in the text.
///
/// Candidates that look like dates but are not valid calendar dates
/// (`31.02.2024`) are skipped.
pub struct DateExtractor;

impl DateExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for DateExtractor {
    type Output = ExtractionMatch<NaiveDate>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        DATE_DMY
            .captures_iter(text)
            .find_map(|caps| date_match(&caps))
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        DATE_DMY
            .captures_iter(text)
            .filter_map(|caps| date_match(&caps))
            .collect()
    }
}

fn date_match(caps: &regex::Captures<'_>) -> Option<ExtractionMatch<NaiveDate>> {
    let m = caps.get(1)?;
    match parse_dmy(m.as_str()) {
        Ok(date) => Some(ExtractionMatch::new(date, m.as_str()).with_position(m.start(), m.end())),
        Err(e) => {
            trace!("Skipping date candidate: {}", e);
            None
        }
    }
}

/// First valid date in the text.
pub fn first_valid_date(text: &str) -> Option<NaiveDate> {
    DateExtractor::new().extract(text).map(|m| m.value)
}

/// Contract term taken from the `AMC PERIOD` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmcPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl AmcPeriod {
    /// Service due dates, [`SERVICE_MONTH_OFFSETS`] months after the start.
    ///
    /// The day is clamped to the end of shorter months.
    pub fn service_dates(&self) -> Option<[NaiveDate; 4]> {
        let [a, b, c, d] = SERVICE_MONTH_OFFSETS;
        Some([
            self.start.checked_add_months(Months::new(a))?,
            self.start.checked_add_months(Months::new(b))?,
            self.start.checked_add_months(Months::new(c))?,
            self.start.checked_add_months(Months::new(d))?,
        ])
    }

    /// Service months formatted as `Month Year`.
    pub fn service_months(&self) -> Option<[String; 4]> {
        self.service_dates().map(|dates| dates.map(format_month))
    }
}

/// Extract the AMC period.
///
/// Only the first `AMC PERIOD` line is considered; if either of its dates is
/// invalid there is no period at all.
pub fn extract_amc_period(text: &str) -> Option<AmcPeriod> {
    let caps = AMC_PERIOD.captures(text)?;

    match (parse_dmy(&caps[1]), parse_dmy(&caps[2])) {
        (Ok(start), Ok(end)) => Some(AmcPeriod { start, end }),
        (Err(e), _) | (_, Err(e)) => {
            trace!("Discarding AMC period {:?}: {}", &caps[0], e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_dmy() {
        assert_eq!(parse_dmy("01.03.2024"), Ok(ymd(2024, 3, 1)));
        assert_eq!(
            parse_dmy("31.02.2024"),
            Err(ExtractionError::InvalidDate { value: "31.02.2024".to_string() })
        );
    }

    #[test]
    fn test_first_valid_date_skips_invalid_candidates() {
        let text = "Ref 99.99.2024, signed 31.02.2024 then 15.06.2024 and 01.01.2025";
        assert_eq!(first_valid_date(text), Some(ymd(2024, 6, 15)));
        assert_eq!(first_valid_date("no dates"), None);
        assert_eq!(first_valid_date("only 32.13.2024"), None);
    }

    #[test]
    fn test_dates_need_word_boundaries() {
        assert_eq!(first_valid_date("123.03.2024"), None);
        assert_eq!(first_valid_date("1.3.2024"), None);
    }

    #[test]
    fn test_extract_all_dates() {
        let dates = DateExtractor::new().extract_all("01.03.2024 to 28.02.2025");
        assert_eq!(dates.len(), 2);
        assert_eq!(dates[1].value, ymd(2025, 2, 28));
        assert_eq!(dates[1].position, Some((14, 24)));
    }

    #[test]
    fn test_amc_period_and_service_months() {
        let period = extract_amc_period("AMC PERIOD: 01.03.2024 to 28.02.2025").unwrap();

        assert_eq!(format_dmy(period.start), "01-03-2024");
        assert_eq!(format_dmy(period.end), "28-02-2025");
        assert_eq!(
            period.service_months().unwrap(),
            [
                "May 2024".to_string(),
                "August 2024".to_string(),
                "November 2024".to_string(),
                "February 2025".to_string(),
            ]
        );
    }

    #[test]
    fn test_amc_period_variants() {
        assert!(extract_amc_period("amc period - 01.04.2024 - 31.03.2025").is_some());
        assert!(extract_amc_period("AMC PERIOD 01.04.2024to31.03.2025").is_some());
        assert!(extract_amc_period("AMC PERIOD: 01.04.2024 until 31.03.2025").is_none());
    }

    #[test]
    fn test_amc_period_all_or_nothing() {
        assert_eq!(extract_amc_period("AMC PERIOD: 01.03.2024 to 30.02.2025"), None);
        assert_eq!(extract_amc_period("AMC PERIOD: 45.03.2024 to 28.02.2025"), None);
    }

    #[test]
    fn test_service_dates_clamp_to_month_end() {
        let period = AmcPeriod { start: ymd(2023, 12, 31), end: ymd(2024, 12, 30) };
        let dates = period.service_dates().unwrap();
        assert_eq!(dates[0], ymd(2024, 2, 29));
        assert_eq!(dates[3], ymd(2024, 11, 30));
    }

    #[test]
    fn test_ordinal() {
        let labels: Vec<String> = (1..=4).map(ordinal).collect();
        assert_eq!(labels, vec!["1st", "2nd", "3rd", "4th"]);
        assert_eq!(ordinal(11), "11th");
        assert_eq!(ordinal(12), "12th");
        assert_eq!(ordinal(22), "22nd");
        assert_eq!(ordinal(101), "101st");
    }
}
