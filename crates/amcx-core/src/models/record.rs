//! The fixed AMC record extracted from one contract document.

use serde::{Deserialize, Serialize};

/// Number of columns in an exported record.
pub const FIELD_COUNT: usize = 16;

/// Column headers in export order.
pub const FIELD_NAMES: [&str; FIELD_COUNT] = [
    "Contract Type",
    "Contract No",
    "Customer Name",
    "Contact Number",
    "Address",
    "Location",
    "Unit Details",
    "Amount",
    "Contract Date",
    "Amc Start Date",
    "Amc End Date",
    "Service Frequency",
    "1st Service Month",
    "2nd Service Month",
    "3rd Service Month",
    "4th Service Month",
];

/// Default number of service visits per contract term.
pub const DEFAULT_SERVICE_FREQUENCY: u32 = 4;

/// One extracted contract.
///
/// Every field is always present; a rule that finds nothing leaves the
/// default (empty string, or [`DEFAULT_SERVICE_FREQUENCY`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmcRecord {
    #[serde(rename = "Contract Type")]
    pub contract_type: String,

    #[serde(rename = "Contract No")]
    pub contract_no: String,

    #[serde(rename = "Customer Name")]
    pub customer_name: String,

    #[serde(rename = "Contact Number")]
    pub contact_number: String,

    #[serde(rename = "Address")]
    pub address: String,

    #[serde(rename = "Location")]
    pub location: String,

    /// Serviced units, one per line.
    #[serde(rename = "Unit Details")]
    pub unit_details: String,

    /// Contract amount exactly as written (thousands separators kept).
    #[serde(rename = "Amount")]
    pub amount: String,

    /// `dd-mm-yyyy`.
    #[serde(rename = "Contract Date")]
    pub contract_date: String,

    /// `dd-mm-yyyy`.
    #[serde(rename = "Amc Start Date")]
    pub amc_start_date: String,

    /// `dd-mm-yyyy`.
    #[serde(rename = "Amc End Date")]
    pub amc_end_date: String,

    #[serde(rename = "Service Frequency")]
    pub service_frequency: u32,

    /// Quarterly service months, `Month Year`.
    #[serde(rename = "1st Service Month")]
    pub service_month_1: String,

    #[serde(rename = "2nd Service Month")]
    pub service_month_2: String,

    #[serde(rename = "3rd Service Month")]
    pub service_month_3: String,

    #[serde(rename = "4th Service Month")]
    pub service_month_4: String,
}

impl Default for AmcRecord {
    fn default() -> Self {
        Self {
            contract_type: String::new(),
            contract_no: String::new(),
            customer_name: String::new(),
            contact_number: String::new(),
            address: String::new(),
            location: String::new(),
            unit_details: String::new(),
            amount: String::new(),
            contract_date: String::new(),
            amc_start_date: String::new(),
            amc_end_date: String::new(),
            service_frequency: DEFAULT_SERVICE_FREQUENCY,
            service_month_1: String::new(),
            service_month_2: String::new(),
            service_month_3: String::new(),
            service_month_4: String::new(),
        }
    }
}

/// A single cell value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Number(u32),
}

impl std::fmt::Display for FieldValue<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{}", n),
        }
    }
}

impl AmcRecord {
    /// Create an empty record carrying only the contract number.
    pub fn with_contract_no(contract_no: impl Into<String>) -> Self {
        Self {
            contract_no: contract_no.into(),
            ..Self::default()
        }
    }

    /// Cell values in [`FIELD_NAMES`] order.
    pub fn values(&self) -> [FieldValue<'_>; FIELD_COUNT] {
        use FieldValue::{Number, Text};

        [
            Text(&self.contract_type),
            Text(&self.contract_no),
            Text(&self.customer_name),
            Text(&self.contact_number),
            Text(&self.address),
            Text(&self.location),
            Text(&self.unit_details),
            Text(&self.amount),
            Text(&self.contract_date),
            Text(&self.amc_start_date),
            Text(&self.amc_end_date),
            Number(self.service_frequency),
            Text(&self.service_month_1),
            Text(&self.service_month_2),
            Text(&self.service_month_3),
            Text(&self.service_month_4),
        ]
    }

    /// Cell values rendered as strings.
    pub fn to_row(&self) -> Vec<String> {
        self.values().iter().map(|v| v.to_string()).collect()
    }

    /// Store the four service months in order.
    pub fn set_service_months(&mut self, months: [String; 4]) {
        let [first, second, third, fourth] = months;
        self.service_month_1 = first;
        self.service_month_2 = second;
        self.service_month_3 = third;
        self.service_month_4 = fourth;
    }

    /// The four service months in order.
    pub fn service_months(&self) -> [&str; 4] {
        [
            &self.service_month_1,
            &self.service_month_2,
            &self.service_month_3,
            &self.service_month_4,
        ]
    }
}
