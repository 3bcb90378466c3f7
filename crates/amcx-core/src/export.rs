//! Tabular export of extracted records: xlsx, CSV and JSON.

use std::fmt::Write as _;

use chrono::NaiveDateTime;
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};
use tracing::{debug, warn};

use crate::error::ExportError;
use crate::models::config::ExportConfig;
use crate::models::record::{AmcRecord, FIELD_NAMES, FieldValue};

/// Result type for export operations.
pub type Result<T> = std::result::Result<T, ExportError>;

/// Excel's per-cell text limit.
const MAX_CELL_CHARS: usize = 32_767;

const FALLBACK_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M";

/// Output serialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// Excel workbook, one worksheet.
    #[default]
    Xlsx,
    /// Comma-separated values with a header row.
    Csv,
    /// JSON array of objects keyed by field name.
    Json,
}

impl ExportFormat {
    /// File extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Xlsx => "xlsx",
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

/// Serializes records to an in-memory byte stream.
#[derive(Debug, Clone, Default)]
pub struct Exporter {
    config: ExportConfig,
}

impl Exporter {
    /// Create an exporter with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an exporter from export configuration.
    pub fn from_config(config: ExportConfig) -> Self {
        Self { config }
    }

    /// Serialize records in the requested format.
    pub fn export(&self, records: &[AmcRecord], format: ExportFormat) -> Result<Vec<u8>> {
        let bytes = match format {
            ExportFormat::Xlsx => self.to_xlsx(records)?,
            ExportFormat::Csv => to_csv(records)?,
            ExportFormat::Json => to_json(records)?,
        };
        debug!("Exported {} records as {:?} ({} bytes)", records.len(), format, bytes.len());
        Ok(bytes)
    }

    /// Build an xlsx workbook: header row of field names, one row per record.
    pub fn to_xlsx(&self, records: &[AmcRecord]) -> Result<Vec<u8>> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&self.config.sheet_name)?;

        let header_format = Format::new().set_bold();
        let text_format = Format::new().set_text_wrap();

        for (col, width) in column_widths(records, self.config.max_column_width)
            .into_iter()
            .enumerate()
        {
            worksheet.set_column_width(col as u16, width)?;
        }

        for (col, name) in FIELD_NAMES.iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, *name, &header_format)?;
        }

        for (index, record) in records.iter().enumerate() {
            let row = (index + 1) as u32;
            for (col, value) in record.values().into_iter().enumerate() {
                write_cell(worksheet, row, col as u16, value, &text_format)?;
            }
        }

        worksheet.set_freeze_panes(1, 0)?;
        Ok(workbook.save_to_buffer()?)
    }

    /// Output file name: `<prefix>_<timestamp>.<ext>`.
    pub fn output_filename(&self, format: ExportFormat, now: NaiveDateTime) -> String {
        output_filename(
            &self.config.file_prefix,
            &self.config.timestamp_format,
            now,
            format.extension(),
        )
    }
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: FieldValue<'_>,
    text_format: &Format,
) -> std::result::Result<(), XlsxError> {
    match value {
        FieldValue::Number(n) => worksheet.write_number(row, col, n).map(|_| ()),
        FieldValue::Text(s) => {
            let cleaned = sanitize_cell(s);
            worksheet
                .write_string_with_format(row, col, &cleaned, text_format)
                .map(|_| ())
        }
    }
}

/// Drop characters that are invalid in sheet XML and clamp to the cell limit.
fn sanitize_cell(s: &str) -> String {
    s.chars()
        .filter(|&c| {
            let u = c as u32;
            matches!(c, '\t' | '\n' | '\r') || !(u < 0x20 || u == 0xFFFE || u == 0xFFFF)
        })
        .take(MAX_CELL_CHARS)
        .collect()
}

/// Width per column from the longest line in it, capped.
fn column_widths(records: &[AmcRecord], max_width: f64) -> Vec<f64> {
    let mut widths: Vec<f64> = FIELD_NAMES.iter().map(|h| text_width(h)).collect();

    for record in records {
        for (col, value) in record.values().into_iter().enumerate() {
            let w = text_width(&value.to_string());
            if w > widths[col] {
                widths[col] = w;
            }
        }
    }

    widths.into_iter().map(|w| w.min(max_width)).collect()
}

fn text_width(s: &str) -> f64 {
    s.lines().map(|l| l.chars().count()).max().unwrap_or(0) as f64 + 2.0
}

/// Serialize records as CSV with a header row.
pub fn to_csv(records: &[AmcRecord]) -> Result<Vec<u8>> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(FIELD_NAMES)?;
    for record in records {
        wtr.write_record(record.to_row())?;
    }

    wtr.into_inner()
        .map_err(|e| ExportError::Csv(csv::Error::from(e.into_error())))
}

/// Serialize records as a pretty-printed JSON array.
pub fn to_json(records: &[AmcRecord]) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(records)?)
}

/// Build `<prefix>_<timestamp>.<extension>`.
///
/// An invalid timestamp format falls back to `%Y%m%d_%H%M`.
pub fn output_filename(
    prefix: &str,
    timestamp_format: &str,
    now: NaiveDateTime,
    extension: &str,
) -> String {
    let mut stamp = String::new();
    if write!(stamp, "{}", now.format(timestamp_format)).is_err() {
        warn!("Invalid timestamp format {:?}, using default", timestamp_format);
        stamp = now.format(FALLBACK_TIMESTAMP_FORMAT).to_string();
    }
    format!("{}_{}.{}", prefix, stamp, extension)
}
