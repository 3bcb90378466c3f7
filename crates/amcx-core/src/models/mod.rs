//! Data models.

pub mod config;
pub mod record;

pub use config::{AmcxConfig, ExportConfig, InputConfig};
pub use record::{AmcRecord, FieldValue, DEFAULT_SERVICE_FREQUENCY, FIELD_COUNT, FIELD_NAMES};
