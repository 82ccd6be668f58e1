//! DNS-over-HTTPS JSON Domain Layer
pub mod config;
pub mod errors;
pub mod json_message;
pub mod section;
pub mod ttl_summary;

pub use config::{ConfigError, TranscoderConfig};
pub use errors::{ErrorKind, TranscodeError};
pub use json_message::{JsonMessage, JsonQuestion, JsonRecord, EXPIRES_FORMAT};
pub use section::Section;
pub use ttl_summary::TtlSummary;
