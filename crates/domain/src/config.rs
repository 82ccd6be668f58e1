pub mod errors;
pub mod transcoder;

pub use errors::ConfigError;
pub use transcoder::{TranscoderConfig, UNSPECIFIED_NETMASK};
