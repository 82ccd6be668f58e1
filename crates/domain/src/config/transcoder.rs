use super::errors::ConfigError;
use serde::{Deserialize, Serialize};

/// Source netmask sentinel meaning "pick the per-family default".
pub const UNSPECIFIED_NETMASK: u8 = 255;

/// Settings applied when converting between wire and JSON form.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TranscoderConfig {
    /// UDP payload size advertised in the synthesized OPT record.
    #[serde(default = "default_udp_payload_size")]
    pub udp_payload_size: u16,

    /// Requested ECS source netmask; 255 selects /24 for IPv4 and /56 for IPv6.
    #[serde(default = "default_source_netmask")]
    pub source_netmask: u8,

    /// Emit the textual `Expires` field on outbound records.
    #[serde(default)]
    pub emit_expires: bool,
}

impl Default for TranscoderConfig {
    fn default() -> Self {
        Self {
            udp_payload_size: default_udp_payload_size(),
            source_netmask: default_source_netmask(),
            emit_expires: false,
        }
    }
}

impl TranscoderConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml_str(&contents)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.udp_payload_size == 0 {
            return Err(ConfigError::Validation(
                "udp_payload_size must be greater than 0".to_string(),
            ));
        }

        if self.source_netmask > 128 && self.source_netmask != UNSPECIFIED_NETMASK {
            return Err(ConfigError::Validation(format!(
                "source_netmask {} is out of range (0-128, or {} for the default)",
                self.source_netmask, UNSPECIFIED_NETMASK
            )));
        }

        Ok(())
    }
}

fn default_udp_payload_size() -> u16 {
    4096
}

fn default_source_netmask() -> u8 {
    UNSPECIFIED_NETMASK
}
