pub mod inbound;
pub mod outbound;

pub use inbound::{json_to_wire, InboundReply};
pub use outbound::wire_to_json;

use chrono::{DateTime, Utc};
use dnsjson_domain::{JsonMessage, TranscodeError, TranscoderConfig};
use hickory_proto::op::Message;

/// Both conversions bound to one configuration.
#[derive(Debug, Clone, Default)]
pub struct Transcoder {
    config: TranscoderConfig,
}

impl Transcoder {
    pub fn new(config: TranscoderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TranscoderConfig {
        &self.config
    }

    pub fn to_json(&self, message: &Message) -> JsonMessage {
        self.to_json_at(message, Utc::now())
    }

    pub fn to_json_at(&self, message: &Message, now: DateTime<Utc>) -> JsonMessage {
        let mut json = wire_to_json(message, now);
        if self.config.emit_expires {
            json.stamp_expires();
        }
        json
    }

    pub fn from_json(
        &self,
        json: &JsonMessage,
        template: &Message,
    ) -> Result<InboundReply, TranscodeError> {
        self.from_json_at(json, template, Utc::now())
    }

    pub fn from_json_at(
        &self,
        json: &JsonMessage,
        template: &Message,
        now: DateTime<Utc>,
    ) -> Result<InboundReply, TranscodeError> {
        json_to_wire(
            json,
            template,
            self.config.udp_payload_size,
            self.config.source_netmask,
            now,
        )
    }
}
