#![allow(dead_code)]
use dnsjson_domain::{JsonMessage, JsonQuestion, JsonRecord};

pub struct JsonMessageBuilder {
    message: JsonMessage,
}

impl JsonMessageBuilder {
    pub fn new() -> Self {
        Self {
            message: JsonMessage {
                rd: true,
                ra: true,
                ..JsonMessage::default()
            },
        }
    }

    pub fn status(mut self, status: u32) -> Self {
        self.message.status = status;
        self
    }

    pub fn question(mut self, name: &str, question_type: u16) -> Self {
        self.message.question.push(JsonQuestion::new(name, question_type));
        self
    }

    pub fn answer(mut self, name: &str, record_type: u16, ttl: u32, data: &str) -> Self {
        self.message
            .answer
            .push(JsonRecord::new(name, record_type, ttl, data));
        self
    }

    pub fn authority(mut self, name: &str, record_type: u16, ttl: u32, data: &str) -> Self {
        self.message
            .authority
            .push(JsonRecord::new(name, record_type, ttl, data));
        self
    }

    pub fn client_subnet(mut self, subnet: &str) -> Self {
        self.message.edns_client_subnet = Some(subnet.to_string());
        self
    }

    pub fn comment(mut self, comment: &str) -> Self {
        self.message.comment = Some(comment.to_string());
        self
    }

    pub fn build(self) -> JsonMessage {
        self.message
    }
}
