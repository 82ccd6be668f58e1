//! JSON shape of a DNS message, compatible with the public DoH JSON APIs
//! (`application/dns-json`).

use crate::{Section, TtlSummary};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// RFC 1123 date layout used by the textual `Expires` field.
pub const EXPIRES_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JsonMessage {
    /// Response code: low 4 bits from the header, bits 4..12 from the OPT record.
    #[serde(rename = "Status")]
    pub status: u32,

    #[serde(rename = "TC")]
    pub tc: bool,

    #[serde(rename = "RD")]
    pub rd: bool,

    #[serde(rename = "RA")]
    pub ra: bool,

    #[serde(rename = "AD")]
    pub ad: bool,

    #[serde(rename = "CD")]
    pub cd: bool,

    #[serde(rename = "Question", default)]
    pub question: Vec<JsonQuestion>,

    #[serde(rename = "Answer", default, skip_serializing_if = "Vec::is_empty")]
    pub answer: Vec<JsonRecord>,

    #[serde(rename = "Authority", default, skip_serializing_if = "Vec::is_empty")]
    pub authority: Vec<JsonRecord>,

    #[serde(rename = "Additional", default, skip_serializing_if = "Vec::is_empty")]
    pub additional: Vec<JsonRecord>,

    /// `<address>/<scope>` of the EDNS0 client subnet option.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edns_client_subnet: Option<String>,

    #[serde(rename = "Comment", default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    /// Aggregated over every record of the message when built from wire form.
    #[serde(skip)]
    pub ttl: TtlSummary,
}

impl JsonMessage {
    pub fn section(&self, section: Section) -> &[JsonRecord] {
        match section {
            Section::Answer => &self.answer,
            Section::Authority => &self.authority,
            Section::Additional => &self.additional,
        }
    }

    pub fn section_mut(&mut self, section: Section) -> &mut Vec<JsonRecord> {
        match section {
            Section::Answer => &mut self.answer,
            Section::Authority => &mut self.authority,
            Section::Additional => &mut self.additional,
        }
    }

    pub fn record_count(&self) -> usize {
        self.answer.len() + self.authority.len() + self.additional.len()
    }

    /// Fill the textual `Expires` field of every record that carries an
    /// absolute expiry.
    pub fn stamp_expires(&mut self) {
        for section in Section::all() {
            for record in self.section_mut(*section) {
                if let Some(at) = record.expires_at {
                    record.expires = Some(at.format(EXPIRES_FORMAT).to_string());
                }
            }
        }
    }

    pub fn to_json_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonQuestion {
    /// FQDN with trailing dot
    pub name: String,

    #[serde(rename = "type")]
    pub question_type: u16,
}

impl JsonQuestion {
    pub fn new(name: impl Into<String>, question_type: u16) -> Self {
        Self {
            name: name.into(),
            question_type,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonRecord {
    pub name: String,

    #[serde(rename = "type")]
    pub record_type: u16,

    #[serde(rename = "TTL")]
    pub ttl: u32,

    /// Presentation form of the rdata only.
    pub data: String,

    #[serde(rename = "Expires", default, skip_serializing_if = "Option::is_none")]
    pub expires: Option<String>,

    #[serde(skip)]
    pub expires_at: Option<DateTime<Utc>>,
}

impl JsonRecord {
    pub fn new(name: impl Into<String>, record_type: u16, ttl: u32, data: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            record_type,
            ttl,
            data: data.into(),
            expires: None,
            expires_at: None,
        }
    }

    pub fn with_expires(mut self, expires: impl Into<String>) -> Self {
        self.expires = Some(expires.into());
        self
    }

    /// Absolute expiry parsed from the textual `Expires` field.
    ///
    /// Accepts the RFC 1123 `GMT` form as well as any RFC 2822 offset.
    pub fn parse_expires(&self) -> Option<DateTime<Utc>> {
        let text = self.expires.as_deref()?.trim();

        if let Ok(at) = NaiveDateTime::parse_from_str(text, EXPIRES_FORMAT) {
            return Some(at.and_utc());
        }

        DateTime::parse_from_rfc2822(text)
            .ok()
            .map(|at| at.with_timezone(&Utc))
    }
}
