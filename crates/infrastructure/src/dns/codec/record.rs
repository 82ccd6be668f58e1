//! Record Codec
//!
//! Converts a single resource record to and from its JSON shape. Decoding
//! rebuilds a one-line zone record (`<name> <ttl> IN <type> <data>`) and lets
//! `hickory-proto`'s presentation-format parsers produce the rdata, so every
//! record type hickory can read from a zone file is supported without
//! per-type binary encoding here.

use chrono::{DateTime, Duration, Utc};
use dnsjson_domain::{JsonRecord, TranscodeError};
use hickory_proto::rr::{DNSClass, Name, RData, Record, RecordType};
use hickory_proto::serialize::txt::RDataParser;
use std::str::FromStr;

/// Characters that would split or comment out fields of the zone line.
const FORBIDDEN_NAME_CHARS: &[char] = &['\t', '\r', '\n', ' ', '"', '(', ')', ';', '\\'];

/// Convert a wire record to its JSON shape, stamping `now + TTL` as expiry.
pub fn marshal(record: &Record, now: DateTime<Utc>) -> JsonRecord {
    let ttl = record.ttl();

    let mut json = JsonRecord::new(
        record.name().to_string(),
        u16::from(record.record_type()),
        ttl,
        rdata_text(record),
    );
    json.expires_at = Some(now + Duration::seconds(i64::from(ttl)));
    json
}

/// Presentation form of the record data alone, i.e. the zone line without
/// its name, TTL, class and type fields.
pub fn rdata_text(record: &Record) -> String {
    match record.data() {
        RData::TXT(txt) => txt
            .txt_data()
            .iter()
            .map(|chunk| quote_character_string(chunk))
            .collect::<Vec<_>>()
            .join(" "),
        rdata => rdata.to_string(),
    }
}

/// Zone-file `<character-string>`: quoted, with `"` and `\` escaped and
/// non-printable bytes written as `\DDD`.
fn quote_character_string(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() + 2);
    out.push('"');
    for &b in bytes {
        match b {
            b'"' | b'\\' => {
                out.push('\\');
                out.push(char::from(b));
            }
            0x20..=0x7E => out.push(char::from(b)),
            _ => out.push_str(&format!("\\{:03}", b)),
        }
    }
    out.push('"');
    out
}

/// Rebuild a wire record from its JSON shape.
pub fn unmarshal(json: &JsonRecord, now: DateTime<Utc>) -> Result<Record, TranscodeError> {
    if json.name.contains(FORBIDDEN_NAME_CHARS) {
        return Err(TranscodeError::InvalidName(json.name.clone()));
    }

    let record_type = RecordType::from(json.record_type);
    if let RecordType::Unknown(code) = record_type {
        return Err(TranscodeError::UnknownType(code));
    }

    if json.data.contains(|c: char| c == '\r' || c == '\n') {
        return Err(TranscodeError::InvalidData(json.data.clone()));
    }

    let ttl = effective_ttl(json, now);
    parse_zone_line(&zone_line(&json.name, ttl, record_type, &json.data))
}

/// TTL to encode: the remaining lifetime when a parseable `Expires` is
/// present, the literal TTL otherwise.
pub fn effective_ttl(json: &JsonRecord, now: DateTime<Utc>) -> u32 {
    match json.parse_expires() {
        Some(expires) => (expires - now)
            .num_seconds()
            .clamp(0, i64::from(u32::MAX)) as u32,
        None => json.ttl,
    }
}

pub fn zone_line(name: &str, ttl: u32, record_type: RecordType, data: &str) -> String {
    format!("{} {} IN {} {}", name, ttl, record_type, data)
}

/// Parse `<name> <ttl> <class> <type> <rdata...>` into a record.
pub fn parse_zone_line(line: &str) -> Result<Record, TranscodeError> {
    let malformed = |reason: String| TranscodeError::MalformedRecord(format!("{line:?}: {reason}"));

    let mut fields = [""; 4];
    let mut rest = line;
    for field in fields.iter_mut() {
        let (head, tail) = rest
            .trim_start()
            .split_once(char::is_whitespace)
            .ok_or_else(|| malformed("truncated zone line".to_string()))?;
        *field = head;
        rest = tail;
    }
    let [name, ttl, class, mnemonic] = fields;

    let name = Name::from_str(name).map_err(|e| malformed(e.to_string()))?;
    let ttl: u32 = ttl
        .parse()
        .map_err(|e| malformed(format!("bad TTL {ttl:?}: {e}")))?;
    let class = DNSClass::from_str(class).map_err(|e| malformed(e.to_string()))?;
    let record_type = RecordType::from_str(mnemonic).map_err(|e| malformed(e.to_string()))?;
    let rdata = RData::try_from_str(record_type, rest.trim()).map_err(|e| malformed(e.to_string()))?;

    let mut record = Record::from_rdata(name, ttl, rdata);
    record.set_dns_class(class);
    Ok(record)
}
