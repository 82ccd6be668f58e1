//! Wire → JSON

use crate::dns::codec::{ecs, record, EntryKind, OptExtract, RecordKind};
use chrono::{DateTime, Utc};
use dnsjson_domain::{JsonMessage, JsonQuestion, JsonRecord, Section, TtlSummary};
use hickory_proto::op::Message;
use hickory_proto::rr::Record;
use tracing::debug;

#[derive(Default)]
struct SectionOutput {
    records: Vec<JsonRecord>,
    ttl: TtlSummary,
    opt: Option<OptExtract>,
}

/// Convert a wire message to its JSON shape.
///
/// The OPT pseudo-record is consumed into `Status` and `edns_client_subnet`
/// and never listed as a record. Only the first OPT seen is honoured: the
/// parsed EDNS section of the message, then OPT-typed records in answer,
/// authority and additional order.
pub fn wire_to_json(message: &Message, now: DateTime<Utc>) -> JsonMessage {
    let mut json = JsonMessage {
        tc: message.truncated(),
        rd: message.recursion_desired(),
        ra: message.recursion_available(),
        ad: message.authentic_data(),
        cd: message.checking_disabled(),
        question: message
            .queries()
            .iter()
            .map(|query| JsonQuestion::new(query.name().to_string(), u16::from(query.query_type())))
            .collect(),
        ..JsonMessage::default()
    };

    let mut opt = message.extensions().as_ref().map(ecs::extract_from_edns);
    let mut ttl = TtlSummary::default();

    for section in Section::all() {
        let records = match section {
            Section::Answer => message.answers(),
            Section::Authority => message.name_servers(),
            Section::Additional => message.additionals(),
        };

        let output = convert_section(records, now);
        if opt.is_some() && output.opt.is_some() {
            debug!(section = %section, "Ignoring extra OPT record");
        }

        opt = opt.or(output.opt);
        ttl = ttl.merge(output.ttl);
        *json.section_mut(*section) = output.records;
    }

    let extract = opt.unwrap_or_default();
    json.status = extract.status(u16::from(message.response_code()));
    json.edns_client_subnet = extract.client_subnet;
    json.ttl = ttl;

    debug!(
        status = json.status,
        answers = json.answer.len(),
        authority = json.authority.len(),
        additional = json.additional.len(),
        least_ttl = ?json.ttl.least_ttl(),
        "DNS message converted to JSON"
    );

    json
}

fn convert_section(records: &[Record], now: DateTime<Utc>) -> SectionOutput {
    records
        .iter()
        .fold(SectionOutput::default(), |mut output, entry| {
            match entry.kind() {
                EntryKind::Opt => match output.opt {
                    Some(_) => debug!("Ignoring extra OPT record"),
                    None => output.opt = ecs::extract_from_record(entry),
                },
                EntryKind::Ordinary => {
                    let converted = record::marshal(entry, now);
                    if let Some(expires) = converted.expires_at {
                        output.ttl = output.ttl.observe(converted.ttl, expires);
                    }
                    output.records.push(converted);
                }
            }
            output
        })
}
