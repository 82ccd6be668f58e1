//! JSON → wire

use crate::dns::codec::{ecs, record};
use chrono::{DateTime, Utc};
use dnsjson_domain::{JsonMessage, Section, TranscodeError};
use hickory_proto::op::{Message, MessageType, ResponseCode};
use hickory_proto::rr::Record;
use tracing::{debug, warn};

/// Result of [`json_to_wire`].
#[derive(Debug, Clone)]
pub struct InboundReply {
    pub message: Message,
    /// One `RecordDecodeFailed` per JSON record that was dropped.
    pub skipped: Vec<TranscodeError>,
}

/// Rebuild a wire reply from its JSON shape.
///
/// `template` supplies the ID, opcode, question and RD/RA flags of the
/// reply. Records that fail to decode are dropped and reported in
/// [`InboundReply::skipped`]; only a malformed `edns_client_subnet` fails the
/// whole conversion. The reply always carries an OPT record.
pub fn json_to_wire(
    json: &JsonMessage,
    template: &Message,
    udp_payload_size: u16,
    source_netmask: u8,
    now: DateTime<Utc>,
) -> Result<InboundReply, TranscodeError> {
    let mut reply = Message::new(template.id(), MessageType::Response, template.op_code());
    for query in template.queries() {
        reply.add_query(query.clone());
    }
    reply.set_recursion_desired(template.recursion_desired());
    reply.set_recursion_available(template.recursion_available());

    reply.set_truncated(json.tc);
    reply.set_authentic_data(json.ad);
    reply.set_checking_disabled(json.cd);
    reply.set_response_code(ResponseCode::ServFail);

    let mut skipped = Vec::new();
    for section in Section::all() {
        for (index, entry) in json.section(*section).iter().enumerate() {
            match record::unmarshal(entry, now) {
                Ok(decoded) => add_to_section(&mut reply, *section, decoded),
                Err(e) => {
                    warn!(
                        section = %section,
                        index,
                        name = %entry.name.escape_debug(),
                        error = %e,
                        "Dropping undecodable JSON record"
                    );
                    skipped.push(TranscodeError::RecordDecodeFailed {
                        section: *section,
                        index,
                        source: Box::new(e),
                    });
                }
            }
        }
    }

    let rcode_high = ((json.status >> 4) & 0xFF) as u8;
    let rcode_low = (json.status & 0x000F) as u8;

    let edns = ecs::synthesize_opt(
        json.edns_client_subnet.as_deref().unwrap_or(""),
        udp_payload_size,
        source_netmask,
        rcode_high,
    )
    .map_err(|e| {
        warn!(error = %e, "Rejecting JSON message with malformed client subnet");
        e
    })?;
    *reply.extensions_mut() = Some(edns);

    // hickory keeps the full 12-bit code in the header and splits it into
    // header and OPT on encode.
    reply.set_response_code(ResponseCode::from(rcode_high, rcode_low));

    debug!(
        status = json.status,
        answers = reply.answers().len(),
        authority = reply.name_servers().len(),
        additional = reply.additionals().len(),
        skipped = skipped.len(),
        "JSON message converted to DNS message"
    );

    Ok(InboundReply {
        message: reply,
        skipped,
    })
}

fn add_to_section(message: &mut Message, section: Section, record: Record) {
    match section {
        Section::Answer => message.add_answer(record),
        Section::Authority => message.add_name_server(record),
        Section::Additional => message.add_additional(record),
    };
}
