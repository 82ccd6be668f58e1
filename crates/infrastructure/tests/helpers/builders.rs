#![allow(dead_code)]
use chrono::{DateTime, TimeZone, Utc};
use dnsjson_infrastructure::dns::codec::record::parse_zone_line;
use hickory_proto::op::{Edns, Message, MessageType, OpCode, Query, ResponseCode};
use hickory_proto::rr::rdata::opt::{ClientSubnet, EdnsOption};
use hickory_proto::rr::{DNSClass, Name, RData, Record, RecordType};
use std::str::FromStr;

pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
}

/// Record from a zone line, e.g. `"www.example.com. 300 IN A 192.0.2.1"`.
pub fn record(line: &str) -> Record {
    parse_zone_line(line).unwrap()
}

pub struct MessageBuilder {
    message: Message,
}

impl MessageBuilder {
    pub fn new() -> Self {
        let mut message = Message::new(0x1234, MessageType::Response, OpCode::Query);
        message.set_recursion_desired(true);
        message.set_recursion_available(true);
        Self { message }
    }

    pub fn query() -> Self {
        let mut message = Message::new(0x4321, MessageType::Query, OpCode::Query);
        message.set_recursion_desired(true);
        Self { message }
    }

    pub fn question(mut self, name: &str, record_type: RecordType) -> Self {
        let mut query = Query::new();
        query.set_name(Name::from_str(name).unwrap());
        query.set_query_type(record_type);
        query.set_query_class(DNSClass::IN);
        self.message.add_query(query);
        self
    }

    pub fn answer(mut self, line: &str) -> Self {
        self.message.add_answer(record(line));
        self
    }

    pub fn authority(mut self, line: &str) -> Self {
        self.message.add_name_server(record(line));
        self
    }

    pub fn additional(mut self, line: &str) -> Self {
        self.message.add_additional(record(line));
        self
    }

    pub fn additional_record(mut self, record: Record) -> Self {
        self.message.add_additional(record);
        self
    }

    pub fn response_code(mut self, code: ResponseCode) -> Self {
        self.message.set_response_code(code);
        self
    }

    pub fn edns(mut self, rcode_high: u8, subnet: Option<ClientSubnet>) -> Self {
        let mut edns = Edns::new();
        edns.set_max_payload(4096);
        edns.set_rcode_high(rcode_high);
        if let Some(subnet) = subnet {
            edns.options_mut().insert(EdnsOption::Subnet(subnet));
        }
        *self.message.extensions_mut() = Some(edns);
        self
    }

    pub fn build(self) -> Message {
        self.message
    }
}

/// OPT pseudo-record placed directly in a record section, the way a
/// hand-assembled message carries it.
pub fn opt_record(rcode_high: u8, subnet: Option<ClientSubnet>) -> Record {
    let mut edns = Edns::new();
    if let Some(subnet) = subnet {
        edns.options_mut().insert(EdnsOption::Subnet(subnet));
    }
    Record::from_rdata(
        Name::root(),
        u32::from(rcode_high) << 24,
        RData::OPT(edns.options().clone()),
    )
}
