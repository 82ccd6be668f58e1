use hickory_proto::rr::{Record, RecordType};

/// How a section entry is handled by the transcoders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Ordinary,
    /// EDNS0 OPT pseudo-record; never emitted as a JSON record.
    Opt,
}

pub trait RecordKind {
    fn kind(&self) -> EntryKind;
}

impl RecordKind for Record {
    fn kind(&self) -> EntryKind {
        match self.record_type() {
            RecordType::OPT => EntryKind::Opt,
            _ => EntryKind::Ordinary,
        }
    }
}
