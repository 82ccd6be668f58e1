pub mod codec;
pub mod transcoder;

pub use codec::{EntryKind, OptExtract, RecordKind};
pub use transcoder::{json_to_wire, wire_to_json, InboundReply, Transcoder};
