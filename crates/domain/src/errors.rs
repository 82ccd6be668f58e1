use crate::Section;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranscodeError {
    #[error("Invalid record name: {0:?}")]
    InvalidName(String),

    #[error("Invalid record data: {0:?}")]
    InvalidData(String),

    #[error("Unknown record type: {0}")]
    UnknownType(u16),

    #[error("Malformed record: {0}")]
    MalformedRecord(String),

    #[error("Invalid EDNS client subnet: {0:?}")]
    InvalidClientSubnet(String),

    #[error("Failed to decode {section} record #{index}: {source}")]
    RecordDecodeFailed {
        section: Section,
        index: usize,
        #[source]
        source: Box<TranscodeError>,
    },
}

/// Fieldless discriminant of [`TranscodeError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidName,
    InvalidData,
    UnknownType,
    MalformedRecord,
    InvalidClientSubnet,
    RecordDecodeFailed,
}

impl TranscodeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TranscodeError::InvalidName(_) => ErrorKind::InvalidName,
            TranscodeError::InvalidData(_) => ErrorKind::InvalidData,
            TranscodeError::UnknownType(_) => ErrorKind::UnknownType,
            TranscodeError::MalformedRecord(_) => ErrorKind::MalformedRecord,
            TranscodeError::InvalidClientSubnet(_) => ErrorKind::InvalidClientSubnet,
            TranscodeError::RecordDecodeFailed { .. } => ErrorKind::RecordDecodeFailed,
        }
    }
}
