use std::io;
use thiserror::Error;

use crate::types::MAX_VARINT_LEN;

/// Represents all possible errors when framing and decoding status packets
#[derive(Error, Debug)]
pub enum PacketError {
    #[error("IO Error: {0}")]
    Io(#[from] io::Error),

    #[error("VarInt is too big (more than {MAX_VARINT_LEN} bytes)")]
    MalformedVarInt,

    #[error("Unexpected end of data while decoding VarInt")]
    UnexpectedEnd,

    #[error("Declared packet length {length} exceeds maximum of {max}")]
    OversizedPacket { length: usize, max: usize },

    #[error("No JSON object found in status response")]
    NoJsonFound,

    #[error("Invalid status JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

impl PacketError {
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            PacketError::Io(e) => e.kind(),
            PacketError::MalformedVarInt => io::ErrorKind::InvalidData,
            PacketError::UnexpectedEnd => io::ErrorKind::UnexpectedEof,
            PacketError::OversizedPacket { .. } => io::ErrorKind::InvalidInput,
            PacketError::NoJsonFound => io::ErrorKind::InvalidData,
            PacketError::InvalidJson(_) => io::ErrorKind::InvalidData,
        }
    }
}

impl From<PacketError> for io::Error {
    fn from(err: PacketError) -> Self {
        match err {
            PacketError::Io(e) => e,
            other => io::Error::new(other.kind(), other.to_string()),
        }
    }
}

pub type PacketResult<T> = Result<T, PacketError>;
