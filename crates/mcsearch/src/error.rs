use std::{io, time::Duration};

use mcsearch_protocol::PacketError;
use thiserror::Error;

/// Terminal failure of one probe. Every variant is recoverable: callers
/// skip the target and carry on.
#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("Connection error: {0}")]
    Connection(#[from] io::Error),

    #[error("No complete status response within {0:?}")]
    Timeout(Duration),

    #[error("Malformed VarInt in server response")]
    MalformedVarInt,

    #[error("Declared packet length {length} exceeds maximum of {max}")]
    OversizedPacket { length: usize, max: usize },

    #[error("No JSON object found in status response")]
    NoJsonFound,

    #[error("Invalid status JSON: {0}")]
    InvalidJson(serde_json::Error),
}

impl From<PacketError> for ProbeError {
    fn from(err: PacketError) -> Self {
        match err {
            PacketError::Io(e) => ProbeError::Connection(e),
            PacketError::MalformedVarInt | PacketError::UnexpectedEnd => {
                ProbeError::MalformedVarInt
            }
            PacketError::OversizedPacket { length, max } => {
                ProbeError::OversizedPacket { length, max }
            }
            PacketError::NoJsonFound => ProbeError::NoJsonFound,
            PacketError::InvalidJson(e) => ProbeError::InvalidJson(e),
        }
    }
}

impl ProbeError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, ProbeError::Timeout(_))
    }

    /// Short machine-friendly label, used as a log field.
    pub fn kind(&self) -> &'static str {
        match self {
            ProbeError::Connection(_) => "connection",
            ProbeError::Timeout(_) => "timeout",
            ProbeError::MalformedVarInt => "malformed_varint",
            ProbeError::OversizedPacket { .. } => "oversized_packet",
            ProbeError::NoJsonFound => "no_json_found",
            ProbeError::InvalidJson(_) => "invalid_json",
        }
    }
}
