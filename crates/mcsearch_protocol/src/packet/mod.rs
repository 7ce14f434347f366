//! Packet framing: length-prefixed frames, their reassembly from a byte
//! stream, and the split of a frame into packet ID and body.

pub mod error;
pub mod reader;
pub mod reassembler;

pub use error::{PacketError, PacketResult};
pub use reader::PacketReader;
pub use reassembler::PacketReassembler;

use bytes::BytesMut;

use crate::types::VarInt;

pub const MAX_PACKET_LENGTH: usize = 2097151; // 2^21 - 1 (3-byte VarInt max)

/// A reassembled packet with its length prefix removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPacket {
    pub id: i32,
    pub data: BytesMut,
}

impl RawPacket {
    /// Splits a complete frame (length prefix included) into ID and body.
    pub fn from_frame(mut frame: BytesMut) -> PacketResult<Self> {
        let (_, prefix_len) = VarInt::decode(&frame)?;
        let _ = frame.split_to(prefix_len);

        let (VarInt(id), id_len) = VarInt::decode(&frame)?;
        let _ = frame.split_to(id_len);

        Ok(Self { id, data: frame })
    }
}
