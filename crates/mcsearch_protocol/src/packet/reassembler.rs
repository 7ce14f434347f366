use bytes::BytesMut;
use tracing::trace;

use super::{MAX_PACKET_LENGTH, PacketError, PacketResult};
use crate::types::{MAX_VARINT_LEN, VarInt};

/// Rebuilds length-prefixed frames from chunks of arbitrary size.
///
/// Bytes are accumulated until the leading VarInt length can be decoded and
/// the declared number of bytes has arrived. A frame is returned with its
/// length prefix still attached; anything past it stays buffered for the next
/// frame.
#[derive(Debug)]
pub struct PacketReassembler {
    buffer: BytesMut,
    /// Prefix length plus declared payload length of the frame in progress.
    expected: Option<usize>,
    max_length: usize,
}

impl Default for PacketReassembler {
    fn default() -> Self {
        Self::new()
    }
}

impl PacketReassembler {
    pub fn new() -> Self {
        Self::with_max_length(MAX_PACKET_LENGTH)
    }

    pub fn with_max_length(max_length: usize) -> Self {
        Self {
            buffer: BytesMut::new(),
            expected: None,
            max_length,
        }
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    pub fn buffered_len(&self) -> usize {
        self.buffer.len()
    }

    /// Appends a chunk and returns a frame if one is now complete.
    pub fn push(&mut self, chunk: &[u8]) -> PacketResult<Option<BytesMut>> {
        if !chunk.is_empty() {
            self.buffer.extend_from_slice(chunk);
        }
        self.next_frame()
    }

    /// Returns the next complete frame, or `None` while more bytes are needed.
    pub fn next_frame(&mut self) -> PacketResult<Option<BytesMut>> {
        let expected = match self.expected {
            Some(expected) => expected,
            None => match self.decode_length()? {
                Some(expected) => expected,
                None => return Ok(None),
            },
        };

        if self.buffer.len() < expected {
            trace!(
                buffered = self.buffer.len(),
                expected, "Waiting for the rest of the packet"
            );
            return Ok(None);
        }

        self.expected = None;
        Ok(Some(self.buffer.split_to(expected)))
    }

    fn decode_length(&mut self) -> PacketResult<Option<usize>> {
        let (VarInt(length), prefix_len) = match VarInt::decode(&self.buffer) {
            Ok(decoded) => decoded,
            // Fewer than MAX_VARINT_LEN bytes and no terminator yet
            Err(PacketError::UnexpectedEnd) => {
                debug_assert!(self.buffer.len() < MAX_VARINT_LEN);
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        let length = length as u32 as usize;
        if length > self.max_length {
            return Err(PacketError::OversizedPacket {
                length,
                max: self.max_length,
            });
        }

        let expected = prefix_len + length;
        self.expected = Some(expected);
        Ok(Some(expected))
    }

    /// Drops all buffered bytes and any partially decoded frame.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.expected = None;
    }

    pub fn into_remaining(self) -> BytesMut {
        self.buffer
    }
}
