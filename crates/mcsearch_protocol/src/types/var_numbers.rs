use crate::packet::{PacketError, PacketResult};
use crate::types::traits::{ProtocolRead, WriteToBytes};
use bytes::{BufMut, BytesMut};
use std::io::{self, Read};

const SEGMENT_BITS: u32 = 0x7F;
const CONTINUE_BIT: u8 = 0x80;

/// Longest wire form of a 32-bit VarInt.
pub const MAX_VARINT_LEN: usize = 5;

/// Variable-length 32-bit integer, 7 bits per byte, least significant group
/// first. Encoding shifts the two's complement bits logically, so negative
/// values always take five bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct VarInt(pub i32);

impl VarInt {
    pub fn len(&self) -> usize {
        let mut value = self.0 as u32;
        let mut size = 1;
        while value & !SEGMENT_BITS != 0 {
            value >>= 7;
            size += 1;
        }
        size
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn to_bytes(&self) -> BytesMut {
        let mut buffer = BytesMut::with_capacity(MAX_VARINT_LEN);
        self.write_to_bytes(&mut buffer);
        buffer
    }

    /// Decodes a VarInt from the start of `bytes`, returning the value and how
    /// many bytes it occupied.
    ///
    /// Fails with [`PacketError::UnexpectedEnd`] when the slice stops before
    /// the terminating byte, and with [`PacketError::MalformedVarInt`] when the
    /// fifth byte still carries the continuation bit.
    pub fn decode(bytes: &[u8]) -> PacketResult<(Self, usize)> {
        let mut value: u32 = 0;

        for (index, byte) in bytes.iter().take(MAX_VARINT_LEN).enumerate() {
            value |= (*byte as u32 & SEGMENT_BITS) << (7 * index);
            if byte & CONTINUE_BIT == 0 {
                return Ok((VarInt(value as i32), index + 1));
            }
        }

        if bytes.len() >= MAX_VARINT_LEN {
            Err(PacketError::MalformedVarInt)
        } else {
            Err(PacketError::UnexpectedEnd)
        }
    }
}

impl From<i32> for VarInt {
    fn from(value: i32) -> Self {
        VarInt(value)
    }
}

impl WriteToBytes for VarInt {
    fn write_to_bytes(&self, bytes: &mut BytesMut) -> usize {
        let mut value = self.0 as u32;
        let mut bytes_written = 0;

        loop {
            bytes_written += 1;
            if value & !SEGMENT_BITS == 0 {
                bytes.put_u8(value as u8);
                return bytes_written;
            }
            bytes.put_u8((value & SEGMENT_BITS) as u8 | CONTINUE_BIT);
            value >>= 7;
        }
    }
}

impl ProtocolRead for VarInt {
    fn read_from<R: Read>(reader: &mut R) -> io::Result<(Self, usize)> {
        let mut value: u32 = 0;

        for index in 0..MAX_VARINT_LEN {
            let mut buf = [0u8; 1];
            reader.read_exact(&mut buf)?;

            value |= (buf[0] as u32 & SEGMENT_BITS) << (7 * index);
            if buf[0] & CONTINUE_BIT == 0 {
                return Ok((VarInt(value as i32), index + 1));
            }
        }

        Err(PacketError::MalformedVarInt.into())
    }
}
