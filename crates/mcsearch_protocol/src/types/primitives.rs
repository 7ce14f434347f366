use crate::types::{
    traits::{ProtocolRead, WriteToBytes},
    var_numbers::VarInt,
};
use bytes::{BufMut, BytesMut};
use std::io::{self, Read};

/// Strings longer than this many UTF-16 units are rejected by vanilla servers.
const MAX_STRING_CHARS: usize = 32767;

/// UTF-8 string prefixed with its byte length as a VarInt.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProtocolString(pub String);

impl WriteToBytes for ProtocolString {
    fn write_to_bytes(&self, bytes: &mut BytesMut) -> usize {
        let raw = self.0.as_bytes();
        let prefix = VarInt(raw.len() as i32).write_to_bytes(bytes);
        bytes.put_slice(raw);
        prefix + raw.len()
    }
}

impl ProtocolRead for ProtocolString {
    fn read_from<R: Read>(reader: &mut R) -> io::Result<(Self, usize)> {
        let (VarInt(length), prefix) = VarInt::read_from(reader)?;
        if length < 0 || length as usize > MAX_STRING_CHARS * 4 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Invalid string length: {length}"),
            ));
        }

        let mut buf = vec![0u8; length as usize];
        reader.read_exact(&mut buf)?;
        let value = String::from_utf8(buf)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        Ok((ProtocolString(value), prefix + length as usize))
    }
}

/// Big-endian `u16`, used for the port field of the handshake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UnsignedShort(pub u16);

impl WriteToBytes for UnsignedShort {
    fn write_to_bytes(&self, bytes: &mut BytesMut) -> usize {
        bytes.put_u16(self.0);
        2
    }
}

impl ProtocolRead for UnsignedShort {
    fn read_from<R: Read>(reader: &mut R) -> io::Result<(Self, usize)> {
        let mut buf = [0u8; 2];
        reader.read_exact(&mut buf)?;
        Ok((UnsignedShort(u16::from_be_bytes(buf)), 2))
    }
}
