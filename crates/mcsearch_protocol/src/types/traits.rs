use bytes::BytesMut;
use std::io::{self, Read};

/// Types that can be decoded from a blocking reader, returning the number of
/// bytes consumed alongside the value.
pub trait ProtocolRead: Sized {
    fn read_from<R: Read>(reader: &mut R) -> io::Result<(Self, usize)>;
}

/// Types that can append their wire form to a packet buffer.
pub trait WriteToBytes {
    fn write_to_bytes(&self, bytes: &mut BytesMut) -> usize;
}
