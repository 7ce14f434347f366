use bytes::BytesMut;

use crate::{WriteToBytes, types::VarInt};

pub const SERVERBOUND_REQUEST_ID: i32 = 0x00;

/// The status request has no fields: a length of one and the packet ID.
pub fn build_status_request() -> BytesMut {
    let mut packet = BytesMut::with_capacity(2);
    VarInt(1).write_to_bytes(&mut packet);
    VarInt(SERVERBOUND_REQUEST_ID).write_to_bytes(&mut packet);
    packet
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_request_bytes() {
        assert_eq!(&build_status_request()[..], &[0x01, 0x00]);
    }
}
