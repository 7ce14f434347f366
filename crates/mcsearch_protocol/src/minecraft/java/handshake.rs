use std::io;

use bytes::BytesMut;

use crate::{
    ProtocolRead, WriteToBytes,
    types::{ProtocolString, UnsignedShort, VarInt},
};

pub const SERVERBOUND_HANDSHAKE_ID: i32 = 0x00;

#[derive(Debug, Clone, PartialEq)]
pub struct ServerBoundHandshake {
    pub protocol_version: VarInt,
    pub server_address: ProtocolString,
    pub server_port: UnsignedShort,
    pub next_state: VarInt,
}

impl ServerBoundHandshake {
    pub const STATE_STATUS: i32 = 1;
    pub const STATE_LOGIN: i32 = 2;

    /// Builds a handshake announcing a status query. The address is sent as
    /// given; resolution problems surface when connecting.
    pub fn new(protocol_version: i32, server_address: impl Into<String>, server_port: u16) -> Self {
        Self {
            protocol_version: VarInt(protocol_version),
            server_address: ProtocolString(server_address.into()),
            server_port: UnsignedShort(server_port),
            next_state: VarInt(Self::STATE_STATUS),
        }
    }

    pub fn is_status_request(&self) -> bool {
        self.next_state.0 == Self::STATE_STATUS
    }

    pub fn is_login_request(&self) -> bool {
        self.next_state.0 == Self::STATE_LOGIN
    }

    /// Packet ID followed by the handshake fields, without the length prefix.
    pub fn payload(&self) -> BytesMut {
        let mut payload = BytesMut::with_capacity(self.server_address.0.len() + 16);
        VarInt(SERVERBOUND_HANDSHAKE_ID).write_to_bytes(&mut payload);
        self.protocol_version.write_to_bytes(&mut payload);
        self.server_address.write_to_bytes(&mut payload);
        self.server_port.write_to_bytes(&mut payload);
        self.next_state.write_to_bytes(&mut payload);
        payload
    }

    /// The complete frame, ready to be written to the socket.
    pub fn to_packet_bytes(&self) -> BytesMut {
        let payload = self.payload();
        let mut packet = VarInt(payload.len() as i32).to_bytes();
        packet.extend_from_slice(&payload);
        packet
    }

    /// Decodes the handshake fields from a packet body (after the packet ID).
    pub fn from_payload(data: &[u8]) -> io::Result<Self> {
        let mut reader = data;

        let (protocol_version, _) = VarInt::read_from(&mut reader)?;
        let (server_address, _) = ProtocolString::read_from(&mut reader)?;
        let (server_port, _) = UnsignedShort::read_from(&mut reader)?;
        let (next_state, _) = VarInt::read_from(&mut reader)?;

        Ok(Self {
            protocol_version,
            server_address,
            server_port,
            next_state,
        })
    }
}

pub fn build_handshake(protocol_version: i32, address: &str, port: u16) -> BytesMut {
    ServerBoundHandshake::new(protocol_version, address, port).to_packet_bytes()
}
