//! Minecraft status protocol implementation for mc-search
//!
//! This crate covers the handshake/status subset of the Java Edition protocol:
//! the VarInt codec, the two serverbound packets a status probe sends, the
//! reassembly of the clientbound response and the decoding of its JSON body.

pub mod minecraft;
pub mod packet;
pub mod types;
pub mod version;

// Re-export the most commonly used types
pub use minecraft::java::handshake::{ServerBoundHandshake, build_handshake};
pub use minecraft::java::status::clientbound_response::{
    ComponentObject, PlayerSample, Players, StatusResponse, TextComponent, VersionInfo,
};
pub use minecraft::java::status::serverbound_request::build_status_request;
pub use packet::{
    MAX_PACKET_LENGTH, PacketError, PacketReader, PacketReassembler, PacketResult, RawPacket,
};
pub use types::{ProtocolRead, VarInt, WriteToBytes};
pub use version::Version;
