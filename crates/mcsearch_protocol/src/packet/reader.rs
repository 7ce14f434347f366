use std::io;

use bytes::BytesMut;
use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::trace;

use super::{PacketError, PacketReassembler, PacketResult, RawPacket};

const READ_CHUNK_SIZE: usize = 8192;

/// Reads whole packets from an async byte stream, however the transport
/// happens to split them.
pub struct PacketReader<R> {
    pub reader: R,
    reassembler: PacketReassembler,
    chunk: BytesMut,
}

impl<R: AsyncRead + Unpin> PacketReader<R> {
    pub fn new(reader: R) -> Self {
        Self::with_reassembler(reader, PacketReassembler::new())
    }

    pub fn with_reassembler(reader: R, reassembler: PacketReassembler) -> Self {
        Self {
            reader,
            reassembler,
            chunk: BytesMut::with_capacity(READ_CHUNK_SIZE),
        }
    }

    /// Reads until one complete frame is available and returns it with its
    /// length prefix. End of stream before that is an `UnexpectedEof` error.
    pub async fn read_frame(&mut self) -> PacketResult<BytesMut> {
        if let Some(frame) = self.reassembler.next_frame()? {
            return Ok(frame);
        }

        loop {
            self.chunk.clear();
            self.chunk.reserve(READ_CHUNK_SIZE);

            let read = self.reader.read_buf(&mut self.chunk).await?;
            if read == 0 {
                return Err(PacketError::Io(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    format!(
                        "Connection closed with {} bytes of an incomplete packet buffered",
                        self.reassembler.buffered_len()
                    ),
                )));
            }

            trace!(read, "Received chunk");
            if let Some(frame) = self.reassembler.push(&self.chunk)? {
                return Ok(frame);
            }
        }
    }

    pub async fn read_packet(&mut self) -> PacketResult<RawPacket> {
        let frame = self.read_frame().await?;
        RawPacket::from_frame(frame)
    }

    pub fn get_ref(&self) -> &R {
        &self.reader
    }

    pub fn get_mut(&mut self) -> &mut R {
        &mut self.reader
    }

    pub fn into_inner(self) -> R {
        self.reader
    }
}
