//! One status exchange with one server.
//!
//! A [`ProbeSession`] owns its socket from connect to close. Every exit path
//! (success, error, timeout, or the caller dropping the future) drops the
//! stream and the reassembly buffer with it.

use std::time::Duration;

use mcsearch_protocol::{
    MAX_PACKET_LENGTH, PacketReader, PacketReassembler, StatusResponse, Version, build_handshake,
    build_status_request,
    minecraft::java::status::clientbound_response::CLIENTBOUND_RESPONSE_ID,
};
use tokio::{io::AsyncWriteExt, net::TcpStream};
use tracing::{debug, instrument};

use crate::{error::ProbeError, render::render_full};

pub const DEFAULT_PORT: u16 = 25565;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOptions {
    pub protocol_version: Version,
    /// Bound on the whole exchange, connect included.
    pub timeout: Duration,
    pub max_packet_length: usize,
}

impl Default for ProbeOptions {
    fn default() -> Self {
        Self {
            protocol_version: Version::DEFAULT,
            timeout: DEFAULT_TIMEOUT,
            max_packet_length: MAX_PACKET_LENGTH,
        }
    }
}

impl ProbeOptions {
    pub fn with_protocol_version(mut self, version: impl Into<Version>) -> Self {
        self.protocol_version = version.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_packet_length(mut self, max: usize) -> Self {
        self.max_packet_length = max;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Connecting,
    HandshakeSent,
    StatusRequested,
    Receiving,
    Complete,
    Failed,
}

impl SessionState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionState::Complete | SessionState::Failed)
    }
}

#[derive(Debug)]
pub struct ProbeSession {
    host: String,
    port: u16,
    options: ProbeOptions,
    state: SessionState,
}

impl ProbeSession {
    pub fn new(host: impl Into<String>, port: u16, options: ProbeOptions) -> Self {
        Self {
            host: host.into(),
            port,
            options,
            state: SessionState::Idle,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    fn transition(&mut self, next: SessionState) {
        debug!(from = ?self.state, to = ?next, "Probe state change");
        self.state = next;
    }

    /// Runs the exchange and returns the decoded status.
    #[instrument(name = "probe", skip(self), fields(
        host = %self.host,
        port = self.port,
        protocol = self.options.protocol_version.protocol_number()
    ))]
    pub async fn fetch_status(mut self) -> Result<StatusResponse, ProbeError> {
        let timeout = self.options.timeout;

        let result = match tokio::time::timeout(timeout, self.exchange()).await {
            Ok(result) => result,
            Err(_) => Err(ProbeError::Timeout(timeout)),
        };

        if let Err(e) = &result {
            debug!(error_kind = e.kind(), "Probe failed: {}", e);
            self.transition(SessionState::Failed);
        }

        result
    }

    /// Runs the exchange and renders the result for display.
    pub async fn probe(self) -> Result<String, ProbeError> {
        let host = self.host.clone();
        let port = self.port;
        let status = self.fetch_status().await?;
        Ok(render_full(&status, &host, port))
    }

    async fn exchange(&mut self) -> Result<StatusResponse, ProbeError> {
        self.transition(SessionState::Connecting);
        let mut stream = TcpStream::connect((self.host.as_str(), self.port)).await?;
        stream.set_nodelay(true)?;

        let handshake = build_handshake(
            self.options.protocol_version.protocol_number(),
            &self.host,
            self.port,
        );
        stream.write_all(&handshake).await?;
        self.transition(SessionState::HandshakeSent);

        stream.write_all(&build_status_request()).await?;
        stream.flush().await?;
        self.transition(SessionState::StatusRequested);

        let mut reader = PacketReader::with_reassembler(
            &mut stream,
            PacketReassembler::with_max_length(self.options.max_packet_length),
        );
        self.transition(SessionState::Receiving);
        let packet = reader.read_packet().await?;
        drop(reader);

        if packet.id != CLIENTBOUND_RESPONSE_ID {
            debug!(packet_id = packet.id, "Unexpected packet ID for status response");
        }
        let status = StatusResponse::from_body(&packet.data)?;

        if let Err(e) = stream.shutdown().await {
            debug!("Error closing connection after status response: {}", e);
        }
        self.transition(SessionState::Complete);

        Ok(status)
    }
}

/// Probes `host:port` with default options and renders the result.
pub async fn probe(host: &str, port: u16) -> Result<String, ProbeError> {
    probe_with(host, port, &ProbeOptions::default()).await
}

pub async fn probe_with(
    host: &str,
    port: u16,
    options: &ProbeOptions,
) -> Result<String, ProbeError> {
    ProbeSession::new(host, port, options.clone()).probe().await
}

pub async fn fetch_status(
    host: &str,
    port: u16,
    options: &ProbeOptions,
) -> Result<StatusResponse, ProbeError> {
    ProbeSession::new(host, port, options.clone())
        .fetch_status()
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = ProbeOptions::default();
        assert_eq!(options.protocol_version.protocol_number(), 765);
        assert_eq!(options.timeout, Duration::from_secs(5));
        assert_eq!(options.max_packet_length, MAX_PACKET_LENGTH);
    }

    #[test]
    fn test_options_builders() {
        let options = ProbeOptions::default()
            .with_protocol_version(47)
            .with_timeout(Duration::from_millis(250))
            .with_max_packet_length(1024);
        assert_eq!(options.protocol_version, Version::new(47));
        assert_eq!(options.timeout, Duration::from_millis(250));
        assert_eq!(options.max_packet_length, 1024);
    }

    #[test]
    fn test_new_session_is_idle() {
        let session = ProbeSession::new("localhost", DEFAULT_PORT, ProbeOptions::default());
        assert_eq!(session.state(), SessionState::Idle);
        assert!(!session.state().is_terminal());
        assert!(SessionState::Failed.is_terminal());
    }

    #[tokio::test]
    async fn test_refused_connection() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let err = probe("127.0.0.1", port).await.unwrap_err();
        assert!(matches!(err, ProbeError::Connection(_)), "got {err:?}");
    }
}
