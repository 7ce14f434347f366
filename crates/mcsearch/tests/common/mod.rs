#![allow(dead_code)]

use std::time::Duration;

use mcsearch_protocol::{PacketReader, ServerBoundHandshake, VarInt};
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::{TcpListener, TcpStream},
};

pub const STATUS_JSON: &str = r#"{"version":{"name":"1.20.4","protocol":765},"players":{"max":5,"online":1,"sample":[{"name":"X","id":"4566e69f-c907-48ee-8d71-d7ba5aa00d20"}]},"description":"Hi"}"#;

/// What a fake server does once it has read the probe's two packets.
#[derive(Clone)]
pub enum Reply {
    /// Send these bytes in one write.
    Bytes(Vec<u8>),
    /// Send these bytes one at a time.
    Trickle(Vec<u8>),
    /// Send these bytes, then close the connection.
    ThenClose(Vec<u8>),
    /// Keep the connection open without answering.
    Silent,
}

/// A complete status response frame around `json`.
pub fn status_frame(json: &str) -> Vec<u8> {
    let mut body = vec![0x00];
    body.extend_from_slice(&VarInt(json.len() as i32).to_bytes());
    body.extend_from_slice(json.as_bytes());

    let mut frame = VarInt(body.len() as i32).to_bytes().to_vec();
    frame.extend_from_slice(&body);
    frame
}

/// A frame whose body is `body` verbatim, packet ID included.
pub fn raw_frame(body: &[u8]) -> Vec<u8> {
    let mut frame = VarInt(body.len() as i32).to_bytes().to_vec();
    frame.extend_from_slice(body);
    frame
}

/// Binds a local listener that answers every connection with `reply`.
pub async fn spawn_server(reply: Reply) -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        while let Ok((socket, _)) = listener.accept().await {
            tokio::spawn(serve(socket, reply.clone()));
        }
    });

    port
}

/// Like [`spawn_server`], but hands the decoded handshake back to the test.
pub async fn spawn_recording_server(
    reply: Reply,
) -> (u16, tokio::sync::oneshot::Receiver<ServerBoundHandshake>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let (tx, rx) = tokio::sync::oneshot::channel();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let handshake = read_requests(&mut socket).await;
        let _ = tx.send(handshake);
        respond(socket, reply).await;
    });

    (port, rx)
}

async fn serve(mut socket: TcpStream, reply: Reply) {
    read_requests(&mut socket).await;
    respond(socket, reply).await;
}

async fn read_requests(socket: &mut TcpStream) -> ServerBoundHandshake {
    let mut reader = PacketReader::new(socket);

    let handshake = reader.read_packet().await.unwrap();
    assert_eq!(handshake.id, 0);
    let handshake = ServerBoundHandshake::from_payload(&handshake.data).unwrap();

    let request = reader.read_packet().await.unwrap();
    assert_eq!(request.id, 0);
    assert!(request.data.is_empty());

    handshake
}

async fn respond(mut socket: TcpStream, reply: Reply) {
    match reply {
        Reply::Bytes(bytes) => {
            let _ = socket.write_all(&bytes).await;
        }
        Reply::Trickle(bytes) => {
            let _ = socket.set_nodelay(true);
            for byte in bytes {
                if socket.write_all(&[byte]).await.is_err() {
                    return;
                }
                let _ = socket.flush().await;
                tokio::task::yield_now().await;
            }
        }
        Reply::ThenClose(bytes) => {
            let _ = socket.write_all(&bytes).await;
            let _ = socket.shutdown().await;
            return;
        }
        Reply::Silent => {
            tokio::time::sleep(Duration::from_secs(30)).await;
            return;
        }
    }

    // Hold the socket until the client hangs up.
    let mut buf = [0u8; 64];
    while let Ok(n) = socket.read(&mut buf).await {
        if n == 0 {
            break;
        }
    }
}

/// A port nothing listens on.
pub async fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}
