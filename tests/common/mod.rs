//! A minimal in-process Modbus TCP responder that the integration tests talk
//! to. It answers reads with deterministic data, echoes writes, and counts
//! the connections it has accepted so tests can observe link sharing.

// each test binary uses its own subset of these helpers
#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

pub struct Responder {
    pub addr: SocketAddr,
    connections: Arc<AtomicUsize>,
    disconnections: Arc<AtomicUsize>,
}

impl Responder {
    pub fn endpoint(&self) -> String {
        self.addr.to_string()
    }

    pub fn connections(&self) -> usize {
        self.connections.load(Ordering::SeqCst)
    }

    pub fn disconnections(&self) -> usize {
        self.disconnections.load(Ordering::SeqCst)
    }
}

/// Spawn a responder that serves every accepted connection.
pub async fn spawn_responder() -> Responder {
    spawn(false).await
}

/// Spawn a responder that accepts connections but never replies, for
/// exercising response timeouts.
pub async fn spawn_mute_responder() -> Responder {
    spawn(true).await
}

async fn spawn(mute: bool) -> Responder {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let connections = Arc::new(AtomicUsize::new(0));
    let disconnections = Arc::new(AtomicUsize::new(0));
    let opened = Arc::clone(&connections);
    let closed = Arc::clone(&disconnections);
    tokio::spawn(async move {
        loop {
            let (stream, _) = match listener.accept().await {
                Ok(accepted) => accepted,
                Err(_) => return,
            };
            opened.fetch_add(1, Ordering::SeqCst);
            let closed = Arc::clone(&closed);
            tokio::spawn(async move {
                if mute {
                    swallow(stream).await;
                } else {
                    serve(stream).await;
                }
                closed.fetch_add(1, Ordering::SeqCst);
            });
        }
    });
    Responder {
        addr,
        connections,
        disconnections,
    }
}

async fn swallow(mut stream: TcpStream) {
    let mut sink = [0u8; 512];
    while let Ok(count) = stream.read(&mut sink).await {
        if count == 0 {
            return;
        }
    }
}

async fn serve(mut stream: TcpStream) {
    loop {
        let mut header = [0u8; 7];
        if stream.read_exact(&mut header).await.is_err() {
            return;
        }
        let length = u16::from_be_bytes([header[4], header[5]]) as usize;
        if length < 2 {
            return;
        }
        let mut pdu = vec![0u8; length - 1];
        if stream.read_exact(&mut pdu).await.is_err() {
            return;
        }

        let response = respond(&pdu);
        let mut frame = Vec::with_capacity(7 + response.len());
        frame.extend_from_slice(&header[0..4]); // tx id + protocol id
        frame.extend_from_slice(&((response.len() as u16 + 1).to_be_bytes()));
        frame.push(header[6]); // unit id
        frame.extend_from_slice(&response);
        if stream.write_all(&frame).await.is_err() {
            return;
        }
    }
}

/// Build the response PDU for a request PDU.
fn respond(pdu: &[u8]) -> Vec<u8> {
    let function = pdu[0];
    let body = &pdu[1..];
    match function {
        // reads: declared byte count followed by a recognizable fill
        0x01 | 0x02 => {
            let quantity = u16::from_be_bytes([body[2], body[3]]) as usize;
            let count = (quantity + 7) / 8;
            let mut response = vec![function, count as u8];
            response.resize(2 + count, 0x55);
            response
        }
        0x03 | 0x04 => {
            let quantity = u16::from_be_bytes([body[2], body[3]]) as usize;
            let mut response = vec![function, (2 * quantity) as u8];
            response.resize(2 + 2 * quantity, 0xAB);
            response
        }
        // writes: echo address and quantity/value
        0x05 | 0x06 | 0x0F | 0x10 => {
            let mut response = vec![function];
            response.extend_from_slice(&body[0..4]);
            response
        }
        // mask write: echo the full body
        0x16 => {
            let mut response = vec![function];
            response.extend_from_slice(&body[0..6]);
            response
        }
        _ => vec![function | 0x80, 0x01],
    }
}

/// Poll `check` until it passes or a couple of seconds elapse.
pub async fn eventually(mut check: impl FnMut() -> bool, what: &str) {
    for _ in 0..200 {
        if check() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("timed out waiting for: {what}");
}
