//! Shared utilities for integration tests.
#![allow(dead_code)]

use std::net::SocketAddr;
use std::time::Duration;
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

use player_server::config::ServerConfig;
use player_server::net::Listener;
use player_server::store::{MemoryStore, RecordStore};
use player_server::{HttpServer, Shutdown};

pub const INDEX_HTML: &str = "<!DOCTYPE html>\n<html><body><h1>Players ✓</h1></body></html>\n";
pub const MAX_HEAD_BYTES: usize = 512;
pub const MAX_BODY_BYTES: usize = 1024;

/// A server running on an ephemeral loopback port.
pub struct TestServer {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    pub handle: JoinHandle<Result<(), std::io::Error>>,
    _dir: TempDir,
}

pub async fn start_server() -> TestServer {
    start_with_store(Box::new(MemoryStore::new())).await
}

pub async fn start_with_store(store: Box<dyn RecordStore>) -> TestServer {
    let dir = tempfile::tempdir().unwrap();
    let index_path = dir.path().join("index.html");
    std::fs::write(&index_path, INDEX_HTML).unwrap();

    let mut config = ServerConfig::default();
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config.static_files.index_path = index_path;
    config.limits.max_head_bytes = MAX_HEAD_BYTES;
    config.limits.max_body_bytes = MAX_BODY_BYTES;

    // Bound before spawning, so connects cannot race the accept loop.
    let listener = Listener::from_tokio(TcpListener::bind("127.0.0.1:0").await.unwrap());
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, store);
    let handle = tokio::spawn(server.run(listener, shutdown.subscribe()));

    TestServer {
        addr,
        shutdown,
        handle,
        _dir: dir,
    }
}

impl TestServer {
    /// Signal shutdown and wait for the loop to exit.
    pub async fn stop(self) {
        self.shutdown.trigger();
        tokio::time::timeout(Duration::from_secs(5), self.handle)
            .await
            .expect("server did not stop")
            .unwrap()
            .unwrap();
    }
}

/// Send raw bytes, half-close, and collect everything the server writes.
pub async fn send_raw(addr: SocketAddr, raw: &[u8]) -> Vec<u8> {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(raw).await.unwrap();
    stream.shutdown().await.unwrap();

    let mut out = Vec::new();
    tokio::time::timeout(Duration::from_secs(5), stream.read_to_end(&mut out))
        .await
        .expect("server did not close the connection")
        .unwrap();
    out
}

/// A response as read off the wire.
#[derive(Debug)]
pub struct WireResponse {
    pub status_line: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl WireResponse {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn body_text(&self) -> String {
        String::from_utf8(self.body.clone()).unwrap()
    }
}

/// Split raw bytes into status line, headers and body.
///
/// Checks that Content-Length matches the body that followed it.
pub fn parse_response(raw: &[u8]) -> WireResponse {
    let split = raw
        .windows(4)
        .position(|w| w == b"\r\n\r\n")
        .expect("no header terminator");
    let head = std::str::from_utf8(&raw[..split]).unwrap();
    let body = raw[split + 4..].to_vec();

    let mut lines = head.split("\r\n");
    let status_line = lines.next().unwrap().to_string();
    let headers: Vec<(String, String)> = lines
        .map(|line| {
            let (name, value) = line.split_once(": ").unwrap();
            (name.to_string(), value.to_string())
        })
        .collect();

    let response = WireResponse {
        status_line,
        headers,
        body,
    };
    let declared: usize = response.header("Content-Length").unwrap().parse().unwrap();
    assert_eq!(declared, response.body.len(), "Content-Length mismatch");
    response
}

pub async fn request(addr: SocketAddr, raw: &str) -> WireResponse {
    parse_response(&send_raw(addr, raw.as_bytes()).await)
}

pub async fn get(addr: SocketAddr, path: &str) -> WireResponse {
    request(addr, &format!("GET {} HTTP/1.1\r\nHost: localhost\r\n\r\n", path)).await
}

pub async fn post_form(addr: SocketAddr, path: &str, body: &str) -> WireResponse {
    request(
        addr,
        &format!(
            "POST {} HTTP/1.1\r\nHost: localhost\r\nContent-Type: application/x-www-form-urlencoded\r\nContent-Length: {}\r\n\r\n{}",
            path,
            body.len(),
            body
        ),
    )
    .await
}
