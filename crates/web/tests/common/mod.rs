//! Shared utilities for end-to-end tests.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use octo_http::connection::ConnectionConfig;
use octo_web::Server;
use octo_web::endpoint::routes;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// A response as read back off the socket.
#[derive(Debug)]
pub struct RawResponse {
    pub status_line: String,
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }
}

/// Start a server on a free loopback port serving `directory`.
pub async fn start_server(directory: Option<PathBuf>) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();

    let server = Server::builder()
        .router(routes(directory))
        .address(address)
        .connection_config(ConnectionConfig::new().with_read_timeout(Duration::from_millis(500)))
        .build()
        .unwrap();

    tokio::spawn(server.serve(listener));
    address
}

/// A fresh, empty directory under the system temp dir.
pub fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("octo-e2e-{}-{name}", std::process::id()));
    if dir.exists() {
        std::fs::remove_dir_all(&dir).unwrap();
    }
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

/// Turns `indoc!` newlines into wire CRLFs.
pub fn crlf(str: &str) -> String {
    str.replace('\n', "\r\n")
}

/// A client connection that reads responses one at a time.
///
/// Bytes read past the end of a response are kept for the next one.
pub struct Client {
    stream: TcpStream,
    buffered: Vec<u8>,
}

impl Client {
    pub async fn connect(address: SocketAddr) -> Self {
        let stream = TcpStream::connect(address).await.unwrap();
        Self { stream, buffered: Vec::new() }
    }

    pub async fn send(&mut self, request: &[u8]) {
        self.stream.write_all(request).await.unwrap();
    }

    async fn fill(&mut self, what: &str) {
        let mut chunk = [0u8; 1024];
        let read = self.stream.read(&mut chunk).await.unwrap();
        assert!(read > 0, "connection closed before the response {what}");
        self.buffered.extend_from_slice(&chunk[..read]);
    }

    /// Reads exactly one response.
    pub async fn read_response(&mut self) -> RawResponse {
        let header_end = loop {
            if let Some(position) = self.buffered.windows(4).position(|window| window == b"\r\n\r\n") {
                break position;
            }
            self.fill("head").await;
        };

        let head = String::from_utf8(self.buffered[..header_end].to_vec()).unwrap();
        let mut lines = head.split("\r\n");
        let status_line = lines.next().unwrap().to_owned();
        let headers = lines
            .map(|line| {
                let (name, value) = line.split_once(": ").unwrap();
                (name.to_owned(), value.to_owned())
            })
            .collect::<HashMap<_, _>>();

        let length = headers["Content-Length"].parse::<usize>().unwrap();
        let total = header_end + 4 + length;
        while self.buffered.len() < total {
            self.fill("body").await;
        }

        let body = self.buffered.drain(..total).skip(header_end + 4).collect();
        RawResponse { status_line, headers, body }
    }

    /// Asserts the server closed the connection with nothing left to read.
    pub async fn assert_closed(mut self) {
        assert!(self.buffered.is_empty(), "unread response bytes: {:?}", self.buffered);
        let mut rest = Vec::new();
        let read = tokio::time::timeout(Duration::from_secs(2), self.stream.read_to_end(&mut rest)).await;
        assert!(matches!(read, Ok(Ok(0))), "connection still open or sent extra bytes: {read:?} {rest:?}");
    }
}

/// Sends `request` on a new connection and reads one response.
pub async fn exchange(address: SocketAddr, request: &[u8]) -> RawResponse {
    let mut client = Client::connect(address).await;
    client.send(request).await;
    client.read_response().await
}
