//! A small asynchronous HTTP/1.1 server core
//!
//! This crate reads requests off a byte stream line by line, hands each one to
//! a [`handler::Handler`] and writes the response back, keeping the connection
//! open until the client is done with it. It is built on tokio and knows
//! nothing about routing or the application.
//!
//! # Features
//!
//! - Line-based request parsing with a per-line read deadline
//! - `Content-Length` delimited request bodies
//! - Keep-alive connections, closed on `Connection: close`
//! - `400 Bad Request` for malformed requests, `500` for failing handlers
//!
//! # Example
//!
//! ```no_run
//! use http::StatusCode;
//! use octo_http::connection::HttpConnection;
//! use octo_http::handler::make_handler;
//! use octo_http::protocol::{Request, Response};
//! use std::convert::Infallible;
//! use std::sync::Arc;
//! use tokio::net::TcpListener;
//! use tracing::{error, info, warn};
//!
//! #[tokio::main]
//! async fn main() {
//!     let tcp_listener = match TcpListener::bind("127.0.0.1:4221").await {
//!         Ok(tcp_listener) => tcp_listener,
//!         Err(e) => {
//!             error!(cause = %e, "bind server error");
//!             return;
//!         }
//!     };
//!
//!     let handler = Arc::new(make_handler(hello_world));
//!
//!     loop {
//!         let (tcp_stream, _remote_addr) = match tcp_listener.accept().await {
//!             Ok(stream_and_addr) => stream_and_addr,
//!             Err(e) => {
//!                 warn!(cause = %e, "failed to accept");
//!                 continue;
//!             }
//!         };
//!
//!         let handler = handler.clone();
//!         tokio::spawn(async move {
//!             let (reader, writer) = tcp_stream.into_split();
//!             match HttpConnection::new(reader, writer).process(handler).await {
//!                 Ok(()) => info!("finished process, connection shutdown"),
//!                 Err(e) => error!("service has error, cause {}, connection shutdown", e),
//!             }
//!         });
//!     }
//! }
//!
//! async fn hello_world(request: Request) -> Result<Response, Infallible> {
//!     info!(target = request.target(), "request received");
//!     Ok(Response::new(StatusCode::OK).with_body("Hello World!"))
//! }
//! ```
//!
//! # Architecture
//!
//! - [`codec`]: line, header, body and response codecs over `BytesMut`
//! - [`connection`]: socket reading and writing, and the request loop
//! - [`protocol`]: requests, responses, headers and errors
//! - [`handler`]: the request handler trait
//!
//! # Limitations
//!
//! - HTTP/1.0 and HTTP/1.1 request framing only, no chunked bodies
//! - No TLS support
//! - Maximum line size: 8KB
//! - Maximum number of headers: 64

pub mod codec;
pub mod connection;
pub mod handler;
pub mod protocol;

mod utils;
pub(crate) use utils::ensure;
