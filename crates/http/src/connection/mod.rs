//! Connection handling
//!
//! - [`WireReader`]: buffered line and body reads over the socket, with a
//!   per-line read deadline
//! - [`RequestReader`]: request line, headers and body on top of it
//! - [`ResponseWriter`]: encodes and flushes one response at a time
//! - [`HttpConnection`]: the keep-alive request loop tying them together

mod http_connection;
mod request_reader;
mod response_writer;
mod wire_reader;

pub use http_connection::{ConnectionConfig, DEFAULT_READ_TIMEOUT, HttpConnection};
pub use request_reader::RequestReader;
pub use response_writer::ResponseWriter;
pub use wire_reader::{LineItem, WireReader};
