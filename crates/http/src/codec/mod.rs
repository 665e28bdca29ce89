//! Wire encoding and decoding
//!
//! The codec types are plain [`tokio_util::codec`] implementations that work
//! on a `BytesMut` buffer; they never touch the socket themselves. The
//! connection layer owns the buffers and drives them.
//!
//! - Request side:
//!   - [`LineDecoder`]: cuts CRLF-terminated lines out of the read buffer
//!   - [`header`]: turns the request line and header lines into typed values
//!   - [`LengthDecoder`]: consumes a `Content-Length` delimited body
//!
//! - Response side:
//!   - [`ResponseEncoder`]: status line, headers and body in a single buffer
//!
//! # Example
//!
//! ```
//! use bytes::BytesMut;
//! use octo_http::codec::{LineDecoder, header};
//! use tokio_util::codec::Decoder;
//!
//! let mut buffer = BytesMut::from(&b"GET /echo/abc HTTP/1.1\r\n"[..]);
//! let line = LineDecoder::new().decode(&mut buffer).unwrap().unwrap();
//! let request_line = header::decode_request_line(&line).unwrap();
//! assert_eq!(request_line.target, "/echo/abc");
//! ```

mod body;
pub mod header;
mod line_decoder;
mod response_encoder;

pub use body::LengthDecoder;
pub use line_decoder::LineDecoder;
pub use line_decoder::MAX_LINE_BYTES;
pub use response_encoder::ResponseEncoder;
