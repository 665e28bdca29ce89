//! Serialization of the status line and header block of a response.

use crate::protocol::{ResponseHead, SendError};

use bytes::{BufMut, BytesMut};

use http::Version;
use std::io;
use std::io::{ErrorKind, Write};
use tokio_util::codec::Encoder;
use tracing::error;

/// Initial buffer size allocated for header serialization
const INIT_HEADER_SIZE: usize = 4 * 1024;

/// Encoder for the head of a response.
///
/// Writes `VERSION SP CODE SP TEXT CRLF`, one `Name: Value CRLF` per header,
/// then the blank line that ends the header block. Header order follows the
/// map's iteration order and is not significant.
#[derive(Debug, Default)]
pub struct HeaderEncoder;

impl Encoder<&ResponseHead> for HeaderEncoder {
    type Error = SendError;

    /// # Errors
    ///
    /// Fails with [`ErrorKind::Unsupported`] for versions other than
    /// HTTP/1.0 and HTTP/1.1.
    fn encode(&mut self, head: &ResponseHead, dst: &mut BytesMut) -> Result<(), Self::Error> {
        dst.reserve(INIT_HEADER_SIZE);

        let version = match head.version() {
            Version::HTTP_11 => "HTTP/1.1",
            Version::HTTP_10 => "HTTP/1.0",
            v => {
                error!(http_version = ?v, "unsupported http version");
                return Err(io::Error::from(ErrorKind::Unsupported).into());
            }
        };

        write!(FastWrite(dst), "{} {} {}\r\n", version, head.status().as_str(), head.status_text())?;

        for (name, value) in head.headers().iter() {
            dst.put_slice(name.as_bytes());
            dst.put_slice(b": ");
            dst.put_slice(value.as_bytes());
            dst.put_slice(b"\r\n");
        }
        dst.put_slice(b"\r\n");
        Ok(())
    }
}

/// Adapts `BytesMut` to `io::Write` so the status line can use `write!`.
struct FastWrite<'a>(&'a mut BytesMut);

impl Write for FastWrite<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.put_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
