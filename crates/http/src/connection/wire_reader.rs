use std::time::Duration;

use bytes::{Bytes, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::time::{Instant, timeout_at};
use tokio_util::codec::Decoder;
use tracing::trace;

use crate::codec::{LengthDecoder, LineDecoder};
use crate::protocol::{ParseError, PayloadItem};

/// Reserve this much free space before every socket read
const READ_RESERVE: usize = 4 * 1024;

/// The outcome of one [`WireReader::read_line`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineItem {
    /// A complete line, terminator removed
    Line(Bytes),
    /// The read deadline elapsed; holds whatever arrived before it, possibly nothing
    Expired(Bytes),
    /// The stream ended and nothing is buffered
    Eof,
}

/// Buffered reader over the read half of a connection.
///
/// Lines are read under a deadline: if it fires before a CRLF shows up, the
/// bytes received so far are returned as [`LineItem::Expired`] and callers
/// treat them like a complete line. Bodies are read without a deadline and
/// always to their full declared length.
#[derive(Debug)]
pub struct WireReader<R> {
    reader: R,
    buffer: BytesMut,
    line_decoder: LineDecoder,
    read_timeout: Duration,
    eof: bool,
}

impl<R> WireReader<R> {
    pub fn new(reader: R, read_timeout: Duration) -> Self {
        Self::with_capacity(reader, read_timeout, 8 * 1024)
    }

    pub fn with_capacity(reader: R, read_timeout: Duration, capacity: usize) -> Self {
        Self { reader, buffer: BytesMut::with_capacity(capacity), line_decoder: LineDecoder::new(), read_timeout, eof: false }
    }
}

impl<R> WireReader<R>
where
    R: AsyncRead + Unpin,
{
    /// Reads the next CRLF-terminated line.
    ///
    /// # Errors
    ///
    /// Fails on socket errors, or when the pending line grows past the
    /// header size limit.
    pub async fn read_line(&mut self) -> Result<LineItem, ParseError> {
        if let Some(line) = self.line_decoder.decode(&mut self.buffer)? {
            return Ok(LineItem::Line(line));
        }

        if self.eof {
            return self.line_at_eof();
        }

        let deadline = Instant::now() + self.read_timeout;
        loop {
            self.buffer.reserve(READ_RESERVE);
            match timeout_at(deadline, self.reader.read_buf(&mut self.buffer)).await {
                Err(_elapsed) => {
                    self.line_decoder.reset();
                    let partial = self.buffer.split().freeze();
                    trace!(partial_size = partial.len(), timeout = ?self.read_timeout, "line read deadline elapsed");
                    return Ok(LineItem::Expired(partial));
                }
                Ok(Err(e)) => return Err(ParseError::io(e)),
                Ok(Ok(0)) => {
                    self.eof = true;
                    return self.line_at_eof();
                }
                Ok(Ok(_)) => {
                    if let Some(line) = self.line_decoder.decode(&mut self.buffer)? {
                        return Ok(LineItem::Line(line));
                    }
                }
            }
        }
    }

    /// Reads exactly `length` bytes, looping over as many socket reads as needed.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::IncompleteBody`] when the stream ends first.
    pub async fn read_exact_bytes(&mut self, length: u64) -> Result<Bytes, ParseError> {
        let mut decoder = LengthDecoder::new(length);
        let mut body = BytesMut::new();
        self.line_decoder.reset();

        loop {
            match decoder.decode(&mut self.buffer)? {
                Some(PayloadItem::Eof) => return Ok(body.freeze()),
                Some(PayloadItem::Chunk(bytes)) => {
                    if body.is_empty() && decoder.remaining() == 0 {
                        // the whole body was already buffered, no copy needed
                        return Ok(bytes);
                    }
                    body.extend_from_slice(&bytes);
                }
                None => {
                    let read = if self.eof {
                        0
                    } else {
                        self.buffer.reserve(READ_RESERVE);
                        self.reader.read_buf(&mut self.buffer).await.map_err(ParseError::io)?
                    };

                    if read == 0 {
                        self.eof = true;
                        return Err(ParseError::incomplete_body(length, length - decoder.remaining()));
                    }
                }
            }
        }
    }

    fn line_at_eof(&mut self) -> Result<LineItem, ParseError> {
        match self.line_decoder.decode_eof(&mut self.buffer)? {
            Some(line) => Ok(LineItem::Line(line)),
            None => Ok(LineItem::Eof),
        }
    }
}
