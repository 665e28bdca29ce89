//! Request parsing on top of [`WireReader`].
//!
//! A request is read in two steps. [`RequestReader::parse_request`] consumes
//! the request line and the header block. The body, if any, is read
//! afterwards with [`RequestReader::read_body`], driven by `Content-Length`.

use std::time::Duration;

use bytes::Bytes;
use tokio::io::AsyncRead;
use tracing::{debug, trace};

use crate::codec::header::{MAX_HEADER_NUM, RequestLine, decode_header_line, decode_request_line};
use crate::connection::wire_reader::{LineItem, WireReader};
use crate::ensure;
use crate::protocol::{Headers, ParseError, RequestHeader};

#[derive(Debug)]
pub struct RequestReader<R> {
    wire: WireReader<R>,
}

impl<R> RequestReader<R>
where
    R: AsyncRead + Unpin,
{
    pub fn new(reader: R, read_timeout: Duration) -> Self {
        Self { wire: WireReader::new(reader, read_timeout) }
    }

    /// Reads the request line and headers of the next request.
    ///
    /// Returns `Ok(None)` when the client is done: the stream ended, or the
    /// read deadline passed without a single byte of a new request.
    ///
    /// # Errors
    ///
    /// Any malformed line, an oversized header block, a stream that ends in
    /// the middle of the headers, or a socket error.
    pub async fn parse_request(&mut self) -> Result<Option<RequestHeader>, ParseError> {
        let Some(RequestLine { method, target, version }) = self.parse_request_line().await? else {
            return Ok(None);
        };

        let headers = self.parse_headers().await?;
        Ok(Some(RequestHeader::new(method, target, version, headers)))
    }

    /// Reads and splits the request line.
    ///
    /// # Errors
    ///
    /// [`ParseError::MalformedRequestLine`] unless the line has exactly three
    /// non-empty space-separated tokens.
    pub async fn parse_request_line(&mut self) -> Result<Option<RequestLine>, ParseError> {
        let line = match self.wire.read_line().await? {
            LineItem::Line(line) => line,
            LineItem::Expired(line) if line.is_empty() => {
                debug!("no request arrived before the read deadline");
                return Ok(None);
            }
            LineItem::Expired(line) => line,
            LineItem::Eof => return Ok(None),
        };

        decode_request_line(&line).map(Some)
    }

    /// Reads header lines up to and including the blank line.
    ///
    /// A line cut short by the read deadline is used as it is; an empty one
    /// therefore ends the header block.
    ///
    /// # Errors
    ///
    /// [`ParseError::MalformedHeader`] for a line without a colon,
    /// [`ParseError::TooManyHeaders`] past the header limit and
    /// [`ParseError::UnexpectedEof`] when the stream ends first.
    pub async fn parse_headers(&mut self) -> Result<Headers, ParseError> {
        let mut headers = Headers::new();
        let mut count = 0;

        loop {
            let line = match self.wire.read_line().await? {
                LineItem::Line(line) => line,
                LineItem::Expired(line) => {
                    trace!(size = line.len(), "header line cut by read deadline");
                    line
                }
                LineItem::Eof => return Err(ParseError::UnexpectedEof),
            };

            if line.is_empty() {
                return Ok(headers);
            }

            count += 1;
            ensure!(count <= MAX_HEADER_NUM, ParseError::too_many_headers(MAX_HEADER_NUM));

            let (name, value) = decode_header_line(&line)?;
            headers.insert(name, value);
        }
    }

    /// Reads the body declared by `header`'s `Content-Length`.
    ///
    /// # Errors
    ///
    /// [`ParseError::MissingContentLength`] when the header is absent,
    /// [`ParseError::InvalidContentLength`] when it is not a number and
    /// [`ParseError::IncompleteBody`] when the stream ends early.
    pub async fn read_body(&mut self, header: &RequestHeader) -> Result<Bytes, ParseError> {
        let length = header.content_length()?.ok_or(ParseError::MissingContentLength)?;
        trace!(length, "reading request body");
        self.wire.read_exact_bytes(length).await
    }
}
