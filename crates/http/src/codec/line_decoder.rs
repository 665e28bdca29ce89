//! CRLF line framing.
//!
//! Every protocol element before the body is a line: the request line and
//! each header line end with `\r\n`, and a bare `\r\n` ends the header block.
//! [`LineDecoder`] cuts such lines out of a growing read buffer.

use bytes::{Bytes, BytesMut};
use tokio_util::codec::Decoder;

use crate::ensure;
use crate::protocol::ParseError;

const CRLF: &[u8] = b"\r\n";

/// Maximum size in bytes of a single line, terminator excluded
pub const MAX_LINE_BYTES: usize = 8 * 1024;

/// Decodes CRLF-terminated lines, yielding them without the terminator.
///
/// A lone `\n` is not a terminator; it stays part of the line. The decoder
/// remembers how far it already scanned, so feeding a line in many small
/// reads does not rescan the whole buffer each time.
#[derive(Debug, Clone)]
pub struct LineDecoder {
    max_line_bytes: usize,
    scanned: usize,
}

impl LineDecoder {
    pub fn new() -> Self {
        Self::with_max_line_bytes(MAX_LINE_BYTES)
    }

    pub fn with_max_line_bytes(max_line_bytes: usize) -> Self {
        Self { max_line_bytes, scanned: 0 }
    }

    /// Forgets scan progress. Call this whenever the buffer was drained by
    /// someone other than the decoder.
    pub fn reset(&mut self) {
        self.scanned = 0;
    }
}

impl Default for LineDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for LineDecoder {
    type Item = Bytes;
    type Error = ParseError;

    /// # Returns
    ///
    /// - `Ok(Some(line))`: a complete line, with the CRLF consumed from `src`
    /// - `Ok(None)`: no terminator yet, more data is needed
    /// - `Err(_)`: the pending line already exceeds the size limit
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        // step back one byte: the CR of a CRLF may have been the last byte scanned
        let start = self.scanned.min(src.len()).saturating_sub(1);

        match src[start..].windows(CRLF.len()).position(|window| window == CRLF) {
            Some(offset) => {
                let end = start + offset;
                ensure!(end <= self.max_line_bytes, ParseError::too_large_header(end, self.max_line_bytes));

                let mut line = src.split_to(end + CRLF.len());
                line.truncate(end);
                self.scanned = 0;
                Ok(Some(line.freeze()))
            }
            None => {
                // a full-size line may be pending with only its CR received
                ensure!(src.len() <= self.max_line_bytes + 1, ParseError::too_large_header(src.len(), self.max_line_bytes));
                self.scanned = src.len();
                Ok(None)
            }
        }
    }

    /// At end of stream any unterminated remainder is handed out as a final line.
    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if let Some(line) = self.decode(src)? {
            return Ok(Some(line));
        }

        self.scanned = 0;
        if src.is_empty() { Ok(None) } else { Ok(Some(src.split().freeze())) }
    }
}
