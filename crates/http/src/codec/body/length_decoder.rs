//! Decoder for request bodies delimited by `Content-Length`.

use std::cmp;

use crate::protocol::{ParseError, PayloadItem};
use bytes::BytesMut;
use tokio_util::codec::Decoder;

/// Hands out at most `remaining` bytes from the read buffer.
///
/// Anything past the declared length stays in the buffer: on a keep-alive
/// connection those bytes belong to the next request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LengthDecoder {
    remaining: u64,
}

impl LengthDecoder {
    pub fn new(length: u64) -> Self {
        Self { remaining: length }
    }

    /// Bytes still expected before the body is complete.
    pub fn remaining(&self) -> u64 {
        self.remaining
    }
}

impl Decoder for LengthDecoder {
    type Item = PayloadItem;
    type Error = ParseError;

    /// # Returns
    /// * `Ok(Some(PayloadItem::Eof))` once the declared length has been consumed
    /// * `Ok(Some(PayloadItem::Chunk(bytes)))` for the bytes available so far
    /// * `Ok(None)` when the buffer is empty and more data is needed
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if self.remaining == 0 {
            return Ok(Some(PayloadItem::Eof));
        }

        if src.is_empty() {
            return Ok(None);
        }

        #[allow(clippy::cast_possible_truncation, reason = "bounded by src.len()")]
        let len = cmp::min(self.remaining, src.len() as u64) as usize;
        let bytes = src.split_to(len).freeze();

        self.remaining -= len as u64;
        Ok(Some(PayloadItem::Chunk(bytes)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stops_at_declared_length() {
        let mut buffer = BytesMut::from(&b"helloGET / HTTP/1.1\r\n"[..]);
        let mut decoder = LengthDecoder::new(5);

        let item = decoder.decode(&mut buffer).unwrap().unwrap();
        assert!(item.is_chunk());
        assert_eq!(&item.as_bytes().unwrap()[..], b"hello");

        assert!(decoder.decode(&mut buffer).unwrap().unwrap().is_eof());
        assert_eq!(&buffer[..], b"GET / HTTP/1.1\r\n");
    }

    #[test]
    fn body_in_pieces() {
        let mut decoder = LengthDecoder::new(8);

        let mut buffer = BytesMut::from(&b"abc"[..]);
        assert_eq!(&decoder.decode(&mut buffer).unwrap().unwrap().as_bytes().unwrap()[..], b"abc");
        assert_eq!(decoder.remaining(), 5);
        assert!(decoder.decode(&mut buffer).unwrap().is_none());

        buffer.extend_from_slice(b"defgh");
        assert_eq!(&decoder.decode(&mut buffer).unwrap().unwrap().as_bytes().unwrap()[..], b"defgh");
        assert!(decoder.decode(&mut buffer).unwrap().unwrap().is_eof());
    }

    #[test]
    fn zero_length() {
        let mut buffer = BytesMut::new();
        let mut decoder = LengthDecoder::new(0);

        assert!(decoder.decode(&mut buffer).unwrap().unwrap().is_eof());
    }
}
