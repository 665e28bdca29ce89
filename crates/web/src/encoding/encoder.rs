use crate::encoding::Writer;
use bytes::Bytes;
use flate2::Compression;
use flate2::write::GzEncoder;
use std::io;
use std::io::Write;
use tracing::trace;

/// Content encodings the server can apply to a response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentEncoding {
    Gzip,
}

impl ContentEncoding {
    /// Selects an encoding from an `Accept-Encoding` header value.
    ///
    /// The value is split on commas and every token trimmed; only an exact
    /// `gzip` token selects gzip. Quality values are not interpreted, so
    /// `gzip;q=0.5` does not match.
    pub fn select(accept_encodings: &str) -> Option<Self> {
        accept_encodings.split(',').map(str::trim).any(|token| token == "gzip").then_some(Self::Gzip)
    }

    /// Returns the name of the encoding, as written in `Content-Encoding`.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Gzip => "gzip",
        }
    }

    /// Compresses `data` in one pass.
    ///
    /// # Errors
    ///
    /// Any error raised by the compressor.
    pub fn encode(&self, data: &[u8]) -> Result<Bytes, io::Error> {
        match self {
            Self::Gzip => {
                let mut encoder = GzEncoder::new(Writer::new(), Compression::default());
                encoder.write_all(data).inspect_err(|e| trace!("Error encoding gzip encoding: {}", e))?;
                let mut writer = encoder.finish()?;
                Ok(writer.take())
            }
        }
    }
}

/// Whether a client sending `accept_encodings` accepts a gzip body
pub fn supports(accept_encodings: &str) -> bool {
    ContentEncoding::select(accept_encodings).is_some()
}

/// Gzip-compresses `data`.
///
/// # Errors
///
/// Any error raised by the compressor.
pub fn compress(data: &[u8]) -> Result<Bytes, io::Error> {
    ContentEncoding::Gzip.encode(data)
}
