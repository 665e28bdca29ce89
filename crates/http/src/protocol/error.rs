use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("request error: {source}")]
    RequestError {
        #[from]
        source: ParseError,
    },

    #[error("response error: {source}")]
    ResponseError {
        #[from]
        source: SendError,
    },
}

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("malformed request line: {reason}")]
    MalformedRequestLine { reason: String },

    #[error("malformed header line: {reason}")]
    MalformedHeader { reason: String },

    #[error("header line too large, current: {current_size} exceed the limit {max_size}")]
    TooLargeHeader { current_size: usize, max_size: usize },

    #[error("header number exceed the limit {max_num}")]
    TooManyHeaders { max_num: usize },

    #[error("missing content-length header")]
    MissingContentLength,

    #[error("invalid content-length header: {reason}")]
    InvalidContentLength { reason: String },

    #[error("stream closed inside the header block")]
    UnexpectedEof,

    #[error("incomplete body, expected {expected} bytes but the stream ended after {received}")]
    IncompleteBody { expected: u64, received: u64 },

    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

impl ParseError {
    pub fn malformed_request_line<S: ToString>(str: S) -> Self {
        Self::MalformedRequestLine { reason: str.to_string() }
    }

    pub fn malformed_header<S: ToString>(str: S) -> Self {
        Self::MalformedHeader { reason: str.to_string() }
    }

    pub fn too_large_header(current_size: usize, max_size: usize) -> Self {
        Self::TooLargeHeader { current_size, max_size }
    }

    pub fn too_many_headers(max_num: usize) -> Self {
        Self::TooManyHeaders { max_num }
    }

    pub fn invalid_content_length<S: ToString>(str: S) -> Self {
        Self::InvalidContentLength { reason: str.to_string() }
    }

    pub fn incomplete_body(expected: u64, received: u64) -> Self {
        Self::IncompleteBody { expected, received }
    }

    pub fn io<E: Into<io::Error>>(e: E) -> Self {
        Self::Io { source: e.into() }
    }

    /// Whether the peer sent bytes that are not a valid request, as opposed to
    /// the stream itself failing. Only these deserve a `400 Bad Request`.
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            Self::MalformedRequestLine { .. }
                | Self::MalformedHeader { .. }
                | Self::TooLargeHeader { .. }
                | Self::TooManyHeaders { .. }
                | Self::InvalidContentLength { .. }
        )
    }
}

#[derive(Error, Debug)]
pub enum SendError {
    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

impl SendError {
    pub fn io<E: Into<io::Error>>(e: E) -> Self {
        Self::Io { source: e.into() }
    }
}
