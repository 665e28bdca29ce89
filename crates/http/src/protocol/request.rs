//! Parsed HTTP requests.
//!
//! A [`RequestHeader`] is what the parser produces from the request line and
//! the header block. Attaching the (optional) body turns it into a
//! [`Request`], which is what handlers receive.

use bytes::Bytes;
use http::Method;

use crate::protocol::headers::names::{CONNECTION, CONTENT_LENGTH};
use crate::protocol::{Headers, ParseError};

/// The request line and header block of one request.
///
/// The target is kept exactly as it appeared on the wire: it is neither
/// percent-decoded nor split into path and query. Method, target and version
/// are never empty; the parser rejects such lines before building a header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestHeader {
    method: Method,
    target: String,
    version: String,
    headers: Headers,
}

impl RequestHeader {
    pub fn new(method: Method, target: impl Into<String>, version: impl Into<String>, headers: Headers) -> Self {
        Self { method, target: target.into(), version: version.into(), headers }
    }

    /// Returns a reference to the request's HTTP method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Returns the raw request target, e.g. `/echo/abc?x=1`.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Returns the version token from the request line, e.g. `HTTP/1.1`.
    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Looks up a single header value by its exact name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    /// True when the client sent `Connection: close`.
    pub fn is_close(&self) -> bool {
        self.headers.get(CONNECTION) == Some("close")
    }

    /// The declared body length, or `None` when no `Content-Length` was sent.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::InvalidContentLength`] when the value is not a
    /// non-negative integer.
    pub fn content_length(&self) -> Result<Option<u64>, ParseError> {
        let Some(value) = self.headers.get(CONTENT_LENGTH) else {
            return Ok(None);
        };

        value
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|_| ParseError::invalid_content_length(format!("value {value} is not u64")))
    }

    /// Attaches a body to this header, converting it into a full [`Request`].
    pub fn body(self, body: Option<Bytes>) -> Request {
        Request { header: self, body }
    }
}

/// A complete request as seen by handlers.
///
/// `body` is `Some` exactly when the request declared a `Content-Length`,
/// so a zero-length upload and a request without a body stay distinguishable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    header: RequestHeader,
    body: Option<Bytes>,
}

impl Request {
    pub fn header(&self) -> &RequestHeader {
        &self.header
    }

    pub fn method(&self) -> &Method {
        self.header.method()
    }

    pub fn target(&self) -> &str {
        self.header.target()
    }

    pub fn headers(&self) -> &Headers {
        self.header.headers()
    }

    pub fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    pub fn into_parts(self) -> (RequestHeader, Option<Bytes>) {
        (self.header, self.body)
    }
}
