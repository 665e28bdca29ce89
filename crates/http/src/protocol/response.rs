//! HTTP responses built by handlers and consumed once by the response writer.

use bytes::Bytes;
use http::{StatusCode, Version};

use crate::protocol::Headers;

/// Status line and headers of a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseHead {
    version: Version,
    status: StatusCode,
    headers: Headers,
}

impl ResponseHead {
    pub fn new(status: StatusCode) -> Self {
        Self { version: Version::HTTP_11, status, headers: Headers::new() }
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// The reason phrase written after the status code.
    pub fn status_text(&self) -> &'static str {
        status_text(self.status)
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut Headers {
        &mut self.headers
    }
}

/// A response: head plus an optional body.
///
/// A missing body and an empty body are different values, although both are
/// written without any payload bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    head: ResponseHead,
    body: Option<Bytes>,
}

impl Response {
    pub fn new(status: StatusCode) -> Self {
        Self { head: ResponseHead::new(status), body: None }
    }

    pub fn with_version(mut self, version: Version) -> Self {
        self.head.version = version;
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.head.headers.insert(name, value);
        self
    }

    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn head(&self) -> &ResponseHead {
        &self.head
    }

    pub fn status(&self) -> StatusCode {
        self.head.status
    }

    pub fn headers(&self) -> &Headers {
        &self.head.headers
    }

    pub fn headers_mut(&mut self) -> &mut Headers {
        &mut self.head.headers
    }

    pub fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    pub fn into_parts(self) -> (ResponseHead, Option<Bytes>) {
        (self.head, self.body)
    }
}

/// Maps a status code to the reason phrase this server writes.
///
/// Only the codes the server produces have a phrase; everything else is
/// written as `Unknown`.
pub fn status_text(status: StatusCode) -> &'static str {
    match status.as_u16() {
        200 => "OK",
        201 => "Created",
        400 => "Bad Request",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}
