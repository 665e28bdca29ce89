//! Request access for endpoint handlers.

use bytes::Bytes;
use http::Method;
use octo_http::protocol::{Headers, Request};

/// A request as seen by an endpoint: the parsed request plus the part of the
/// target captured by the matched route.
///
/// The lifetime ties the context to the request it borrows; it lives only for
/// one dispatch.
#[derive(Debug, Clone, Copy)]
pub struct RequestContext<'req> {
    request: &'req Request,
    path_param: &'req str,
}

impl<'req> RequestContext<'req> {
    pub fn new(request: &'req Request, path_param: &'req str) -> Self {
        Self { request, path_param }
    }

    pub fn request(&self) -> &'req Request {
        self.request
    }

    pub fn method(&self) -> &'req Method {
        self.request.method()
    }

    pub fn target(&self) -> &'req str {
        self.request.target()
    }

    pub fn headers(&self) -> &'req Headers {
        self.request.headers()
    }

    /// Looks a header up by its exact, case-sensitive name.
    pub fn header(&self, name: &str) -> Option<&'req str> {
        self.request.headers().get(name)
    }

    pub fn body(&self) -> Option<&'req Bytes> {
        self.request.body()
    }

    /// The raw remainder of the target after the route prefix; empty for exact routes.
    pub fn path_param(&self) -> &'req str {
        self.path_param
    }
}
