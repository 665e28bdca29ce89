use async_trait::async_trait;
use bytes::Bytes;
use http::StatusCode;
use octo_http::protocol::Response;
use octo_http::protocol::headers::names::{ACCEPT_ENCODING, CONTENT_ENCODING, CONTENT_TYPE};
use tracing::trace;

use crate::RequestContext;
use crate::encoding::{self, ContentEncoding};
use crate::handler::{HandlerError, RequestHandler};

/// Answers with the captured part of the target as a plain text body,
/// gzip-compressed when the client accepts it.
#[derive(Debug, Clone, Copy)]
pub struct EchoHandler;

#[async_trait]
impl RequestHandler for EchoHandler {
    async fn invoke<'req>(&self, req: &RequestContext<'req>) -> Result<Response, HandlerError> {
        let text = req.path_param();
        let response = Response::new(StatusCode::OK).with_header(CONTENT_TYPE, mime::TEXT_PLAIN.as_ref());

        if !req.header(ACCEPT_ENCODING).is_some_and(encoding::supports) {
            return Ok(response.with_body(Bytes::copy_from_slice(text.as_bytes())));
        }

        let body = encoding::compress(text.as_bytes()).map_err(HandlerError::compression)?;
        trace!(original = text.len(), compressed = body.len(), "echo body gzip encoded");

        Ok(response.with_header(CONTENT_ENCODING, ContentEncoding::Gzip.name()).with_body(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::GzDecoder;
    use http::Method;
    use octo_http::protocol::{Headers, Request, RequestHeader};
    use std::io::Read;

    fn request(headers: &[(&str, &str)]) -> Request {
        let headers = headers.iter().map(|(name, value)| (*name, *value)).collect::<Headers>();
        RequestHeader::new(Method::GET, "/echo/abc", "HTTP/1.1", headers).body(None)
    }

    #[tokio::test]
    async fn plain_echo() {
        let req = request(&[]);
        let response = EchoHandler.invoke(&RequestContext::new(&req, "abc")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers().get("Content-Type"), Some("text/plain"));
        assert_eq!(response.headers().get("Content-Encoding"), None);
        assert_eq!(response.body().map(|b| &b[..]), Some(&b"abc"[..]));
    }

    #[tokio::test]
    async fn gzip_echo() {
        let req = request(&[("Accept-Encoding", "encoding-1, gzip, encoding-2")]);
        let response = EchoHandler.invoke(&RequestContext::new(&req, "abc")).await.unwrap();

        assert_eq!(response.headers().get("Content-Encoding"), Some("gzip"));

        let mut decoded = String::new();
        GzDecoder::new(&response.body().unwrap()[..]).read_to_string(&mut decoded).unwrap();
        assert_eq!(decoded, "abc");
    }

    #[tokio::test]
    async fn unsupported_encoding_is_ignored() {
        let req = request(&[("Accept-Encoding", "br, deflate")]);
        let response = EchoHandler.invoke(&RequestContext::new(&req, "abc")).await.unwrap();

        assert_eq!(response.headers().get("Content-Encoding"), None);
        assert_eq!(response.body().map(|b| &b[..]), Some(&b"abc"[..]));
    }
}
