use crate::codec::header::HeaderEncoder;
use crate::protocol::headers::names::CONTENT_LENGTH;
use crate::protocol::{Response, SendError};
use bytes::BytesMut;
use tokio_util::codec::Encoder;

/// Encodes a whole [`Response`] into one contiguous buffer.
///
/// `Content-Length` is always set from the body actually attached (`0` when
/// there is none), overriding whatever the handler put there. Without it a
/// keep-alive client could not tell where the response ends.
#[derive(Debug, Default)]
pub struct ResponseEncoder {
    header_encoder: HeaderEncoder,
}

impl ResponseEncoder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Encoder<Response> for ResponseEncoder {
    type Error = SendError;

    fn encode(&mut self, response: Response, dst: &mut BytesMut) -> Result<(), Self::Error> {
        let (mut head, body) = response.into_parts();

        let length = body.as_ref().map_or(0, |body| body.len());
        head.headers_mut().insert(CONTENT_LENGTH, length.to_string());

        self.header_encoder.encode(&head, dst)?;

        if let Some(body) = body {
            dst.extend_from_slice(&body);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use http::StatusCode;

    fn encode(response: Response) -> BytesMut {
        let mut dst = BytesMut::new();
        ResponseEncoder::new().encode(response, &mut dst).unwrap();
        dst
    }

    #[test]
    fn response_without_body() {
        let dst = encode(Response::new(StatusCode::OK));

        assert_eq!(&dst[..], b"HTTP/1.1 200 OK\r\nContent-Length: 0\r\n\r\n");
    }

    #[test]
    fn response_with_body() {
        let dst = encode(Response::new(StatusCode::OK).with_body(Bytes::from_static(b"abc")));

        assert_eq!(&dst[..], b"HTTP/1.1 200 OK\r\nContent-Length: 3\r\n\r\nabc");
    }

    #[test]
    fn empty_body_writes_no_payload() {
        let dst = encode(Response::new(StatusCode::CREATED).with_body(Bytes::new()));

        assert_eq!(&dst[..], b"HTTP/1.1 201 Created\r\nContent-Length: 0\r\n\r\n");
    }

    #[test]
    fn content_length_follows_body() {
        let response = Response::new(StatusCode::OK).with_header("Content-Length", "99").with_body("hello");
        let dst = encode(response);

        assert_eq!(&dst[..], b"HTTP/1.1 200 OK\r\nContent-Length: 5\r\n\r\nhello");
    }

    #[test]
    fn every_header_once() {
        let response = Response::new(StatusCode::OK)
            .with_header("Content-Type", "text/plain")
            .with_header("Content-Encoding", "gzip")
            .with_body("x");
        let dst = encode(response);
        let text = std::str::from_utf8(&dst).unwrap();

        let (head, body) = text.split_once("\r\n\r\n").unwrap();
        let mut lines = head.split("\r\n");
        assert_eq!(lines.next(), Some("HTTP/1.1 200 OK"));

        let mut headers = lines.collect::<Vec<_>>();
        headers.sort_unstable();
        assert_eq!(headers, vec!["Content-Encoding: gzip", "Content-Length: 1", "Content-Type: text/plain"]);
        assert_eq!(body, "x");
    }

    #[test]
    fn output_parses_as_http_response() {
        let response = Response::new(StatusCode::NOT_FOUND)
            .with_header("Content-Type", "text/plain")
            .with_header("X-Request", "42")
            .with_body("missing");
        let dst = encode(response);

        let mut headers = [httparse::EMPTY_HEADER; 16];
        let mut parsed = httparse::Response::new(&mut headers);
        let httparse::Status::Complete(head_len) = parsed.parse(&dst).unwrap() else {
            panic!("response head is incomplete");
        };

        assert_eq!(parsed.version, Some(1));
        assert_eq!(parsed.code, Some(404));
        assert_eq!(parsed.reason, Some("Not Found"));

        let mut headers = parsed.headers.iter().map(|h| (h.name, h.value)).collect::<Vec<_>>();
        headers.sort_unstable();
        assert_eq!(
            headers,
            vec![("Content-Length", &b"7"[..]), ("Content-Type", &b"text/plain"[..]), ("X-Request", &b"42"[..])]
        );
        assert_eq!(&dst[head_len..], b"missing");
    }
}
