//! Decoding of the request line and of individual header lines.
//!
//! The rules are intentionally narrow:
//!
//! - the request line is split on single spaces and must yield exactly three
//!   non-empty tokens: method, target and version
//! - a header line is split on its first colon; name and value are trimmed
//!
//! Header folding and other rarely used RFC 7230 forms are not supported.

use std::str;

use http::Method;

use crate::ensure;
use crate::protocol::ParseError;

/// Maximum number of header lines allowed in a request
pub const MAX_HEADER_NUM: usize = 64;

/// The three tokens of a request line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine {
    pub method: Method,
    pub target: String,
    pub version: String,
}

/// Parses `METHOD SP TARGET SP VERSION`.
///
/// # Errors
///
/// Returns [`ParseError::MalformedRequestLine`] when the line is not UTF-8,
/// does not split into exactly three tokens, contains an empty token, or the
/// method is not a valid token.
pub fn decode_request_line(line: &[u8]) -> Result<RequestLine, ParseError> {
    let line = str::from_utf8(line).map_err(ParseError::malformed_request_line)?;

    let mut tokens = line.split(' ');
    let (Some(method), Some(target), Some(version), None) = (tokens.next(), tokens.next(), tokens.next(), tokens.next())
    else {
        let count = line.split(' ').count();
        return Err(ParseError::malformed_request_line(format!("expected 3 tokens, got {count} in {line:?}")));
    };

    ensure!(
        !method.is_empty() && !target.is_empty() && !version.is_empty(),
        ParseError::malformed_request_line(format!("empty token in {line:?}"))
    );

    let method = Method::from_bytes(method.as_bytes())
        .map_err(|_| ParseError::malformed_request_line(format!("invalid method {method:?}")))?;

    Ok(RequestLine { method, target: target.to_owned(), version: version.to_owned() })
}

/// Parses `Name: Value` into a trimmed `(name, value)` pair.
///
/// # Errors
///
/// Returns [`ParseError::MalformedHeader`] when the line is not UTF-8, has no
/// colon, or has an empty name.
pub fn decode_header_line(line: &[u8]) -> Result<(String, String), ParseError> {
    let line = str::from_utf8(line).map_err(ParseError::malformed_header)?;

    let Some((name, value)) = line.split_once(':') else {
        return Err(ParseError::malformed_header(format!("missing colon in {line:?}")));
    };

    let name = name.trim();
    ensure!(!name.is_empty(), ParseError::malformed_header(format!("empty header name in {line:?}")));

    Ok((name.to_owned(), value.trim().to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_line() {
        let line = decode_request_line(b"GET /echo/abc?x=1 HTTP/1.1").unwrap();

        assert_eq!(line.method, Method::GET);
        assert_eq!(line.target, "/echo/abc?x=1");
        assert_eq!(line.version, "HTTP/1.1");
    }

    #[test]
    fn request_line_keeps_target_raw() {
        let line = decode_request_line(b"POST /files/a%20b.txt HTTP/1.0").unwrap();

        assert_eq!(line.method, Method::POST);
        assert_eq!(line.target, "/files/a%20b.txt");
        assert_eq!(line.version, "HTTP/1.0");
    }

    #[test]
    fn request_line_extension_method() {
        let line = decode_request_line(b"PURGE / HTTP/1.1").unwrap();
        assert_eq!(line.method.as_str(), "PURGE");
    }

    #[test]
    fn request_line_wrong_token_count() {
        for line in [&b"GET /"[..], b"GET / HTTP/1.1 extra", b"", b"GET  / HTTP/1.1"] {
            assert!(
                matches!(decode_request_line(line), Err(ParseError::MalformedRequestLine { .. })),
                "line {:?} should be rejected",
                String::from_utf8_lossy(line)
            );
        }
    }

    #[test]
    fn request_line_empty_token() {
        assert!(matches!(decode_request_line(b"GET / "), Err(ParseError::MalformedRequestLine { .. })));
        assert!(matches!(decode_request_line(b" / HTTP/1.1"), Err(ParseError::MalformedRequestLine { .. })));
    }

    #[test]
    fn request_line_invalid_method() {
        assert!(matches!(decode_request_line(b"G(T / HTTP/1.1"), Err(ParseError::MalformedRequestLine { .. })));
    }

    #[test]
    fn header_line_is_trimmed() {
        assert_eq!(decode_header_line(b"Host: localhost:4221").unwrap(), ("Host".into(), "localhost:4221".into()));
        assert_eq!(decode_header_line(b"  X-Padded \t:   spaced out  ").unwrap(), ("X-Padded".into(), "spaced out".into()));
        assert_eq!(decode_header_line(b"X-Empty:").unwrap(), ("X-Empty".into(), String::new()));
    }

    #[test]
    fn header_line_keeps_name_case() {
        assert_eq!(decode_header_line(b"user-agent: curl").unwrap().0, "user-agent");
    }

    #[test]
    fn header_line_without_colon() {
        assert!(matches!(decode_header_line(b"Host localhost"), Err(ParseError::MalformedHeader { .. })));
    }

    #[test]
    fn header_line_with_empty_name() {
        assert!(matches!(decode_header_line(b": value"), Err(ParseError::MalformedHeader { .. })));
    }

    #[test]
    fn header_line_not_utf8() {
        assert!(matches!(decode_header_line(b"X-Bin: \xff\xfe"), Err(ParseError::MalformedHeader { .. })));
    }
}
