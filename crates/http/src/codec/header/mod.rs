//! Request-line and header decoding, response-head encoding.
//!
//! - [`decode_request_line`] / [`decode_header_line`]: turn single lines
//!   produced by the line decoder into typed values
//! - [`HeaderEncoder`]: writes the status line and header block of a response

mod header_decoder;
mod header_encoder;

pub use header_decoder::MAX_HEADER_NUM;
pub use header_decoder::RequestLine;
pub use header_decoder::decode_header_line;
pub use header_decoder::decode_request_line;
pub use header_encoder::HeaderEncoder;
