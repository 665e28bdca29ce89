//! Request body decoding.
//!
//! Only `Content-Length` delimited bodies are supported; chunked transfer
//! encoding is not part of this server.

mod length_decoder;

pub use length_decoder::LengthDecoder;
