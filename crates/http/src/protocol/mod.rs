//! Core HTTP protocol types.
//!
//! - **Requests** ([`request`]): [`RequestHeader`] produced by the parser and
//!   [`Request`], the header with its optional body attached
//! - **Responses** ([`response`]): [`Response`], [`ResponseHead`] and the
//!   fixed [`status_text`] table
//! - **Headers** ([`headers`]): the case-sensitive [`Headers`] map and the
//!   header names the server relies on
//! - **Payload** ([`message`]): [`PayloadItem`], one step of a body read
//! - **Errors** ([`error`]): [`ParseError`] for the read side, [`SendError`]
//!   for the write side and [`HttpError`] wrapping both

mod message;
pub use message::PayloadItem;

mod request;
pub use request::Request;
pub use request::RequestHeader;

mod response;
pub use response::Response;
pub use response::ResponseHead;
pub use response::status_text;

pub mod headers;
pub use headers::Headers;

mod error;
pub use error::HttpError;
pub use error::ParseError;
pub use error::SendError;
