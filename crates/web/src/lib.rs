//! The application side of the octo server
//!
//! This crate puts the endpoints on top of `octo-http`: a [`Router`] picks the
//! [`handler::RequestHandler`] for each request, the handlers in [`endpoint`]
//! implement the echo, user-agent and file services, and [`Server`] accepts
//! connections and feeds them through the router.
//!
//! # Example
//!
//! ```no_run
//! use octo_web::Server;
//! use octo_web::endpoint::routes;
//!
//! #[tokio::main]
//! async fn main() {
//!     let server = Server::builder()
//!         .router(routes(Some("/tmp".into())))
//!         .address("127.0.0.1:4221".parse().unwrap())
//!         .build()
//!         .unwrap();
//!
//!     server.start().await.unwrap();
//! }
//! ```

mod request;
mod server;

pub mod config;
pub mod encoding;
pub mod endpoint;
pub mod handler;
pub mod router;

pub use request::RequestContext;
pub use router::Router;
pub use server::{Server, ServerBuildError, ServerBuilder, ServerError};
