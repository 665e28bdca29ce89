//! The server's endpoints and its route table.

mod basic;
mod echo;
mod files;

pub use basic::{NotFoundHandler, RootHandler, UserAgentHandler};
pub use echo::EchoHandler;
pub use files::{FileReadHandler, FileWriteHandler};

use std::path::PathBuf;

use crate::router::{RouteMatcher, Router, any, get, post};

/// Builds the route table, serving files from `directory` when it is set.
///
/// | target | method | handler |
/// |---|---|---|
/// | `/` | any | [`RootHandler`] |
/// | `/user-agent` | any | [`UserAgentHandler`] |
/// | `/echo/{text}` | any | [`EchoHandler`] |
/// | `/files/{name}` | GET | [`FileReadHandler`] |
/// | `/files/{name}` | POST | [`FileWriteHandler`] |
/// | anything else | any | [`NotFoundHandler`] |
pub fn routes(directory: Option<PathBuf>) -> Router {
    Router::builder()
        .route(RouteMatcher::exact("/"), any(RootHandler))
        .route(RouteMatcher::exact("/user-agent"), any(UserAgentHandler))
        .route(RouteMatcher::capture("/echo/"), any(EchoHandler))
        .route(RouteMatcher::capture_allow_empty("/files/"), get(FileReadHandler::new(directory.clone())))
        .route(RouteMatcher::capture_allow_empty("/files/"), post(FileWriteHandler::new(directory)))
        .default_handler(NotFoundHandler)
        .build()
}
