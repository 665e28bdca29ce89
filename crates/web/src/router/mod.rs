//! Ordered request routing.
//!
//! A [`Router`] holds a list of routes checked in the order they were added.
//! Each route pairs a [`RouteMatcher`] on the request target with a
//! [`Filter`] on the rest of the request. The first route accepting the
//! request handles it; when none does, the default handler runs.
//!
//! ```
//! use octo_web::endpoint::{EchoHandler, NotFoundHandler, RootHandler};
//! use octo_web::router::{Router, RouteMatcher, any};
//!
//! let router = Router::builder()
//!     .route(RouteMatcher::exact("/"), any(RootHandler))
//!     .route(RouteMatcher::capture("/echo/"), any(EchoHandler))
//!     .default_handler(NotFoundHandler)
//!     .build();
//! ```

pub mod filter;

use crate::RequestContext;
use crate::endpoint::NotFoundHandler;
use crate::handler::RequestHandler;
use filter::{AllFilter, Filter};
use octo_http::protocol::{Request, Response};
use std::fmt;
use tracing::{debug, error};

type RouterFilter = dyn Filter + Send + Sync + 'static;

/// How a route matches the request target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteMatcher {
    /// The whole target equals the path
    Exact(String),
    /// The target starts with `prefix`; the rest of it is captured
    Capture { prefix: String, allow_empty: bool },
}

impl RouteMatcher {
    pub fn exact(path: impl Into<String>) -> Self {
        Self::Exact(path.into())
    }

    /// Matches targets starting with `prefix` followed by at least one more byte.
    pub fn capture(prefix: impl Into<String>) -> Self {
        Self::Capture { prefix: prefix.into(), allow_empty: false }
    }

    /// Like [`RouteMatcher::capture`], but also matches the bare prefix.
    pub fn capture_allow_empty(prefix: impl Into<String>) -> Self {
        Self::Capture { prefix: prefix.into(), allow_empty: true }
    }

    /// Returns the captured remainder of `target`, or `None` if it does not match.
    ///
    /// Exact matches capture nothing and return an empty string.
    pub fn captures<'t>(&self, target: &'t str) -> Option<&'t str> {
        match self {
            Self::Exact(path) => (target == path).then_some(""),
            Self::Capture { prefix, allow_empty } => {
                target.strip_prefix(prefix.as_str()).filter(|rest| *allow_empty || !rest.is_empty())
            }
        }
    }
}

/// Main router structure that handles HTTP request routing
pub struct Router {
    items: Vec<RouterItem>,
    default_handler: Box<dyn RequestHandler>,
}

/// A router item containing a matcher, a filter and a handler
pub struct RouterItem {
    matcher: RouteMatcher,
    filter: Box<RouterFilter>,
    handler: Box<dyn RequestHandler>,
}

impl Router {
    pub fn builder() -> RouterBuilder {
        RouterBuilder::new()
    }

    /// Finds the handler for `request` and the context it should be invoked with.
    pub fn at<'router, 'req>(&'router self, request: &'req Request) -> (&'router dyn RequestHandler, RequestContext<'req>) {
        let target = request.target();

        for item in &self.items {
            let Some(path_param) = item.matcher.captures(target) else {
                continue;
            };

            let request_context = RequestContext::new(request, path_param);
            if item.filter.matches(&request_context) {
                return (item.handler.as_ref(), request_context);
            }
        }

        debug!(target, "no route matched, using default handler");
        (self.default_handler.as_ref(), RequestContext::new(request, ""))
    }

    /// Routes and handles `request`.
    ///
    /// Handler failures are answered with the status code of the error.
    pub async fn dispatch(&self, request: &Request) -> Response {
        let (handler, request_context) = self.at(request);

        match handler.invoke(&request_context).await {
            Ok(response) => response,
            Err(e) => {
                error!(cause = %e, target = request.target(), "request handler failed");
                Response::new(e.status_code())
            }
        }
    }

    /// Number of routes, not counting the default handler
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router").field("items", &self.items).finish_non_exhaustive()
    }
}

impl fmt::Debug for RouterItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouterItem").field("matcher", &self.matcher).finish_non_exhaustive()
    }
}

pub struct RouterBuilder {
    items: Vec<RouterItem>,
    default_handler: Option<Box<dyn RequestHandler>>,
}

impl RouterBuilder {
    fn new() -> Self {
        Self { items: Vec::new(), default_handler: None }
    }

    /// Appends a route; routes added earlier take precedence.
    pub fn route(mut self, matcher: RouteMatcher, item_builder: RouterItemBuilder) -> Self {
        self.items.push(item_builder.build(matcher));
        self
    }

    /// Sets the handler for requests no route accepts, [`NotFoundHandler`] if unset.
    pub fn default_handler(mut self, request_handler: impl RequestHandler + 'static) -> Self {
        self.default_handler = Some(Box::new(request_handler));
        self
    }

    pub fn build(self) -> Router {
        let default_handler = self.default_handler.unwrap_or_else(|| Box::new(NotFoundHandler));
        Router { items: self.items, default_handler }
    }
}

impl fmt::Debug for RouterBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouterBuilder")
            .field("items", &self.items)
            .field("has_default_handler", &self.default_handler.is_some())
            .finish()
    }
}

macro_rules! method_router_filter {
    ($method:ident, $method_name:ident) => {
        #[doc = concat!("Routes only ", stringify!($method_name), " requests to `handler`.")]
        pub fn $method<H: RequestHandler + 'static>(handler: H) -> RouterItemBuilder {
            let mut filters = filter::all_filter();
            filters.and(filter::$method_name());
            RouterItemBuilder { filters, handler: Box::new(handler) }
        }
    };
}

method_router_filter!(get, get_method);
method_router_filter!(post, post_method);

/// Routes requests of any method to `handler`.
pub fn any<H: RequestHandler + 'static>(handler: H) -> RouterItemBuilder {
    let mut filters = filter::all_filter();
    filters.and(filter::true_filter());
    RouterItemBuilder { filters, handler: Box::new(handler) }
}

pub struct RouterItemBuilder {
    filters: AllFilter,
    handler: Box<dyn RequestHandler>,
}

impl fmt::Debug for RouterItemBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouterItemBuilder").field("filters", &self.filters).finish_non_exhaustive()
    }
}

impl RouterItemBuilder {
    pub fn with<F: Filter + Send + Sync + 'static>(mut self, filter: F) -> Self {
        self.filters.and(filter);
        self
    }

    fn build(self, matcher: RouteMatcher) -> RouterItem {
        RouterItem { matcher, filter: Box::new(self.filters), handler: self.handler }
    }
}
