//! Request filters that decide whether a matched route accepts a request.
//!
//! A route first matches on the request target; its filter then looks at the
//! rest of the request. Filters compose with [`AllFilter`].
//!
//! # Examples
//!
//! ```
//! use octo_web::router::filter::{all_filter, header, post_method};
//!
//! // POST requests carrying a specific header
//! let mut upload = all_filter();
//! upload.and(post_method()).and(header("Content-Type", "application/octet-stream"));
//! ```

use crate::RequestContext;
use http::Method;
use std::fmt;

/// Core trait for request filtering.
///
/// The `Filter` trait requires `Send + Sync`, filters are shared by every
/// connection through the router.
pub trait Filter: Send + Sync {
    /// Returns `true` if the request should be handled by the route.
    fn matches(&self, req: &RequestContext) -> bool;
}

/// A filter that wraps a closure.
struct FnFilter<F: Fn(&RequestContext) -> bool>(F);

impl<F: Fn(&RequestContext) -> bool + Send + Sync> Filter for FnFilter<F> {
    fn matches(&self, req: &RequestContext) -> bool {
        (self.0)(req)
    }
}

/// Creates a new filter from a closure.
///
/// # Example
/// ```
/// use octo_web::router::filter::fn_filter;
///
/// let has_body = fn_filter(|req| req.body().is_some());
/// ```
pub fn fn_filter<F>(f: F) -> impl Filter
where
    F: Fn(&RequestContext) -> bool + Send + Sync,
{
    FnFilter(f)
}

/// Creates a filter that always returns true.
pub fn true_filter() -> TrueFilter {
    TrueFilter
}

/// A filter that always returns true.
#[derive(Debug)]
pub struct TrueFilter;
impl Filter for TrueFilter {
    #[inline]
    fn matches(&self, _req: &RequestContext) -> bool {
        true
    }
}

/// Creates a new AND-composed filter chain.
pub fn all_filter() -> AllFilter {
    AllFilter::new()
}

/// Compose filters with AND logic.
///
/// All inner filters must succeed for the whole filter to succeed.
/// An empty filter chain returns true by default.
pub struct AllFilter {
    filters: Vec<Box<dyn Filter>>,
}

impl AllFilter {
    fn new() -> Self {
        Self { filters: vec![] }
    }

    /// Add a new filter to the AND chain.
    pub fn and<F: Filter + 'static>(&mut self, filter: F) -> &mut Self {
        self.filters.push(Box::new(filter));
        self
    }
}

impl fmt::Debug for AllFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AllFilter").field("filters", &self.filters.len()).finish()
    }
}

impl Filter for AllFilter {
    fn matches(&self, req: &RequestContext) -> bool {
        self.filters.iter().all(|filter| filter.matches(req))
    }
}

/// A filter that matches HTTP methods.
#[derive(Debug)]
pub struct MethodFilter(Method);

impl Filter for MethodFilter {
    fn matches(&self, req: &RequestContext) -> bool {
        self.0.eq(req.method())
    }
}

macro_rules! method_filter {
    ($method:ident, $upper_case_method:ident) => {
        #[doc = concat!("Creates a filter that matches HTTP ", stringify!($upper_case_method), " requests.")]
        #[inline]
        pub fn $method() -> MethodFilter {
            MethodFilter(Method::$upper_case_method)
        }
    };
}

method_filter!(get_method, GET);
method_filter!(post_method, POST);

/// Creates a filter that matches a header by exact name and value.
#[inline]
pub fn header(header_name: impl Into<String>, header_value: impl Into<String>) -> HeaderFilter {
    HeaderFilter(header_name.into(), header_value.into())
}

/// A filter that matches HTTP headers.
#[derive(Debug)]
pub struct HeaderFilter(String, String);

impl Filter for HeaderFilter {
    fn matches(&self, req: &RequestContext) -> bool {
        req.header(&self.0).is_some_and(|value| value == self.1)
    }
}
