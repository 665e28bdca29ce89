//! Request handlers
//!
//! A [`Handler`] turns one fully read [`Request`] into a [`Response`]. The
//! connection calls it once per request and turns an `Err` into a
//! `500 Internal Server Error` response.

use std::error::Error;

use async_trait::async_trait;

use crate::protocol::{Request, Response};

#[async_trait]
pub trait Handler: Send + Sync {
    type Error: Into<Box<dyn Error + Send + Sync>> + Send;

    async fn call(&self, req: Request) -> Result<Response, Self::Error>;
}

/// Adapts an async function to [`Handler`], see [`make_handler`].
#[derive(Debug)]
pub struct HandlerFn<F> {
    f: F,
}

#[async_trait]
impl<Err, F, Fut> Handler for HandlerFn<F>
where
    F: Fn(Request) -> Fut + Send + Sync,
    Err: Into<Box<dyn Error + Send + Sync>> + Send,
    Fut: Future<Output = Result<Response, Err>> + Send,
{
    type Error = Err;

    async fn call(&self, req: Request) -> Result<Response, Self::Error> {
        (self.f)(req).await
    }
}

pub fn make_handler<F, Err, Ret>(f: F) -> HandlerFn<F>
where
    Err: Into<Box<dyn Error + Send + Sync>>,
    Ret: Future<Output = Result<Response, Err>>,
    F: Fn(Request) -> Ret,
{
    HandlerFn { f }
}
