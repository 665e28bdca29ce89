use async_trait::async_trait;
use http::StatusCode;
use octo_http::protocol::Response;
use octo_http::protocol::headers::names::{CONTENT_TYPE, USER_AGENT};

use crate::RequestContext;
use crate::handler::{HandlerError, RequestHandler};

/// `200 OK` with no body
#[derive(Debug, Clone, Copy)]
pub struct RootHandler;

#[async_trait]
impl RequestHandler for RootHandler {
    async fn invoke<'req>(&self, _req: &RequestContext<'req>) -> Result<Response, HandlerError> {
        Ok(Response::new(StatusCode::OK))
    }
}

/// Reflects the `User-Agent` header back as a plain text body.
#[derive(Debug, Clone, Copy)]
pub struct UserAgentHandler;

#[async_trait]
impl RequestHandler for UserAgentHandler {
    async fn invoke<'req>(&self, req: &RequestContext<'req>) -> Result<Response, HandlerError> {
        let user_agent = req.header(USER_AGENT).ok_or_else(|| HandlerError::missing_header(USER_AGENT))?;

        Ok(Response::new(StatusCode::OK).with_header(CONTENT_TYPE, mime::TEXT_PLAIN.as_ref()).with_body(user_agent.to_owned()))
    }
}

/// `404 Not Found` with no body
#[derive(Debug, Clone, Copy)]
pub struct NotFoundHandler;

#[async_trait]
impl RequestHandler for NotFoundHandler {
    async fn invoke<'req>(&self, _req: &RequestContext<'req>) -> Result<Response, HandlerError> {
        Ok(Response::new(StatusCode::NOT_FOUND))
    }
}
