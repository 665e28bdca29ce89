use std::io;
use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use http::StatusCode;
use octo_http::protocol::Response;
use octo_http::protocol::headers::names::CONTENT_TYPE;
use tracing::{debug, info};

use crate::RequestContext;
use crate::handler::{HandlerError, RequestHandler};

/// Serves `GET /files/{name}` from the configured directory.
#[derive(Debug, Clone)]
pub struct FileReadHandler {
    directory: Option<PathBuf>,
}

impl FileReadHandler {
    pub fn new(directory: Option<PathBuf>) -> Self {
        Self { directory }
    }
}

#[async_trait]
impl RequestHandler for FileReadHandler {
    async fn invoke<'req>(&self, req: &RequestContext<'req>) -> Result<Response, HandlerError> {
        let path = resolve(self.directory.as_deref(), req.path_param())?;

        let content = tokio::fs::read(&path).await.map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => HandlerError::file_not_found(&path),
            _ => HandlerError::from(e),
        })?;
        debug!(path = %path.display(), size = content.len(), "file read");

        Ok(Response::new(StatusCode::OK).with_header(CONTENT_TYPE, mime::APPLICATION_OCTET_STREAM.as_ref()).with_body(content))
    }
}

/// Stores the body of `POST /files/{name}` in the configured directory,
/// replacing any existing file.
#[derive(Debug, Clone)]
pub struct FileWriteHandler {
    directory: Option<PathBuf>,
}

impl FileWriteHandler {
    pub fn new(directory: Option<PathBuf>) -> Self {
        Self { directory }
    }
}

#[async_trait]
impl RequestHandler for FileWriteHandler {
    async fn invoke<'req>(&self, req: &RequestContext<'req>) -> Result<Response, HandlerError> {
        let path = resolve(self.directory.as_deref(), req.path_param())?;
        let body = req.body().ok_or(HandlerError::MissingBody)?;

        tokio::fs::write(&path, body).await?;
        info!(path = %path.display(), size = body.len(), "file written");

        Ok(Response::new(StatusCode::CREATED))
    }
}

/// Joins `name` onto the serving directory.
///
/// The directory is checked first, so an unconfigured server answers every
/// file request with the same error.
fn resolve(directory: Option<&Path>, name: &str) -> Result<PathBuf, HandlerError> {
    let directory = directory.ok_or(HandlerError::DirectoryUnconfigured)?;
    if name.is_empty() {
        return Err(HandlerError::EmptyFileName);
    }

    let relative = Path::new(name);
    if !relative.components().all(|component| matches!(component, Component::Normal(_) | Component::CurDir)) {
        return Err(HandlerError::invalid_file_name(name));
    }

    Ok(directory.join(relative))
}
