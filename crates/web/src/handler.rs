use std::io;
use std::path::PathBuf;

use async_trait::async_trait;
use http::StatusCode;
use octo_http::protocol::Response;
use thiserror::Error;

use crate::RequestContext;

/// One endpoint behavior, invoked for requests routed to it.
#[async_trait]
pub trait RequestHandler: Send + Sync {
    async fn invoke<'req>(&self, req: &RequestContext<'req>) -> Result<Response, HandlerError>;
}

/// Failures of an endpoint, each answered with its own status code.
#[derive(Error, Debug)]
pub enum HandlerError {
    #[error("file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("serving directory is not configured")]
    DirectoryUnconfigured,

    #[error("missing required header: {name}")]
    MissingHeader { name: &'static str },

    #[error("file name is empty")]
    EmptyFileName,

    #[error("file name escapes the serving directory: {name}")]
    InvalidFileName { name: String },

    #[error("request has no body")]
    MissingBody,

    #[error("compress response body error: {source}")]
    Compression { source: io::Error },

    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

impl HandlerError {
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    pub fn missing_header(name: &'static str) -> Self {
        Self::MissingHeader { name }
    }

    pub fn invalid_file_name(name: impl ToString) -> Self {
        Self::InvalidFileName { name: name.to_string() }
    }

    pub fn compression(source: io::Error) -> Self {
        Self::Compression { source }
    }

    /// The status sent to the client in place of the handler's response
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::FileNotFound { .. } => StatusCode::NOT_FOUND,
            Self::MissingHeader { .. } | Self::EmptyFileName | Self::InvalidFileName { .. } | Self::MissingBody => {
                StatusCode::BAD_REQUEST
            }
            Self::DirectoryUnconfigured | Self::Compression { .. } | Self::Io { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}
