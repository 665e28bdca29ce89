use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

use http::StatusCode;
use tokio::io::{AsyncRead, AsyncWrite};
use tracing::{debug, error, info};

use crate::connection::request_reader::RequestReader;
use crate::connection::response_writer::ResponseWriter;
use crate::handler::Handler;
use crate::protocol::headers::names::CONNECTION;
use crate::protocol::{HttpError, ParseError, Request, Response};

/// Default deadline for reading one line of a request
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(1);

/// Per-connection settings, shared read-only by all connections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionConfig {
    read_timeout: Duration,
}

impl ConnectionConfig {
    pub fn new() -> Self {
        Self { read_timeout: DEFAULT_READ_TIMEOUT }
    }

    /// Sets how long a single line read may wait for data.
    ///
    /// When it elapses, a partially received line is used as if complete, and
    /// an idle keep-alive connection is closed.
    #[must_use]
    pub fn with_read_timeout(mut self, read_timeout: Duration) -> Self {
        self.read_timeout = read_timeout;
        self
    }

    pub fn read_timeout(&self) -> Duration {
        self.read_timeout
    }
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// One client connection and its request loop.
///
/// Requests are handled strictly one after another: the next request is not
/// read before the previous response has been written. The loop ends when
/// the client sends `Connection: close`, closes its side, stays idle past the
/// read deadline, or when reading or writing fails.
///
/// # Type Parameters
///
/// * `R`: The async readable stream type
/// * `W`: The async writable stream type
#[derive(Debug)]
pub struct HttpConnection<R, W> {
    request_reader: RequestReader<R>,
    response_writer: ResponseWriter<W>,
}

impl<R, W> HttpConnection<R, W>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self::with_config(reader, writer, ConnectionConfig::default())
    }

    pub fn with_config(reader: R, writer: W, config: ConnectionConfig) -> Self {
        Self {
            request_reader: RequestReader::new(reader, config.read_timeout()),
            response_writer: ResponseWriter::new(writer),
        }
    }

    /// Serves requests until the connection is done, then shuts the write half down.
    ///
    /// # Errors
    ///
    /// The parse or send error that ended the connection. A client closing
    /// the connection between requests is not an error.
    pub async fn process<H>(mut self, handler: Arc<H>) -> Result<(), HttpError>
    where
        H: Handler,
    {
        let result = self.serve(&*handler).await;

        if let Err(e) = self.response_writer.shutdown().await {
            debug!(cause = %e, "shutdown connection failed");
        }
        result
    }

    async fn serve<H>(&mut self, handler: &H) -> Result<(), HttpError>
    where
        H: Handler,
    {
        loop {
            let request = match self.read_request().await {
                Ok(Some(request)) => request,
                Ok(None) => {
                    info!("cant read more request, break this connection down");
                    return Ok(());
                }
                Err(e) => {
                    error!(cause = %e, "can't receive next request");
                    if e.is_malformed() {
                        let response = Response::new(StatusCode::BAD_REQUEST).with_header(CONNECTION, "close");
                        if let Err(send_error) = self.response_writer.write(response).await {
                            debug!(cause = %send_error, "failed to send bad request response");
                        }
                    }
                    return Err(e.into());
                }
            };

            let should_close = request.header().is_close();

            let response = dispatch(handler, request).await;
            self.response_writer.write(response).await?;

            if should_close {
                info!("client asked to close the connection");
                return Ok(());
            }
        }
    }

    /// Reads the next request together with its body, if it declared one.
    async fn read_request(&mut self) -> Result<Option<Request>, ParseError> {
        let Some(header) = self.request_reader.parse_request().await? else {
            return Ok(None);
        };

        let body = match header.content_length()? {
            Some(_) => Some(self.request_reader.read_body(&header).await?),
            None => None,
        };

        Ok(Some(header.body(body)))
    }
}

async fn dispatch<H: Handler>(handler: &H, request: Request) -> Response {
    match handler.call(request).await {
        Ok(response) => response,
        Err(e) => {
            let e: Box<dyn Error + Send + Sync> = e.into();
            error!("handle response error, cause: {}", e);
            Response::new(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
