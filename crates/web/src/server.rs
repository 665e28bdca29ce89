use std::convert::Infallible;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use async_trait::async_trait;
use octo_http::connection::{ConnectionConfig, HttpConnection};
use octo_http::handler::Handler;
use octo_http::protocol::{Request, Response};
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

use crate::router::Router;

#[derive(Debug)]
pub struct ServerBuilder {
    router: Option<Router>,
    address: Option<SocketAddr>,
    connection_config: ConnectionConfig,
}

impl ServerBuilder {
    fn new() -> Self {
        Self { router: None, address: None, connection_config: ConnectionConfig::default() }
    }

    pub fn address(mut self, address: SocketAddr) -> Self {
        self.address = Some(address);
        self
    }

    pub fn router(mut self, router: Router) -> Self {
        self.router = Some(router);
        self
    }

    pub fn connection_config(mut self, connection_config: ConnectionConfig) -> Self {
        self.connection_config = connection_config;
        self
    }

    /// # Errors
    ///
    /// Fails when the router or the address was not set.
    pub fn build(self) -> Result<Server, ServerBuildError> {
        let router = self.router.ok_or(ServerBuildError::MissingRouter)?;
        let address = self.address.ok_or(ServerBuildError::MissingAddress)?;
        Ok(Server { router, address, connection_config: self.connection_config })
    }
}

/// The listening server: accepts connections and serves each one on its own task.
#[derive(Debug)]
pub struct Server {
    router: Router,
    address: SocketAddr,
    connection_config: ConnectionConfig,
}

#[derive(Error, Debug)]
pub enum ServerBuildError {
    #[error("router must be set")]
    MissingRouter,
    #[error("address must be set")]
    MissingAddress,
}

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("bind {address} error: {source}")]
    Bind { address: SocketAddr, source: io::Error },
}

impl Server {
    pub fn builder() -> ServerBuilder {
        ServerBuilder::new()
    }

    pub fn address(&self) -> SocketAddr {
        self.address
    }

    /// Binds the configured address and serves connections on it.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Bind`] when the address cannot be bound;
    /// otherwise it does not return.
    pub async fn start(self) -> Result<(), ServerError> {
        let address = self.address;
        let tcp_listener = TcpListener::bind(address).await.map_err(|source| ServerError::Bind { address, source })?;

        info!(%address, "start listening");
        self.serve(tcp_listener).await;
        Ok(())
    }

    /// Accepts connections from `tcp_listener` forever.
    ///
    /// Accept failures are logged and the loop goes on.
    pub async fn serve(self, tcp_listener: TcpListener) {
        let connection_config = self.connection_config;
        let handler = Arc::new(self);

        loop {
            let (tcp_stream, remote_addr) = match tcp_listener.accept().await {
                Ok(stream_and_addr) => stream_and_addr,
                Err(e) => {
                    warn!(cause = %e, "failed to accept");
                    continue;
                }
            };

            let handler = Arc::clone(&handler);

            tokio::spawn(async move {
                info!(remote = %remote_addr, "connection accepted");
                let (reader, writer) = tcp_stream.into_split();
                let connection = HttpConnection::with_config(reader, writer, connection_config);
                match connection.process(handler).await {
                    Ok(()) => {
                        info!(remote = %remote_addr, "finished process, connection shutdown");
                    }
                    Err(e) => {
                        error!(remote = %remote_addr, "service has error, cause {}, connection shutdown", e);
                    }
                }
            });
        }
    }
}

#[async_trait]
impl Handler for Server {
    type Error = Infallible;

    async fn call(&self, req: Request) -> Result<Response, Self::Error> {
        Ok(self.router.dispatch(&req).await)
    }
}
