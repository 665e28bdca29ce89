//! Command line and startup configuration.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use octo_http::connection::ConnectionConfig;
use tracing::{Level, warn};

pub const DEFAULT_PORT: u16 = 4221;

/// Command-line arguments for the server
#[derive(Parser, Debug)]
#[command(name = "octo-server")]
#[command(version)]
#[command(about = "A minimal HTTP/1.1 echo and file server", long_about = None)]
pub struct CliArgs {
    /// Directory served by the `/files/` endpoints
    #[arg(long)]
    pub directory: Option<PathBuf>,

    /// Port to listen on
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Address to bind to
    #[arg(long, default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,

    /// How long a single request line or header line may take to arrive, in milliseconds
    #[arg(long, default_value_t = 1000)]
    pub read_timeout_ms: u64,

    /// Maximum log level (trace, debug, info, warn, error)
    #[arg(long, default_value_t = Level::INFO)]
    pub log_level: Level,
}

/// Immutable server settings, resolved once at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    directory: Option<PathBuf>,
    address: SocketAddr,
    connection_config: ConnectionConfig,
}

impl ServerConfig {
    /// Builds the configuration, dropping a `directory` that is not an existing directory.
    pub fn new(directory: Option<PathBuf>, address: SocketAddr, connection_config: ConnectionConfig) -> Self {
        Self { directory: directory.and_then(validate_directory), address, connection_config }
    }

    /// The serving directory, `None` when it was not given or is unusable
    pub fn directory(&self) -> Option<&Path> {
        self.directory.as_deref()
    }

    pub fn address(&self) -> SocketAddr {
        self.address
    }

    pub fn connection_config(&self) -> ConnectionConfig {
        self.connection_config
    }
}

impl From<&CliArgs> for ServerConfig {
    fn from(args: &CliArgs) -> Self {
        let connection_config = ConnectionConfig::new().with_read_timeout(Duration::from_millis(args.read_timeout_ms));
        Self::new(args.directory.clone(), SocketAddr::new(args.host, args.port), connection_config)
    }
}

fn validate_directory(directory: PathBuf) -> Option<PathBuf> {
    if directory.is_dir() {
        Some(directory)
    } else {
        warn!(directory = %directory.display(), "serving directory does not exist, file endpoints are disabled");
        None
    }
}
