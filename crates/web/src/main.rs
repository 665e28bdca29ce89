use std::process::ExitCode;

use clap::Parser;
use octo_web::Server;
use octo_web::config::{CliArgs, ServerConfig};
use octo_web::endpoint::routes;
use tracing::{error, info};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();

    let subscriber = FmtSubscriber::builder().with_max_level(args.log_level).finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("setting default subscriber failed: {e}");
        return ExitCode::FAILURE;
    }

    let config = ServerConfig::from(&args);
    info!(directory = ?config.directory(), address = %config.address(), "starting octo-server");

    let server = match Server::builder()
        .router(routes(config.directory().map(ToOwned::to_owned)))
        .address(config.address())
        .connection_config(config.connection_config())
        .build()
    {
        Ok(server) => server,
        Err(e) => {
            error!(cause = %e, "invalid server setup");
            return ExitCode::FAILURE;
        }
    };

    match server.start().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(cause = %e, "server stopped");
            ExitCode::FAILURE
        }
    }
}
