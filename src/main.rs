//! vitrine server entrypoint.
//!
//! Builds the configuration from the environment and runs the static file
//! server. Application logic lives in the library modules.

use vitrine::{Config, Server};

#[tokio::main]
async fn main() -> vitrine::Result<()> {
    tracing_subscriber::fmt().init();

    Server::new(Config::from_env()).listen().await
}
