//! Static file server for a bundled single-page application.
//!
//! Serves the output of the bundle step over HTTP and falls back to the
//! HTML shell for any unmatched path, leaving route handling to the client.
//!
//! ```rust,no_run
//! use vitrine::{Config, Server};
//!
//! #[tokio::main]
//! async fn main() -> vitrine::Result<()> {
//!     Server::new(Config::from_env()).listen().await
//! }
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

mod assets;
pub mod bundle;
mod config;
mod error;
mod mime;
mod res;
mod server;

pub use assets::AssetDir;
pub use bundle::{BundleConfig, TransformRule};
pub use config::Config;
pub use error::{Error, Result};
pub use res::{Res, ResBuilder};
pub use server::Server;
