//! HTTP server with single-page-application fallback routing.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response};
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;
use tokio::signal;
use tokio::sync::watch;
use tracing::info;

use crate::res::BoxBody;
use crate::{AssetDir, Config, Res, Result};

/// Static file server for the bundled application.
///
/// Request handling is an ordered two-case dispatch: a GET or HEAD path
/// matching a file in the artifact directory is streamed back; any other
/// path gets the shell document, leaving route matching to the client.
pub struct Server {
    config: Config,
    assets: AssetDir,
}

impl Server {
    /// Create a server for the given configuration.
    pub fn new(config: Config) -> Self {
        let assets = AssetDir::new(config.dist_dir.clone());
        Self { config, assets }
    }

    /// Bind the configured port and serve until shutdown.
    ///
    /// Binding failure (port in use, insufficient privilege) is fatal and
    /// returned to the caller.
    pub async fn listen(self) -> Result<()> {
        let addr = SocketAddr::from(([0, 0, 0, 0], self.config.port));
        let listener = TcpListener::bind(addr).await?;
        info!(port = self.config.port, "listening");
        self.serve_on(listener).await
    }

    /// Serve connections from an already-bound listener.
    ///
    /// Implements graceful shutdown on SIGTERM/SIGINT signals. In-flight
    /// requests complete before the server terminates.
    pub async fn serve_on(self, listener: TcpListener) -> Result<()> {
        let server = Arc::new(self);

        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

        tokio::spawn(async move {
            let _ = shutdown_signal().await;
            let _ = shutdown_tx.send(true);
        });

        loop {
            tokio::select! {
                result = listener.accept() => {
                    match result {
                        Ok((stream, _)) => {
                            let io = TokioIo::new(stream);
                            let server = Arc::clone(&server);
                            let mut shutdown_rx = shutdown_rx.clone();

                            tokio::task::spawn(async move {
                                let conn = http1::Builder::new()
                                    .serve_connection(
                                        io,
                                        service_fn(move |req| {
                                            let server = Arc::clone(&server);
                                            async move { server.handle_request(req).await }
                                        }),
                                    );

                                let mut conn = std::pin::pin!(conn);

                                tokio::select! {
                                    result = conn.as_mut() => {
                                        let _ = result;
                                    }
                                    _ = shutdown_rx.changed() => {
                                        conn.as_mut().graceful_shutdown();
                                        let _ = conn.await;
                                    }
                                }
                            });
                        }
                        Err(_) => {}
                    }
                }
                _ = shutdown_rx.changed() => {
                    break;
                }
            }
        }

        Ok(())
    }

    async fn handle_request(
        &self,
        req: Request<Incoming>,
    ) -> std::result::Result<Response<BoxBody>, Infallible> {
        let method = req.method();
        if method != Method::GET && method != Method::HEAD {
            let response = Res::builder()
                .status(405)
                .header("Allow", "GET, HEAD")
                .text(format!("Method {} not allowed", method));
            return Ok(response.into_hyper());
        }

        let path = req.uri().path();
        let response = match self.assets.resolve(path).await {
            Some(file) => Res::file(file).await,
            None => {
                info!(path, "serving shell");
                Res::file(self.config.shell_path()).await
            }
        };

        Ok(response.into_hyper())
    }
}

async fn shutdown_signal() -> std::io::Result<()> {
    #[cfg(unix)]
    {
        let mut sigterm = signal::unix::signal(signal::unix::SignalKind::terminate())?;
        let mut sigint = signal::unix::signal(signal::unix::SignalKind::interrupt())?;

        tokio::select! {
            _ = sigterm.recv() => {}
            _ = sigint.recv() => {}
        }
    }

    #[cfg(not(unix))]
    {
        signal::ctrl_c().await?;
    }

    Ok(())
}
