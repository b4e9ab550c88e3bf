//! HTTP server built on Axum

use async_trait::async_trait;
use axum::Router;
use parking_lot::RwLock;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::config::ServerConfig;
use crate::error::{Result, ServerError};
use crate::traits::Server;

/// Serves an Axum [`Router`] until its shutdown token is cancelled.
///
/// Clones share running state, so a clone handed to a task reports the
/// same `address()` as the original.
#[derive(Clone)]
pub struct HttpServer {
    name: String,
    config: ServerConfig,
    router: Router,
    running: Arc<AtomicBool>,
    bound_addr: Arc<RwLock<Option<SocketAddr>>>,
}

impl HttpServer {
    pub fn new(name: impl Into<String>, config: ServerConfig, router: Router) -> Self {
        Self {
            name: name.into(),
            config,
            router,
            running: Arc::new(AtomicBool::new(false)),
            bound_addr: Arc::new(RwLock::new(None)),
        }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}

#[async_trait]
impl Server for HttpServer {
    fn name(&self) -> &str {
        &self.name
    }

    fn address(&self) -> Option<SocketAddr> {
        *self.bound_addr.read()
    }

    fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    async fn run(&self, shutdown_token: CancellationToken) -> Result<()> {
        if self.running.swap(true, Ordering::SeqCst) {
            return Err(ServerError::AlreadyRunning);
        }

        let addr = match self.config.socket_addr() {
            Ok(addr) => addr,
            Err(e) => {
                self.running.store(false, Ordering::SeqCst);
                return Err(e);
            }
        };

        let listener = match TcpListener::bind(addr).await {
            Ok(listener) => listener,
            Err(e) => {
                self.running.store(false, Ordering::SeqCst);
                return Err(ServerError::bind(addr.to_string(), e));
            }
        };

        let local_addr = listener.local_addr()?;
        *self.bound_addr.write() = Some(local_addr);
        info!(server = %self.name, %local_addr, "HTTP server listening");

        let result = axum::serve(listener, self.router.clone())
            .with_graceful_shutdown(async move {
                shutdown_token.cancelled().await;
                info!("HTTP server received shutdown signal");
            })
            .await;

        self.running.store(false, Ordering::SeqCst);
        *self.bound_addr.write() = None;

        match result {
            Ok(()) => {
                info!(server = %self.name, "HTTP server shutdown complete");
                Ok(())
            }
            Err(e) => {
                error!(%e, "HTTP server error");
                Err(ServerError::Io(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::ServerExt;
    use axum::routing::get;
    use std::time::Duration;

    #[tokio::test]
    async fn test_http_server_binds_and_shuts_down() {
        let router = Router::new().route("/", get(|| async { "ok" }));
        let server = HttpServer::new("test", ServerConfig::ephemeral(), router);
        let probe = server.clone();

        let (handle, token) = server.spawn();

        let mut bound = None;
        for _ in 0..50 {
            if let Some(addr) = probe.address() {
                bound = Some(addr);
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        let bound = bound.expect("server should bind");
        assert_ne!(bound.port(), 0);
        assert!(probe.is_running());

        token.cancel();

        let result = tokio::time::timeout(Duration::from_secs(5), handle).await;
        assert!(matches!(result, Ok(Ok(Ok(())))));
        assert!(!probe.is_running());
        assert_eq!(probe.address(), None);
    }

    #[tokio::test]
    async fn test_invalid_address_fails_fast() {
        let server = HttpServer::new("bad", ServerConfig::new("nope", 80), Router::new());
        let result = server.run(CancellationToken::new()).await;
        assert!(matches!(result, Err(ServerError::InvalidAddress(_))));
        assert!(!server.is_running());
    }
}
