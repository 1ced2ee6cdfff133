//! # Gateway HTTP Server
//!
//! Binds the router, applies the CORS layer, and serves. Each invocation
//! of a handler is independent; the server holds no per-request state
//! beyond the shared driver and configuration.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::http::Method;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

use crate::config::GatewayConfig;
use crate::graph::http_driver::HttpGraphDriver;
use crate::graph::session::{GraphDriver, SessionError};
use crate::observability::Logger;

use super::handler::GatewayHandler;
use super::routes::gateway_routes;

/// The assembled gateway server.
pub struct GatewayServer {
    config: GatewayConfig,
    router: Router,
}

impl GatewayServer {
    /// Build a server backed by the production HTTP driver.
    pub fn new(config: GatewayConfig) -> Result<Self, SessionError> {
        let driver = HttpGraphDriver::new(Duration::from_secs(config.request_timeout_secs))?;
        Ok(Self::with_driver(config, Arc::new(driver)))
    }

    /// Build a server over any driver implementation.
    pub fn with_driver(config: GatewayConfig, driver: Arc<dyn GraphDriver>) -> Self {
        let handler = GatewayHandler::new(config.clone(), driver);
        let router = gateway_routes(Arc::new(handler)).layer(cors_layer(&config));
        Self { config, router }
    }

    /// Socket address the server will bind.
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// The router, for driving requests in tests.
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind and serve until shutdown.
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr: SocketAddr = self
            .socket_addr()
            .parse()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

        Logger::info(
            "server_started",
            &[
                ("addr", &addr.to_string()),
                ("service_path", &self.config.service_path),
            ],
        );

        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, self.router).await
    }
}

/// Permissive cross-origin policy unless origins are pinned in config.
fn cors_layer(config: &GatewayConfig) -> CorsLayer {
    let methods = [Method::GET, Method::POST, Method::OPTIONS];

    if config.server.cors_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers(Any)
    } else {
        use tower_http::cors::AllowOrigin;
        let origins: Vec<_> = config
            .server
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(methods)
            .allow_headers(Any)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::memory::InMemoryGraphDriver;

    #[test]
    fn test_server_builds_with_defaults() {
        let server =
            GatewayServer::with_driver(GatewayConfig::default(), Arc::new(InMemoryGraphDriver::new()));
        assert_eq!(server.socket_addr(), "0.0.0.0:8080");
        let _router = server.router();
    }

    #[test]
    fn test_server_with_pinned_origins() {
        let mut config = GatewayConfig::default();
        config.server.cors_origins = vec!["http://localhost:3000".to_string()];

        let server = GatewayServer::with_driver(config, Arc::new(InMemoryGraphDriver::new()));
        let _router = server.router();
    }
}
