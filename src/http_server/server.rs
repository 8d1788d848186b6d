//! # HTTP Server
//!
//! Main HTTP server combining all endpoint routers.
//!
//! The store handle is injected at construction; the server never opens
//! storage itself. On shutdown the server closes its handle.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::book_routes::{book_routes, BookState};
use super::config::HttpServerConfig;
use super::docs_routes::docs_routes;
use super::health_routes::health_routes;
use crate::store::BookStore;

/// HTTP server for the book API
pub struct HttpServer {
    config: HttpServerConfig,
    store: BookStore,
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server over `store`
    pub fn new(config: HttpServerConfig, store: BookStore) -> Self {
        let router = Self::build_router(&config, store.clone());
        Self {
            config,
            store,
            router,
        }
    }

    /// Build the combined router with all endpoints
    fn build_router(config: &HttpServerConfig, store: BookStore) -> Router {
        let state = Arc::new(BookState::new(store));

        Router::new()
            .merge(health_routes(state.clone()))
            .nest("/books", book_routes(state))
            .nest("/api-docs", docs_routes())
            .layer(
                ServiceBuilder::new()
                    .layer(TraceLayer::new_for_http())
                    .layer(config.cors_layer()),
            )
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Serve until ctrl-c, then close the store handle.
    pub async fn start(self) -> Result<(), io::Error> {
        let addr: SocketAddr = self
            .config
            .socket_addr()
            .parse()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

        let listener = TcpListener::bind(addr).await?;
        tracing::info!(%addr, "bookshelf listening");
        tracing::info!("API documentation at http://{}/api-docs/openapi.json", addr);

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        if let Err(err) = self.store.close() {
            tracing::warn!(error = %err, "closing the database failed");
        }
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
