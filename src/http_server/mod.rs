//! # Bookshelf HTTP Server Module
//!
//! Axum routers for the book API, combined into one server.
//!
//! # Endpoints
//!
//! - `/books`, `/books/:id` - Book CRUD
//! - `/health` - Process health check
//! - `/ping` - Database round-trip check
//! - `/api-docs/openapi.json` - OpenAPI description

pub mod book_routes;
pub mod config;
pub mod docs_routes;
pub mod errors;
pub mod extract;
pub mod health_routes;
pub mod response;
pub mod server;

pub use book_routes::BookState;
pub use config::HttpServerConfig;
pub use errors::{ApiError, ApiResult};
pub use server::HttpServer;
