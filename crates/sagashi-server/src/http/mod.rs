//! HTTP API Server Module
//!
//! Axum router, handlers and wire types for the Sagashi REST API.

pub mod error;
pub mod extract;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod types;

pub use handlers::AppState;
pub use routes::create_router;
pub use server::HttpServer;
