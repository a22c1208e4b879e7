//! # Sagashi Server
//!
//! HTTP API over the Sagashi matcher: fuzzy title and slug matching, episode
//! and quality lookup on labeled links, expiring short links, and redirect
//! resolution to direct media URLs.

pub mod config;
pub mod http;

pub use config::ServerConfig;
pub use http::{create_router, AppState, HttpServer};
