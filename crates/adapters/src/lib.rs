//! Protocol adapters for the analytics lookup mock
//!
//! This crate exposes the catalog over HTTP: an axum router with the single
//! `get_by_ids` route and a small server wrapper that owns the listener.

pub mod http_server;
pub mod lookup_router;

pub use http_server::{HttpServer, ServerConfig, DEFAULT_HOST, DEFAULT_PORT};
pub use lookup_router::{router, ApiError};
