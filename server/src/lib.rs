//! HTTP surface of the org directory: configuration, router and handlers.

pub mod config;
pub mod http;
mod routes;

pub use config::AppConfig;
pub use http::{AppState, ServeConfig, build_router, serve};
