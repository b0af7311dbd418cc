//! Weather Forecast Proxy Library

pub mod config;
pub mod http;
pub mod observability;
pub mod security;
pub mod upstream;

pub use config::ProxyConfig;
pub use http::HttpServer;
