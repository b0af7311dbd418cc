//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, /weather route)
//!     → [configuration guard, parameter validation]
//!     → [cached reply, or one upstream round trip]
//!     → response.rs (compose status, body, CORS headers)
//!     → Send to client
//! ```

pub mod response;
pub mod server;

pub use server::HttpServer;
