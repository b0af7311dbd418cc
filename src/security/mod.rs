//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → cors.rs (resolve allowed origin against the configured allow-list)
//!     → resolved value attached to every outbound response
//! ```
//!
//! # Design Decisions
//! - Origin resolution is pure and request-scoped; no shared state
//! - Denied origins get an explicit `"null"` value rather than no header

pub mod cors;

pub use cors::resolve_origin;
