//! Upstream forecast API subsystem.
//!
//! # Data Flow
//! ```text
//! validated query
//!     → client.rs (build URL, append credential)
//!     → cache.rs (serve cached reply if fresh)
//!     → client.rs (single GET on cache miss)
//!     → reply stored, then forwarded verbatim
//! ```

pub mod cache;
pub mod client;

pub use cache::ReplyCache;
pub use client::{ForecastClient, ForecastQuery, UpstreamError, UpstreamReply};
