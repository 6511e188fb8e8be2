//! Request forwarding.
//!
//! # Responsibilities
//! - One `Forwarder` per configured target, bound for the process lifetime
//! - Rewrite the path, sanitize and merge headers, send upstream
//! - Convert transport failures into the structured error response
//!
//! # Design Decisions
//! - No retries: an upstream failure is reported, not papered over
//! - The upstream exchange is the only suspension point and is bounded by
//!   the configured connect and request timeouts

pub mod forwarder;

pub use forwarder::{Forwarder, HttpClient, ProxyError};
