//! veilgate: a configuration-driven reverse proxy.
//!
//! ```text
//! Client Request
//!     → http/server.rs (dispatch: first matching path prefix wins)
//!     → proxy/forwarder.rs (rewrite path, scrub headers, send upstream)
//!     → http/response.rs (relay, or structured 404/500)
//! Client Response
//! ```
//!
//! The target list is compiled once at startup (`routing::Registry`) and is
//! immutable for the process lifetime. Forwarded requests never carry the
//! caller's address headers to the backend (`security::headers`).

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod proxy;
pub mod routing;
pub mod security;

pub use config::{Config, ServerSettings};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
