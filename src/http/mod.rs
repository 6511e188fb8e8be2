//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, dispatch to the matched target)
//!     → request.rs (assign request ID)
//!     → [proxy::Forwarder sends the rewritten request upstream]
//!     → response.rs (relay, or structured 404/500 body)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{RequestId, RequestIdExt, RequestIdLayer, X_REQUEST_ID};
pub use server::HttpServer;
