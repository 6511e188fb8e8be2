//! Lifecycle management.
//!
//! Startup is linear and fail-fast: configuration first, then the registry,
//! then the listener. Shutdown is coordinated through a broadcast channel
//! so the server drains in-flight requests before exiting.

pub mod shutdown;

pub use shutdown::Shutdown;
