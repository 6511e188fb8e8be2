//! Observability subsystem.
//!
//! Structured logging only. Registered routes, forwarded requests with
//! their rewrites, and unmatched requests are all logged; none of it is
//! part of the functional contract.

pub mod logging;
