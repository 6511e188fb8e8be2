//! Outbound request hygiene.
//!
//! # Responsibilities
//! - Strip client-identifying headers before a request leaves the proxy
//! - Strip hop-by-hop headers on both legs
//! - Merge per-target static headers, static values winning
//!
//! # Design Decisions
//! - The backend must never learn the caller's network address; nothing in
//!   the forwarding path re-adds identity headers after sanitization
//! - Static headers are operator configuration and are merged last

pub mod headers;
