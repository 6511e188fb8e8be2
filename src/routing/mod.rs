//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Registry compilation (at startup):
//!     TargetConfig[]
//!     → registry.rs (parse urls, precompute mount points, freeze)
//!     → immutable Registry, shared via Arc
//!
//! Incoming request path
//!     → registry.rs (first matching target, in declaration order)
//!     → rewrite.rs (strip the matched mount point)
//! ```
//!
//! # Design Decisions
//! - Targets compiled at startup, immutable at runtime
//! - Literal prefix matching only, no patterns in the hot path
//! - First match wins; later overlapping prefixes are shadowed, which is a
//!   documented tie-break rather than an error

pub mod registry;
pub mod rewrite;

pub use registry::{Registry, RegistryError, Target};
pub use rewrite::rewrite_path;
