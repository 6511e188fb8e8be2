//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (JSON)
//!     → loader.rs (read & deserialize)
//!     → validation.rs (semantic checks, all errors collected)
//!     → Config (validated, immutable)
//!     → compiled into routing::Registry at startup
//!
//! environment
//!     → env.rs (PORT, APP_ENV, CONFIG_PATH)
//!     → ServerSettings
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no reload path
//! - Loading or validation failure is fatal before the listener binds
//! - Validation separates syntactic (serde) from semantic checks

pub mod env;
pub mod loader;
pub mod schema;
pub mod validation;

pub use env::{Environment, ServerSettings};
pub use loader::{load_config, ConfigError};
pub use schema::{Config, TargetConfig, TimeoutConfig};
