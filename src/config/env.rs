//! Environment surface.
//!
//! Everything the process reads from the environment is parsed here, once,
//! into a `ServerSettings` value.

use std::env;
use std::path::PathBuf;

/// Listening port used when `PORT` is unset or unparseable.
pub const DEFAULT_PORT: u16 = 3000;

/// Deployment mode, selected by `APP_ENV`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Production,
    Development,
}

impl Environment {
    pub fn is_production(self) -> bool {
        self == Environment::Production
    }

    fn from_name(name: Option<&str>) -> Self {
        match name {
            Some("production") => Environment::Production,
            _ => Environment::Development,
        }
    }
}

/// Process-level settings read from the environment at startup.
#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub port: u16,
    pub environment: Environment,
    pub config_path: PathBuf,
}

impl ServerSettings {
    pub fn from_env() -> Self {
        Self {
            port: parse_port(env::var("PORT").ok().as_deref()),
            environment: Environment::from_name(env::var("APP_ENV").ok().as_deref()),
            config_path: env::var("CONFIG_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("config.json")),
        }
    }
}

fn parse_port(value: Option<&str>) -> u16 {
    value.and_then(|v| v.parse().ok()).unwrap_or(DEFAULT_PORT)
}
