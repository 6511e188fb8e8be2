//! Configuration validation.
//!
//! Semantic checks on a syntactically valid `Config`. All errors are
//! collected and returned together rather than failing on the first, so a
//! broken config file can be fixed in one pass.

use axum::http::header::{HeaderName, HeaderValue};
use thiserror::Error;
use url::Url;

use crate::config::schema::Config;

/// A single semantic problem found in the configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("targets[{index}]: `path` must not be empty")]
    EmptyPath { index: usize },

    #[error("targets[{index}]: `url` must not be empty")]
    EmptyUrl { index: usize },

    #[error("targets[{index}]: invalid `url` {url:?}: {reason}")]
    InvalidUrl {
        index: usize,
        url: String,
        reason: String,
    },

    #[error("targets[{index}]: invalid static header {name:?}")]
    InvalidHeader { index: usize, name: String },

    #[error("timeouts.{field} must be greater than zero")]
    ZeroTimeout { field: &'static str },
}

/// Validate a parsed configuration, returning every problem found.
pub fn validate_config(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    for (index, target) in config.targets.iter().enumerate() {
        if target.path.trim_start_matches('/').is_empty() {
            errors.push(ValidationError::EmptyPath { index });
        }

        if target.url.is_empty() {
            errors.push(ValidationError::EmptyUrl { index });
        } else {
            match Url::parse(&target.url) {
                Ok(url) => {
                    if !matches!(url.scheme(), "http" | "https") {
                        errors.push(ValidationError::InvalidUrl {
                            index,
                            url: target.url.clone(),
                            reason: format!("unsupported scheme {:?}", url.scheme()),
                        });
                    } else if url.host_str().is_none() {
                        errors.push(ValidationError::InvalidUrl {
                            index,
                            url: target.url.clone(),
                            reason: "missing host".to_string(),
                        });
                    }
                }
                Err(e) => errors.push(ValidationError::InvalidUrl {
                    index,
                    url: target.url.clone(),
                    reason: e.to_string(),
                }),
            }
        }

        for (name, value) in &target.headers {
            if HeaderName::from_bytes(name.as_bytes()).is_err()
                || HeaderValue::from_str(value).is_err()
            {
                errors.push(ValidationError::InvalidHeader {
                    index,
                    name: name.clone(),
                });
            }
        }
    }

    if config.timeouts.connect_secs == 0 {
        errors.push(ValidationError::ZeroTimeout {
            field: "connect_secs",
        });
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout {
            field: "request_secs",
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
