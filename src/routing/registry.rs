//! The target registry: compiled route definitions.
//!
//! Built exactly once at startup from the validated configuration and never
//! mutated afterwards, so it can be shared across all request handlers
//! without locking.

use std::sync::Arc;

use axum::http::header::{HeaderMap, HeaderName, HeaderValue, InvalidHeaderName, InvalidHeaderValue};
use axum::http::uri::{Authority, Scheme, Uri};
use thiserror::Error;
use url::Url;

use crate::config::schema::TargetConfig;

/// Error raised while compiling a `TargetConfig` into a `Target`.
///
/// `config::validation` reports these same problems ahead of time with full
/// diagnostics; compilation still refuses bad input rather than trusting the
/// caller to have validated.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("target {path:?}: path prefix must not be empty")]
    EmptyPrefix { path: String },

    #[error("target {path:?}: invalid upstream url {url:?}")]
    InvalidUrl {
        path: String,
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("target {path:?}: upstream url {url:?} must be absolute http or https")]
    UnsupportedUpstream { path: String, url: String },

    #[error("target {path:?}: invalid static header name {name:?}")]
    InvalidHeaderName {
        path: String,
        name: String,
        #[source]
        source: InvalidHeaderName,
    },

    #[error("target {path:?}: invalid static header value for {name:?}")]
    InvalidHeaderValue {
        path: String,
        name: String,
        #[source]
        source: InvalidHeaderValue,
    },
}

/// One configured backend, compiled for dispatch.
#[derive(Debug, Clone)]
pub struct Target {
    prefix: String,
    mount: String,
    upstream: Url,
    scheme: Scheme,
    authority: Authority,
    base_path: String,
    host_value: HeaderValue,
    static_headers: HeaderMap,
}

impl Target {
    pub fn from_config(config: &TargetConfig) -> Result<Self, RegistryError> {
        let prefix = config.path.trim_start_matches('/').to_string();
        if prefix.is_empty() {
            return Err(RegistryError::EmptyPrefix {
                path: config.path.clone(),
            });
        }

        let upstream = Url::parse(&config.url).map_err(|source| RegistryError::InvalidUrl {
            path: config.path.clone(),
            url: config.url.clone(),
            source,
        })?;

        let unsupported = || RegistryError::UnsupportedUpstream {
            path: config.path.clone(),
            url: config.url.clone(),
        };

        let scheme = match upstream.scheme() {
            "http" => Scheme::HTTP,
            "https" => Scheme::HTTPS,
            _ => return Err(unsupported()),
        };

        let host = upstream.host_str().ok_or_else(unsupported)?;
        let authority = match upstream.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        };
        let authority: Authority = authority.parse().map_err(|_| unsupported())?;
        let host_value =
            HeaderValue::from_str(authority.as_str()).map_err(|_| unsupported())?;

        let base_path = upstream.path().trim_end_matches('/').to_string();

        let mut static_headers = HeaderMap::with_capacity(config.headers.len());
        for (name, value) in &config.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|source| {
                RegistryError::InvalidHeaderName {
                    path: config.path.clone(),
                    name: name.clone(),
                    source,
                }
            })?;
            let header_value =
                HeaderValue::from_str(value).map_err(|source| RegistryError::InvalidHeaderValue {
                    path: config.path.clone(),
                    name: name.clone(),
                    source,
                })?;
            static_headers.insert(header_name, header_value);
        }

        Ok(Self {
            mount: format!("/{prefix}"),
            prefix,
            upstream,
            scheme,
            authority,
            base_path,
            host_value,
            static_headers,
        })
    }

    /// Literal prefix match against the request path.
    pub fn matches(&self, path: &str) -> bool {
        path.starts_with(&self.mount)
    }

    pub fn path_prefix(&self) -> &str {
        &self.prefix
    }

    pub fn upstream(&self) -> &Url {
        &self.upstream
    }

    pub fn static_headers(&self) -> &HeaderMap {
        &self.static_headers
    }

    /// The `Host` header value the backend should see.
    pub fn host_header(&self) -> &HeaderValue {
        &self.host_value
    }

    /// Build the full upstream URI for a rewritten path, carrying the
    /// original query string unchanged.
    pub fn upstream_uri(
        &self,
        rewritten_path: &str,
        query: Option<&str>,
    ) -> Result<Uri, axum::http::Error> {
        let mut path_and_query =
            String::with_capacity(self.base_path.len() + rewritten_path.len());
        path_and_query.push_str(&self.base_path);
        path_and_query.push_str(rewritten_path);
        if let Some(query) = query {
            path_and_query.push('?');
            path_and_query.push_str(query);
        }

        Uri::builder()
            .scheme(self.scheme.clone())
            .authority(self.authority.clone())
            .path_and_query(path_and_query.as_str())
            .build()
    }
}

/// Immutable, ordered collection of targets.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    targets: Vec<Arc<Target>>,
}

impl Registry {
    /// Compile the configured targets, preserving declaration order.
    pub fn from_config(configs: &[TargetConfig]) -> Result<Self, RegistryError> {
        let mut targets = Vec::with_capacity(configs.len());
        for config in configs {
            let target = Target::from_config(config)?;
            tracing::info!(
                prefix = %target.path_prefix(),
                upstream = %target.upstream(),
                "Registered proxy target"
            );
            targets.push(Arc::new(target));
        }
        Ok(Self { targets })
    }

    /// Index of the first target whose mount point prefixes `path`.
    ///
    /// Declaration order is the tie-break: a duplicate or overlapping prefix
    /// registered later is never selected.
    pub fn match_path(&self, path: &str) -> Option<usize> {
        self.targets.iter().position(|target| target.matches(path))
    }

    pub fn targets(&self) -> &[Arc<Target>] {
        &self.targets
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}
