//! Configuration schema definitions.
//!
//! All types derive Serde traits so the loaded configuration can be
//! deserialized from the config file and re-serialized verbatim by the
//! development introspection endpoint.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Root configuration for the proxy.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    /// Proxy targets, consulted in the order they are declared.
    pub targets: Vec<TargetConfig>,

    /// Timeout configuration for upstream calls.
    #[serde(default)]
    pub timeouts: TimeoutConfig,
}

/// One proxied backend, mounted under a path prefix.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TargetConfig {
    /// Mount point, without the leading slash (e.g. `"api"`). Requests whose
    /// path starts with `/<path>` are forwarded to this target.
    pub path: String,

    /// Absolute base URL of the backend (scheme, host, optional port,
    /// optional base path).
    pub url: String,

    /// Static headers merged into every forwarded request. On a name
    /// collision with an inbound header, the static value wins.
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

/// Timeouts applied to the upstream leg of each request.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Connection establishment timeout in seconds.
    pub connect_secs: u64,

    /// Total time allowed for the upstream request/response exchange in
    /// seconds. Expiry is reported like any other transport failure.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs: 5,
            request_secs: 30,
        }
    }
}
