//! Per-target request forwarding.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::request::Parts;
use axum::http::{header, Request};
use axum::response::Response;
use hyper::body::Incoming;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use thiserror::Error;
use tokio::time::timeout;

use crate::http::request::RequestIdExt;
use crate::http::response;
use crate::routing::registry::Target;
use crate::routing::rewrite::rewrite_path;
use crate::security::headers::{merge_static, sanitize, strip_hop_by_hop};

/// Shared upstream client. Cloning is cheap; all forwarders reuse one
/// connection pool.
pub type HttpClient = Client<HttpConnector, Body>;

/// A failure on the upstream leg of a proxied request. Reported to the
/// caller as the structured 500 body, never retried.
#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("request to {url} timed out after {after:?}")]
    Timeout { url: String, after: Duration },

    #[error("request to {url} failed")]
    Transport {
        url: String,
        #[source]
        source: hyper_util::client::legacy::Error,
    },

    #[error("could not build upstream request")]
    BadRequest(#[source] axum::http::Error),
}

/// Forwards matched requests to one target backend.
pub struct Forwarder {
    target: Arc<Target>,
    client: HttpClient,
    request_timeout: Duration,
}

impl Forwarder {
    pub fn new(target: Arc<Target>, client: HttpClient, request_timeout: Duration) -> Self {
        Self {
            target,
            client,
            request_timeout,
        }
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    /// Handle a request already matched to this forwarder's target: rewrite
    /// the path, scrub and merge headers, send upstream, and relay the
    /// response. Transport failures become the structured error response.
    pub async fn handle(&self, request: Request<Body>) -> Response {
        let request_id = request.request_id().unwrap_or("unknown").to_owned();
        let (parts, body) = request.into_parts();

        let rewritten = rewrite_path(parts.uri.path(), self.target.path_prefix());
        tracing::debug!(
            request_id = %request_id,
            method = %parts.method,
            original = %parts.uri.path(),
            rewritten = %rewritten,
            upstream = %self.target.upstream(),
            "Forwarding request"
        );

        match self.forward(parts, body, &rewritten).await {
            Ok(upstream) => response::relay(upstream),
            Err(error) => {
                tracing::error!(
                    request_id = %request_id,
                    upstream = %self.target.upstream(),
                    error = %error,
                    "Proxy error"
                );
                response::proxy_error(&describe(&error))
            }
        }
    }

    async fn forward(
        &self,
        parts: Parts,
        body: Body,
        rewritten: &str,
    ) -> Result<axum::http::Response<Incoming>, ProxyError> {
        let uri = self
            .target
            .upstream_uri(rewritten, parts.uri.query())
            .map_err(ProxyError::BadRequest)?;
        let url = uri.to_string();

        let mut headers = parts.headers;
        strip_hop_by_hop(&mut headers);
        sanitize(&mut headers);
        merge_static(&mut headers, self.target.static_headers());
        headers.insert(header::HOST, self.target.host_header().clone());

        let mut outbound = Request::builder()
            .method(parts.method)
            .uri(uri)
            .body(body)
            .map_err(ProxyError::BadRequest)?;
        *outbound.headers_mut() = headers;

        match timeout(self.request_timeout, self.client.request(outbound)).await {
            Ok(Ok(upstream)) => Ok(upstream),
            Ok(Err(source)) => Err(ProxyError::Transport { url, source }),
            Err(_) => Err(ProxyError::Timeout {
                url,
                after: self.request_timeout,
            }),
        }
    }
}

/// Flatten an error and its sources into one message, so the caller sees
/// the underlying cause (connection refused, DNS failure, ...) and not just
/// the top-level wrapper.
fn describe(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
