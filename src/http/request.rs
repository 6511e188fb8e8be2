//! Request identity.
//!
//! Assigns every inbound request an `x-request-id` as early as possible so
//! log lines across the dispatch and forwarding path can be correlated. An
//! ID supplied by the client is kept; otherwise a UUID v4 is generated.

use std::task::{Context, Poll};

use axum::http::{HeaderValue, Request};
use tower::{Layer, Service};
use uuid::Uuid;

pub const X_REQUEST_ID: &str = "x-request-id";

/// Request extension carrying the correlation ID.
#[derive(Debug, Clone)]
pub struct RequestId(String);

impl RequestId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Layer that applies [`RequestIdService`] to the inner service.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestIdLayer;

impl<S> Layer<S> for RequestIdLayer {
    type Service = RequestIdService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RequestIdService { inner }
    }
}

#[derive(Debug, Clone)]
pub struct RequestIdService<S> {
    inner: S,
}

impl<S, B> Service<Request<B>> for RequestIdService<S>
where
    S: Service<Request<B>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut request: Request<B>) -> Self::Future {
        let existing = request
            .headers()
            .get(X_REQUEST_ID)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);

        let id = match existing {
            Some(id) => id,
            None => {
                let generated = Uuid::new_v4().to_string();
                if let Ok(value) = HeaderValue::from_str(&generated) {
                    request.headers_mut().insert(X_REQUEST_ID, value);
                }
                generated
            }
        };

        request.extensions_mut().insert(RequestId(id));
        self.inner.call(request)
    }
}

/// Accessor for the correlation ID set by [`RequestIdLayer`].
pub trait RequestIdExt {
    fn request_id(&self) -> Option<&str>;
}

impl<B> RequestIdExt for Request<B> {
    fn request_id(&self) -> Option<&str> {
        self.extensions().get::<RequestId>().map(RequestId::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;
    use tower::{service_fn, ServiceExt};

    async fn echo(request: Request<()>) -> Result<Request<()>, Infallible> {
        Ok(request)
    }

    #[tokio::test]
    async fn generates_an_id_when_missing() {
        let service = RequestIdLayer.layer(service_fn(echo));
        let request = Request::builder().uri("/x").body(()).unwrap();

        let seen = service.oneshot(request).await.unwrap();

        let header = seen.headers().get(X_REQUEST_ID).unwrap().to_str().unwrap();
        assert!(Uuid::parse_str(header).is_ok());
        assert_eq!(seen.request_id(), Some(header));
    }

    #[tokio::test]
    async fn keeps_a_client_supplied_id() {
        let service = RequestIdLayer.layer(service_fn(echo));
        let request = Request::builder()
            .uri("/x")
            .header(X_REQUEST_ID, "abc-123")
            .body(())
            .unwrap();

        let seen = service.oneshot(request).await.unwrap();

        assert_eq!(seen.headers()[X_REQUEST_ID], "abc-123");
        assert_eq!(seen.request_id(), Some("abc-123"));
    }
}
