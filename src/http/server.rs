//! HTTP server setup and dispatch.
//!
//! # Responsibilities
//! - Create the Axum router with the catch-all proxy handler
//! - Wire up middleware (request ID, tracing)
//! - Dispatch each request to the first matching target's forwarder
//! - Answer unmatched requests with the structured not-proxied body
//! - Expose the loaded configuration on `GET /` outside production

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::response::Response;
use axum::routing::{any, get};
use axum::{Json, Router};
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;

use crate::config::{Config, ServerSettings};
use crate::http::request::{RequestIdExt, RequestIdLayer};
use crate::http::response;
use crate::proxy::{Forwarder, HttpClient};
use crate::routing::Registry;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    registry: Arc<Registry>,
    /// Index-aligned with the registry's targets.
    forwarders: Arc<Vec<Forwarder>>,
    config: Arc<Config>,
}

/// HTTP server for the reverse proxy.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Build the server from a loaded configuration and compiled registry.
    pub fn new(config: Config, registry: Registry, settings: &ServerSettings) -> Self {
        let mut connector = HttpConnector::new();
        connector.set_connect_timeout(Some(Duration::from_secs(config.timeouts.connect_secs)));
        let client: HttpClient = Client::builder(TokioExecutor::new()).build(connector);

        let request_timeout = Duration::from_secs(config.timeouts.request_secs);
        let forwarders: Vec<Forwarder> = registry
            .targets()
            .iter()
            .map(|target| Forwarder::new(target.clone(), client.clone(), request_timeout))
            .collect();

        let state = AppState {
            registry: Arc::new(registry),
            forwarders: Arc::new(forwarders),
            config: Arc::new(config),
        };

        // Outside production, GET / dumps the loaded configuration; every
        // other request on / goes through normal dispatch.
        let root = if settings.environment.is_production() {
            any(proxy_handler)
        } else {
            get(show_config).fallback(proxy_handler)
        };

        let router = Router::new()
            .route("/{*path}", any(proxy_handler))
            .route("/", root)
            .with_state(state)
            .layer(RequestIdLayer)
            .layer(TraceLayer::new_for_http());

        Self { router }
    }

    /// Run the server until the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> std::io::Result<()> {
        let address = listener.local_addr()?;
        tracing::info!(address = %address, "Reverse proxy listening");

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Dispatch: first matching target wins, in registration order; anything
/// else falls through to the not-proxied response.
async fn proxy_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let matched = state.registry.match_path(request.uri().path());
    match matched {
        Some(index) => state.forwarders[index].handle(request).await,
        None => {
            tracing::info!(
                request_id = %request.request_id().unwrap_or("unknown"),
                method = %request.method(),
                path = %request.uri().path(),
                "Request matched no target"
            );
            response::not_proxied(request.uri().path())
        }
    }
}

/// Development-only introspection: the loaded configuration, verbatim.
async fn show_config(State(state): State<AppState>) -> Json<Config> {
    Json((*state.config).clone())
}
