//! Shared utilities for integration tests.

use std::collections::{BTreeMap, HashMap};
use std::net::SocketAddr;
use std::time::Duration;

use axum::extract::Request;
use axum::http::StatusCode;
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use veilgate::config::{Config, Environment, ServerSettings, TargetConfig};
use veilgate::http::HttpServer;
use veilgate::lifecycle::Shutdown;
use veilgate::routing::Registry;

/// Start a backend that reports everything it receives as JSON.
pub async fn start_echo_backend() -> SocketAddr {
    serve_app(Router::new().fallback(echo)).await
}

async fn echo(request: Request) -> Json<Value> {
    let (parts, body) = request.into_parts();
    let body = axum::body::to_bytes(body, 1024 * 1024)
        .await
        .unwrap_or_default();
    let headers: BTreeMap<String, String> = parts
        .headers
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_owned(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect();
    Json(json!({
        "method": parts.method.as_str(),
        "path": parts.uri.path(),
        "query": parts.uri.query(),
        "headers": headers,
        "body": String::from_utf8_lossy(&body),
    }))
}

/// Start a backend that always answers with a fixed status, header, and body.
pub async fn start_fixed_backend(status: StatusCode, body: &'static str) -> SocketAddr {
    let app = Router::new().fallback(move || async move {
        (status, [("x-backend", "fixed")], body)
    });
    serve_app(app).await
}

/// Start a backend that answers only after `delay`.
pub async fn start_slow_backend(delay: Duration) -> SocketAddr {
    let app = Router::new().fallback(move || async move {
        tokio::time::sleep(delay).await;
        "late"
    });
    serve_app(app).await
}

async fn serve_app(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// Spawn the proxy on an ephemeral port. The returned `Shutdown` keeps the
/// server alive; dropping it stops the server.
pub async fn start_proxy(config: Config, environment: Environment) -> (SocketAddr, Shutdown) {
    let registry = Registry::from_config(&config.targets).unwrap();
    let settings = ServerSettings {
        port: 0,
        environment,
        config_path: "config.json".into(),
    };
    let server = HttpServer::new(config, registry, &settings);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();
    tokio::spawn(async move {
        server.run(listener, rx).await.unwrap();
    });

    (addr, shutdown)
}

pub fn target(path: &str, addr: SocketAddr) -> TargetConfig {
    target_url(path, &format!("http://{addr}"))
}

pub fn target_url(path: &str, url: &str) -> TargetConfig {
    TargetConfig {
        path: path.to_string(),
        url: url.to_string(),
        headers: HashMap::new(),
    }
}

pub fn config_with(targets: Vec<TargetConfig>) -> Config {
    Config {
        targets,
        ..Config::default()
    }
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}
