use tokio::net::TcpListener;

use veilgate::config::{self, ServerSettings};
use veilgate::http::HttpServer;
use veilgate::lifecycle::Shutdown;
use veilgate::observability;
use veilgate::routing::Registry;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    observability::logging::init();

    let settings = ServerSettings::from_env();
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = ?settings.environment,
        "veilgate starting"
    );

    let config = match config::load_config(&settings.config_path) {
        Ok(config) => config,
        Err(error) => {
            tracing::error!(
                path = %settings.config_path.display(),
                error = %error,
                "Failed to load configuration"
            );
            return Err(error.into());
        }
    };
    tracing::info!(targets = config.targets.len(), "Configuration loaded");

    let registry = Registry::from_config(&config.targets)?;

    let listener = TcpListener::bind(("0.0.0.0", settings.port)).await?;

    let shutdown = Shutdown::new();
    shutdown.listen_for_ctrl_c();

    let server = HttpServer::new(config, registry, &settings);
    server.run(listener, shutdown.subscribe()).await?;

    Ok(())
}
