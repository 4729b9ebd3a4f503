use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use z_train_server::cache::{CacheConfig, CachedTrainSource};
use z_train_server::config::ServerConfig;
use z_train_server::digitraffic::{DigitrafficClient, MockTrainSource, TrainSource};
use z_train_server::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("{}=info,tower_http=info", env!("CARGO_CRATE_NAME")).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env().expect("Invalid configuration");

    // Mock file replaces the live API entirely
    let source: Arc<dyn TrainSource> = match &config.mock_trains_file {
        Some(path) => {
            let mock = MockTrainSource::new(path, &config.digitraffic.line_id)
                .expect("Failed to load mock trains");
            warn!(?path, trains = mock.len(), "serving mock trains, not live data");
            Arc::new(mock)
        }
        None => {
            let client = DigitrafficClient::new(config.digitraffic.clone())
                .expect("Failed to create Digitraffic client");
            info!(
                base_url = %config.digitraffic.base_url,
                line = client.line_id(),
                "using Digitraffic"
            );
            Arc::new(client)
        }
    };

    let source: Arc<dyn TrainSource> = match config.cache_ttl {
        Some(ttl) => {
            info!(?ttl, "caching trains");
            Arc::new(CachedTrainSource::new(source, &CacheConfig::new(ttl)))
        }
        None => source,
    };

    let app = create_router(AppState::new(source), &config.static_dir);

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind");

    info!("Z-train board listening on http://{addr}");
    info!("  GET  /                  - Dashboard");
    info!("  GET  /health            - Health check");
    info!("  GET  /api/next-z-train  - Next departures (station, target, count)");

    axum::serve(listener, app).await.expect("Server error");
}
