use std::error::Error;
use std::sync::Arc;

use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use stock_reserve::config::{Config, StoreBackend};
use stock_reserve::store::{InMemoryStore, RedisStore, ReservationStore};
use stock_reserve::{Catalog, Engine, api};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;

    let store: Arc<dyn ReservationStore> = match config.store {
        StoreBackend::Redis => {
            let url = config.redis_url();
            info!(%url, "connecting to reservation store");
            Arc::new(RedisStore::connect(&url).await?)
        }
        StoreBackend::Memory => Arc::new(InMemoryStore::new()),
    };

    let engine = Engine::new(Catalog::default(), store).with_max_retries(config.max_retries);
    let app = api::routes(engine).layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(config.listen_addr()).await?;
    info!("Server is running on http://localhost:{}", config.port);
    axum::serve(listener, app).await?;

    Ok(())
}
