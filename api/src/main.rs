use std::error::Error;

use foodwaste_api::app::{self, AppState};
use foodwaste_api::config::{Config, LOG_ENV};
use foodwaste_api::store::EventStore;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_env(LOG_ENV)
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();
    let config = Config::from_env();

    let store = EventStore::connect(&config.database_url).await?;
    if !store.ensure_schema().await? {
        info!("using existing FoodWaste table");
    }

    let state = AppState::new(store);

    let app = app::create_router(state);
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!(addr = %config.bind_addr, database = %config.database_url, "listening");

    axum::serve(listener, app).await?;

    Ok(())
}
