//! Melrose Mobile Restrooms server entry point.

use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use melrose_web::cache::{start_cache_warmer, AppCache};
use melrose_web::config::Config;
use melrose_web::geo::GeoClient;
use melrose_web::{app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("melrose_web=debug,tower_http=info")),
        )
        .init();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;

    info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await?;

    info!("Running database migrations...");
    sqlx::migrate!().run(&pool).await?;

    let cache = AppCache::new();
    tokio::spawn(start_cache_warmer(cache.clone(), pool.clone()));

    let state = AppState {
        db: pool,
        cache,
        geo: GeoClient::new(config.geocoder_url.clone()),
    };

    let listener = TcpListener::bind(&config.bind_addr).await?;
    info!("Listening on {}", config.bind_addr);

    axum::serve(listener, app(state)).await?;

    Ok(())
}
