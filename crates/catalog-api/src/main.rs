//! Catalog API server entry point.

use sqlx::postgres::PgPoolOptions;

use catalog_api::config::ApiConfig;
use catalog_api::error::AppError;
use catalog_api::state::AppState;
use catalog_api::telemetry;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let config = ApiConfig::from_env()?;
    let telemetry = telemetry::init(&config)?;

    tracing::info!("Starting catalog API server");

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await?;

    sqlx::migrate!("../../migrations").run(&pool).await?;

    let app = catalog_api::app(AppState::from_pool(pool));

    let addr = config.bind_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", addr);

    let served = axum::serve(listener, app).await;
    telemetry.shutdown();
    served?;

    Ok(())
}
