use std::sync::Arc;

use movie_recommender::{
    db::{create_pool, PgCatalog},
    routes::{create_router, AppState},
    telemetry, Config,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init();

    let config = Config::from_env()?;

    let pool = create_pool(&config.database_url, config.db_max_connections).await?;
    let catalog = PgCatalog::new(pool.clone());

    let state = AppState::from_config(Arc::new(catalog), &config);
    let app = create_router(state);

    let addr = config.server_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, policy = %config.recommendation_policy, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            match tokio::signal::ctrl_c().await {
                Ok(()) => tracing::info!("Shutdown signal received"),
                Err(e) => tracing::error!(error = %e, "Failed to listen for shutdown signal"),
            }
        })
        .await?;

    pool.close().await;
    Ok(())
}
