use movie_recommender::{
    db::{create_pool, PgCatalog},
    services::{recommend_for_user, Recommender},
    telemetry, Config,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    telemetry::init();

    let config = Config::from_env()?;

    let pool = create_pool(&config.database_url, config.db_max_connections).await?;
    let catalog = PgCatalog::new(pool);

    let recommender =
        Recommender::new(config.recommendation_policy).with_min_rating(config.min_rating);

    let result = recommend_for_user(
        &catalog,
        &recommender,
        config.target_user_id,
        config.n_recommendations,
    )
    .await;

    catalog.pool().close().await;

    println!("{}", result?);
    Ok(())
}
