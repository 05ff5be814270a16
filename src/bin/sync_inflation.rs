use pricewatch_api::{
    fred::{sync_inflation_data, FredClient},
    Config, Database,
};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sync_inflation=info,pricewatch_api=info".into()),
        )
        .init();

    let config = Config::from_env()?;
    let db = Database::connect(&config.database.url).await?;
    db.migrate().await?;

    let client = FredClient::new(&config.fred)?;
    let summary = sync_inflation_data(db.pool(), &client).await?;

    info!(
        "Inflation data sync complete: {} series synced, {} skipped, {} new observations",
        summary.synced_series, summary.skipped_series, summary.inserted
    );

    Ok(())
}
