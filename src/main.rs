use dotenvy::dotenv;
use gift_order::{
    config::{database, sweep},
    core::sweeper::run_expiry_sweep,
    errors::Result,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file, non-fatal since env vars can be set externally
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Load sweep settings
    let config = sweep::load_default_config()
        .inspect_err(|e| error!("Failed to load configuration: {}", e))?;
    info!(
        "Expiry sweep every {} seconds.",
        config.sweep.interval_secs
    );

    // 4. Connect and make sure the gifts table exists
    let db = database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db)
        .await
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to create tables: {}", e))?;

    // 5. Expire overdue gifts until interrupted
    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl-C: {}", e);
        }
    };
    let expired = run_expiry_sweep(&db, config.sweep.interval(), shutdown).await;
    info!("Expiry sweep stopped after expiring {} gift(s).", expired);

    db.close().await?;
    Ok(())
}
