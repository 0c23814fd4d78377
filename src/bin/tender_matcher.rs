//! Tender Matcher — consumes `tender.ready_for_matching` events off RabbitMQ
//! and matches each tender position against the product catalog.

use mimalloc::MiMalloc;
use server::Settings;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(&settings.logging.level)
        .with_target(false)
        .with_thread_ids(true)
        .json()
        .init();

    tracing::info!(
        health_addr = %format!("{}:{}", settings.health.host, settings.health.port),
        search_index = %settings.search.index,
        "starting tender-matcher"
    );

    if let Err(err) = tender_matcher::run(settings).await {
        tracing::error!(error = %err, "tender-matcher exited with a fatal error");
        return Err(err.into());
    }

    Ok(())
}
