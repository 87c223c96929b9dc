//! Chalkboard visualization server binary.

use chalkboard_vis::{VisConfig, VisServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chalkboard_vis=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = VisConfig::from_env()?;
    tracing::info!(
        addr = %config.addr,
        len = config.sequence.len,
        seeded = config.seed.is_some(),
        "starting chalkboard server"
    );

    VisServer::new(config).serve().await?;
    Ok(())
}
