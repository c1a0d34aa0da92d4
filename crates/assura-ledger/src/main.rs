//! Assura node binary
//!
//! Wires the role authority, reference price feed and policy ledger from the
//! environment and logs ledger notifications until shutdown.

use anyhow::Result;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use assura_common::VERSION;
use assura_ledger::{Deployment, LedgerConfig};
use assura_oracle::PriceFeed;
use tokio::sync::broadcast::error::RecvError;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    info!("Starting Assura node v{}", VERSION);

    let config = LedgerConfig::load()?;
    info!("Loaded configuration: {:?}", config);

    let ledger = Deployment::from_config(&config)?.ledger;

    info!(
        admins = ?ledger.roles().admins(),
        "Role authority ready"
    );
    info!(
        feed = %ledger.converter().feed().description(),
        rate = %ledger.converter().latest_rate()?,
        "Reference price feed ready"
    );

    let mut notifications = ledger.subscribe();
    let listener = tokio::spawn(async move {
        loop {
            match notifications.recv().await {
                Ok(n) => match n.to_json() {
                    Ok(payload) => info!(event_id = %n.event_id, %payload, "Ledger event"),
                    Err(e) => warn!(error = %e, "Failed to encode ledger event"),
                },
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Notification listener lagged");
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    tokio::signal::ctrl_c().await?;
    info!("Received shutdown signal");

    listener.abort();
    info!(policies = ledger.policy_count(), "Shutting down Assura node");
    Ok(())
}
