//! # Assura Ledger
//!
//! Policy registry for the Assura system.
//!
//! ## Components
//!
//! - **Ledger**: sequentially numbered policies and per-subscriber selections
//! - **Events**: broadcast notifications for created and selected policies
//! - **Clock**: time source for renewal due dates
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │                     PolicyLedger                       │
//! ├────────────────────────────────────────────────────────┤
//! │  ┌───────────────┐  ┌────────────────┐  ┌───────────┐  │
//! │  │ RoleAuthority │  │ PriceConverter │  │ EventBus  │  │
//! │  │ (admin/user)  │──│  (price feed)  │──│(broadcast)│  │
//! │  └───────────────┘  └────────────────┘  └───────────┘  │
//! └────────────────────────────────────────────────────────┘
//! ```

pub mod clock;
pub mod config;
pub mod events;
pub mod ledger;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{LedgerConfig, PriceSettings};
pub use events::{EventBus, LedgerEvent, LedgerNotification};
pub use ledger::PolicyLedger;

use std::sync::Arc;

use assura_common::{Result, RoleAuthority};
use assura_oracle::ReferencePriceFeed;

/// A wired-up ledger together with the feed it reads
pub struct Deployment {
    pub ledger: Arc<PolicyLedger>,
    pub feed: Arc<ReferencePriceFeed>,
}

impl Deployment {
    /// Build the role authority, reference feed and ledger from `config`
    pub fn from_config(config: &LedgerConfig) -> Result<Self> {
        config.validate()?;

        let roles = Arc::new(RoleAuthority::new(config.admins.iter().cloned())?);
        let feed = Arc::new(
            ReferencePriceFeed::new(config.price.answer, config.price.decimals)
                .with_description(config.price.description.clone()),
        );
        let ledger = PolicyLedger::new(roles, feed.clone())
            .with_event_capacity(config.event_capacity);

        Ok(Self {
            ledger: Arc::new(ledger),
            feed,
        })
    }
}
