//! Price feeds
//!
//! A feed exposes its latest answer together with the answer's decimal
//! precision. Consumers read both in one call so a conversion never mixes an
//! answer from one round with decimals from another.

use assura_common::Result;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

/// One feed answer and the precision it is expressed in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRound {
    /// Monotonic round counter
    pub round_id: u64,
    /// Raw answer, scaled by 10^decimals
    pub answer: i128,
    /// Decimal precision of `answer`
    pub decimals: u8,
    /// When the answer was last written
    pub updated_at: DateTime<Utc>,
}

impl PriceRound {
    /// Answer as a human-readable decimal, if it fits
    pub fn rate(&self) -> Option<Decimal> {
        Decimal::try_from_i128_with_scale(self.answer, u32::from(self.decimals)).ok()
    }
}

/// Source of the latest reference price
pub trait PriceFeed: Send + Sync {
    /// Latest answer and its precision, read atomically
    fn latest_round(&self) -> Result<PriceRound>;

    /// Decimal precision of the answers
    fn decimals(&self) -> Result<u8> {
        Ok(self.latest_round()?.decimals)
    }

    /// Human-readable pair name, e.g. "ETH / USD"
    fn description(&self) -> String;
}

/// In-process reference feed
///
/// Holds a single round that an operator may overwrite. Reads never mutate
/// the feed.
pub struct ReferencePriceFeed {
    description: String,
    round: RwLock<PriceRound>,
}

impl ReferencePriceFeed {
    /// Create a feed with an initial answer
    pub fn new(answer: i128, decimals: u8) -> Self {
        Self {
            description: "reference".to_string(),
            round: RwLock::new(PriceRound {
                round_id: 1,
                answer,
                decimals,
                updated_at: Utc::now(),
            }),
        }
    }

    /// Set the pair description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Publish a new answer, starting a new round
    pub fn update_answer(&self, answer: i128) -> PriceRound {
        let mut round = self.round.write();
        round.round_id += 1;
        round.answer = answer;
        round.updated_at = Utc::now();
        info!(
            feed = %self.description,
            round_id = round.round_id,
            answer,
            "Reference price updated"
        );
        round.clone()
    }
}

impl PriceFeed for ReferencePriceFeed {
    fn latest_round(&self) -> Result<PriceRound> {
        Ok(self.round.read().clone())
    }

    fn description(&self) -> String {
        self.description.clone()
    }
}
