//! Nominal-to-target price conversion

use std::sync::Arc;

use assura_common::{PriceError, Result};
use rust_decimal::Decimal;
use tracing::{debug, instrument};

use crate::feed::{PriceFeed, PriceRound};

/// Converts nominal amounts into the feed's target unit
#[derive(Clone)]
pub struct PriceConverter {
    feed: Arc<dyn PriceFeed>,
}

impl PriceConverter {
    pub fn new(feed: Arc<dyn PriceFeed>) -> Self {
        Self { feed }
    }

    /// Underlying feed
    pub fn feed(&self) -> &Arc<dyn PriceFeed> {
        &self.feed
    }

    /// Convert `nominal` using the feed's latest round
    #[instrument(skip(self))]
    pub fn convert(&self, nominal: u128) -> Result<u128> {
        let round = self.feed.latest_round()?;
        let converted = Self::convert_with_round(nominal, &round)?;
        debug!(
            round_id = round.round_id,
            answer = round.answer,
            decimals = round.decimals,
            converted,
            "Converted nominal amount"
        );
        Ok(converted)
    }

    /// `floor(nominal * 10^decimals / answer)` for a given round
    pub fn convert_with_round(nominal: u128, round: &PriceRound) -> std::result::Result<u128, PriceError> {
        if round.answer <= 0 {
            return Err(PriceError::InvalidPrice(round.answer));
        }

        let scale = 10u128
            .checked_pow(u32::from(round.decimals))
            .ok_or(PriceError::Overflow)?;
        let scaled = nominal.checked_mul(scale).ok_or(PriceError::Overflow)?;

        // answer > 0 was checked above
        Ok(scaled / round.answer as u128)
    }

    /// Latest rate as a decimal, failing on a non-positive answer
    pub fn latest_rate(&self) -> Result<Decimal> {
        let round = self.feed.latest_round()?;
        if round.answer <= 0 {
            return Err(PriceError::InvalidPrice(round.answer).into());
        }
        round.rate().ok_or_else(|| PriceError::Overflow.into())
    }
}

impl std::fmt::Debug for PriceConverter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PriceConverter")
            .field("feed", &self.feed.description())
            .finish()
    }
}
