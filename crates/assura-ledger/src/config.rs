//! Node configuration

use assura_common::{AssuraError, Identity, Result};
use assura_oracle::{DEFAULT_FEED_DECIMALS, MAX_FEED_DECIMALS};
use serde::{Deserialize, Serialize};

use crate::events::DEFAULT_EVENT_CAPACITY;

/// Ledger node configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Initial administrators
    pub admins: Vec<Identity>,
    /// Reference price feed settings
    pub price: PriceSettings,
    /// Notification buffer per subscriber
    pub event_capacity: usize,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            admins: vec![Identity::new("admin")],
            price: PriceSettings::default(),
            event_capacity: DEFAULT_EVENT_CAPACITY,
        }
    }
}

impl LedgerConfig {
    /// Load configuration from `.env` and `ASSURA_*` variables
    pub fn load() -> Result<Self> {
        // Try to load .env file
        let _ = dotenvy::dotenv();

        let mut cfg = Self::default();

        if let Ok(admins) = std::env::var("ASSURA_ADMINS") {
            cfg.admins = parse_admins(&admins);
        }
        if let Ok(val) = std::env::var("ASSURA_PRICE_ANSWER") {
            cfg.price.answer = parse_var("ASSURA_PRICE_ANSWER", &val)?;
        }
        if let Ok(val) = std::env::var("ASSURA_PRICE_DECIMALS") {
            cfg.price.decimals = parse_var("ASSURA_PRICE_DECIMALS", &val)?;
        }
        if let Ok(val) = std::env::var("ASSURA_PRICE_DESCRIPTION") {
            cfg.price.description = val;
        }
        if let Ok(val) = std::env::var("ASSURA_EVENT_CAPACITY") {
            cfg.event_capacity = parse_var("ASSURA_EVENT_CAPACITY", &val)?;
        }

        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject settings the ledger cannot start with
    pub fn validate(&self) -> Result<()> {
        if self.admins.is_empty() {
            return Err(AssuraError::Config(
                "ASSURA_ADMINS must name at least one administrator".to_string(),
            ));
        }
        if self.price.answer <= 0 {
            return Err(AssuraError::Config(format!(
                "reference price must be positive, got {}",
                self.price.answer
            )));
        }
        if self.price.decimals > MAX_FEED_DECIMALS {
            return Err(AssuraError::Config(format!(
                "price decimals must be at most {}, got {}",
                MAX_FEED_DECIMALS, self.price.decimals
            )));
        }
        if self.event_capacity == 0 {
            return Err(AssuraError::Config(
                "event capacity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Reference price feed settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceSettings {
    /// Initial answer, scaled by 10^decimals
    pub answer: i128,
    /// Decimal precision of the answer
    pub decimals: u8,
    /// Pair description
    pub description: String,
}

impl Default for PriceSettings {
    fn default() -> Self {
        Self {
            answer: 200_000_000,
            decimals: DEFAULT_FEED_DECIMALS,
            description: "ETH / USD".to_string(),
        }
    }
}

fn parse_admins(raw: &str) -> Vec<Identity> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(Identity::new)
        .collect()
}

fn parse_var<T>(name: &str, raw: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e| AssuraError::Config(format!("invalid {}: {}", name, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let cfg = LedgerConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.price.decimals, 8);
    }

    #[test]
    fn test_parse_admins() {
        assert_eq!(
            parse_admins(" alice, bob ,,carol "),
            vec![Identity::new("alice"), Identity::new("bob"), Identity::new("carol")]
        );
        assert!(parse_admins(" , ").is_empty());
    }

    #[test]
    fn test_validation() {
        let mut cfg = LedgerConfig::default();
        cfg.admins.clear();
        assert!(matches!(cfg.validate(), Err(AssuraError::Config(_))));

        let mut cfg = LedgerConfig::default();
        cfg.price.answer = -1;
        assert!(cfg.validate().is_err());

        let mut cfg = LedgerConfig::default();
        cfg.event_capacity = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_decimals_bounded_by_decimal_scale() {
        let mut cfg = LedgerConfig::default();
        cfg.price.decimals = 28;
        assert!(cfg.validate().is_ok());

        for decimals in [29, 30, 40] {
            cfg.price.decimals = decimals;
            assert!(matches!(cfg.validate(), Err(AssuraError::Config(_))));
        }
    }

    #[test]
    fn test_parse_var() {
        assert_eq!(parse_var::<u8>("X", " 18 ").unwrap(), 18);
        assert!(parse_var::<u8>("X", "300").is_err());
    }
}
