//! # Assura Oracle
//!
//! Price reference adapter for the Assura policy registry.
//!
//! ## Conversion Formula
//!
//! ```text
//! target = floor(nominal * 10^decimals / price)
//! ```
//!
//! Where:
//! - price: latest feed answer (must be positive)
//! - decimals: precision of the feed answer
//!
//! Truncation toward zero is intentional; callers must tolerate it.

pub mod converter;
pub mod feed;

pub use converter::PriceConverter;
pub use feed::{PriceFeed, PriceRound, ReferencePriceFeed};

/// Decimal precision used by USD-quoted reference feeds
pub const DEFAULT_FEED_DECIMALS: u8 = 8;

/// Largest precision a feed may use; `rust_decimal` scales stop at 28
pub const MAX_FEED_DECIMALS: u8 = 28;
