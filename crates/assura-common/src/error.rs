//! Error types for the Assura registry
//!
//! Provides a unified error type and domain-specific error variants

use thiserror::Error;

use crate::security::roles::Role;
use crate::types::identity::Identity;
use crate::types::policy::PolicyId;

/// Result type alias using AssuraError
pub type Result<T> = std::result::Result<T, AssuraError>;

/// Unified error type for Assura operations
#[derive(Debug, Error)]
pub enum AssuraError {
    // Role errors
    #[error("Access error: {0}")]
    Access(#[from] AccessError),

    // Ledger lookups
    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),

    // Price reference errors
    #[error("Price reference error: {0}")]
    Price(#[from] PriceError),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Coarse classification of an [`AssuraError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller lacks the role flag the operation requires
    Authorization,
    /// Referenced policy or selection list does not exist
    NotFound,
    /// Price reference returned an unusable value
    InvalidReference,
    /// Bad construction parameters
    Config,
    /// Arithmetic overflow or encoding failure
    Internal,
}

impl AssuraError {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AssuraError::Access(_) => ErrorKind::Authorization,
            AssuraError::Ledger(_) => ErrorKind::NotFound,
            AssuraError::Price(PriceError::InvalidPrice(_)) => ErrorKind::InvalidReference,
            AssuraError::Price(PriceError::Overflow) => ErrorKind::Internal,
            AssuraError::Config(_) => ErrorKind::Config,
            AssuraError::Serialization(_) => ErrorKind::Internal,
        }
    }
}

/// Role check failures
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AccessError {
    #[error("{identity} does not hold the {role} role")]
    Unauthorized { identity: Identity, role: Role },
}

/// Ledger lookup failures
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("policy does not exist: {0}")]
    PolicyNotFound(PolicyId),

    #[error("no selections for {0}")]
    NoSelections(Identity),
}

/// Price reference failures
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PriceError {
    #[error("Invalid reference price: {0} (must be positive)")]
    InvalidPrice(i128),

    #[error("Price conversion overflow")]
    Overflow,
}

impl From<serde_json::Error> for AssuraError {
    fn from(err: serde_json::Error) -> Self {
        AssuraError::Serialization(err.to_string())
    }
}
