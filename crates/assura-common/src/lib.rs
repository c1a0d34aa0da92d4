//! # Assura Common
//!
//! Shared types, errors, and the role authority for the Assura policy registry.
//!
//! ## Core Types
//!
//! - [`Identity`]: opaque caller/subscriber identity
//! - [`Policy`]/[`NewPolicy`]: immutable insurance product definitions
//! - [`Selection`]/[`SelectedPolicies`]: a subscriber's binding to a product
//!
//! ## Security
//!
//! - [`security::roles`]: Administrator/User role authority

pub mod error;
pub mod security;
pub mod types;

// Re-export commonly used types at crate root
pub use error::{AccessError, AssuraError, ErrorKind, LedgerError, PriceError, Result};
pub use security::roles::{Role, RoleAuthority, RoleRecord};
pub use types::{
    identity::Identity,
    policy::{NewPolicy, Policy, PolicyId},
    selection::{SelectedPolicies, Selection},
};

/// Assura version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Length of a policy term in days; due dates are always one term out
pub const POLICY_TERM_DAYS: i64 = 365;

/// First identifier handed out by the ledger
pub const FIRST_POLICY_ID: PolicyId = 1;
