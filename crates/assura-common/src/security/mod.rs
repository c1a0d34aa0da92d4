//! Security module - role-based access control
//!
//! This module provides:
//! - Administrator and User role flags per identity
//! - Admin-gated role grants
//! - Guards the ledger calls before mutating state

pub mod roles;

pub use roles::{Role, RoleAuthority, RoleRecord};
