//! Core data types for the Assura registry

pub mod identity;
pub mod policy;
pub mod selection;
