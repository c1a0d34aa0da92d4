//! Policy - admin-defined insurance product
//!
//! Policies are immutable once the ledger assigns them an id. The base premium
//! rate is a display string only; premiums are computed from the nominal amount
//! a subscriber supplies at selection time.

use serde::{Deserialize, Serialize};

/// Sequential policy identifier, starting at 1
pub type PolicyId = u64;

/// A defined insurance product
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
    /// Ledger-assigned identifier
    pub id: PolicyId,

    /// Plan name
    pub plan: String,

    /// Base premium rate as shown to subscribers (opaque)
    pub base_premium_rate: String,

    /// Deductible amount
    pub deductible: u64,

    /// Coverage amount
    pub coverage: u64,

    /// Third-party liability amount
    pub third_party_liability: u64,

    /// Covered items, in the order they were listed
    pub cover_items: Vec<String>,
}

/// Policy payload before an id has been assigned
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPolicy {
    pub plan: String,
    pub base_premium_rate: String,
    pub deductible: u64,
    pub coverage: u64,
    pub third_party_liability: u64,
    pub cover_items: Vec<String>,
}

impl NewPolicy {
    /// Start a payload for the named plan
    pub fn new(plan: impl Into<String>) -> Self {
        Self {
            plan: plan.into(),
            ..Default::default()
        }
    }

    pub fn with_base_premium_rate(mut self, rate: impl Into<String>) -> Self {
        self.base_premium_rate = rate.into();
        self
    }

    pub fn with_deductible(mut self, deductible: u64) -> Self {
        self.deductible = deductible;
        self
    }

    pub fn with_coverage(mut self, coverage: u64) -> Self {
        self.coverage = coverage;
        self
    }

    pub fn with_third_party_liability(mut self, liability: u64) -> Self {
        self.third_party_liability = liability;
        self
    }

    /// Append a covered item
    pub fn with_cover_item(mut self, item: impl Into<String>) -> Self {
        self.cover_items.push(item.into());
        self
    }

    /// Bind the payload to its ledger id
    pub fn into_policy(self, id: PolicyId) -> Policy {
        Policy {
            id,
            plan: self.plan,
            base_premium_rate: self.base_premium_rate,
            deductible: self.deductible,
            coverage: self.coverage,
            third_party_liability: self.third_party_liability,
            cover_items: self.cover_items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_keeps_cover_item_order() {
        let policy = NewPolicy::new("Comprehensive")
            .with_base_premium_rate("2.5%")
            .with_deductible(500)
            .with_coverage(100_000)
            .with_third_party_liability(50_000)
            .with_cover_item("collision")
            .with_cover_item("theft")
            .with_cover_item("fire")
            .into_policy(3);

        assert_eq!(policy.id, 3);
        assert_eq!(policy.plan, "Comprehensive");
        assert_eq!(policy.deductible, 500);
        assert_eq!(policy.cover_items, vec!["collision", "theft", "fire"]);
    }
}
