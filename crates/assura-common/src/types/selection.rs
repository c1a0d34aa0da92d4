//! Selection - a subscriber's binding to a policy
//!
//! Selections are append-only. A subscriber may hold several, including
//! repeated selections of the same policy; nothing here computes whether a
//! selection is still active.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::policy::PolicyId;

/// One recorded selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    /// Selected policy
    pub policy_id: PolicyId,

    /// Premium converted into the target unit
    pub premium: u128,

    /// Next renewal date (selection time + one term)
    pub due_date: DateTime<Utc>,
}

/// A subscriber's selections as parallel columns, in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedPolicies {
    pub policy_ids: Vec<PolicyId>,
    pub premiums: Vec<u128>,
    pub due_dates: Vec<DateTime<Utc>>,
}

impl SelectedPolicies {
    #[inline]
    pub fn len(&self) -> usize {
        self.policy_ids.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.policy_ids.is_empty()
    }
}

impl<'a> FromIterator<&'a Selection> for SelectedPolicies {
    fn from_iter<I: IntoIterator<Item = &'a Selection>>(iter: I) -> Self {
        let mut out = SelectedPolicies::default();
        for selection in iter {
            out.policy_ids.push(selection.policy_id);
            out.premiums.push(selection.premium);
            out.due_dates.push(selection.due_date);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_columns_follow_insertion_order() {
        let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let t1 = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let selections = vec![
            Selection {
                policy_id: 2,
                premium: 10,
                due_date: t0,
            },
            Selection {
                policy_id: 1,
                premium: 20,
                due_date: t1,
            },
        ];

        let cols: SelectedPolicies = selections.iter().collect();
        assert_eq!(cols.len(), 2);
        assert_eq!(cols.policy_ids, vec![2, 1]);
        assert_eq!(cols.premiums, vec![10, 20]);
        assert_eq!(cols.due_dates, vec![t0, t1]);
    }
}
