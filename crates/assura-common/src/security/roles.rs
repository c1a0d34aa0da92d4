//! Role Authority
//!
//! Classifies identities as Administrator and/or User and gates the
//! operations that need either role:
//! - Flags are independent; an identity may hold both
//! - Grants are add-only and require an existing Administrator
//! - The initial admin set is fixed at construction and never shrinks

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{AccessError, AssuraError, Result};
use crate::types::identity::Identity;

/// Role flag names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// May define policies and grant roles
    Admin,
    /// May be bound to a policy
    User,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::User => write!(f, "user"),
        }
    }
}

/// Role flags held by one identity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRecord {
    pub is_admin: bool,
    pub is_user: bool,
}

impl RoleRecord {
    #[inline]
    pub fn has(&self, role: Role) -> bool {
        match role {
            Role::Admin => self.is_admin,
            Role::User => self.is_user,
        }
    }
}

/// Role authority
pub struct RoleAuthority {
    /// Role flags: identity -> record
    records: DashMap<Identity, RoleRecord>,
}

impl RoleAuthority {
    /// Create an authority seeded with the initial administrators
    pub fn new(initial_admins: impl IntoIterator<Item = Identity>) -> Result<Self> {
        let records = DashMap::new();
        for admin in initial_admins {
            records.insert(
                admin,
                RoleRecord {
                    is_admin: true,
                    is_user: false,
                },
            );
        }

        if records.is_empty() {
            return Err(AssuraError::Config(
                "at least one initial administrator is required".to_string(),
            ));
        }

        info!(admins = records.len(), "Role authority initialized");
        Ok(Self { records })
    }

    /// Whether `identity` holds the Administrator flag
    pub fn is_admin(&self, identity: &Identity) -> bool {
        self.has_role(identity, Role::Admin)
    }

    /// Whether `identity` holds the User flag
    pub fn is_user(&self, identity: &Identity) -> bool {
        self.has_role(identity, Role::User)
    }

    /// Whether `identity` holds `role`
    pub fn has_role(&self, identity: &Identity, role: Role) -> bool {
        self.records
            .get(identity)
            .map(|record| record.has(role))
            .unwrap_or(false)
    }

    /// Flags held by `identity` (all false when unknown)
    pub fn record(&self, identity: &Identity) -> RoleRecord {
        self.records
            .get(identity)
            .map(|record| *record)
            .unwrap_or_default()
    }

    /// Fail unless `identity` holds `role`
    pub fn require(&self, identity: &Identity, role: Role) -> std::result::Result<(), AccessError> {
        if self.has_role(identity, role) {
            return Ok(());
        }
        warn!(identity = %identity, role = %role, "Role check failed");
        Err(AccessError::Unauthorized {
            identity: identity.clone(),
            role,
        })
    }

    /// Fail unless `identity` is an Administrator
    pub fn require_admin(&self, identity: &Identity) -> std::result::Result<(), AccessError> {
        self.require(identity, Role::Admin)
    }

    /// Fail unless `identity` is a User
    pub fn require_user(&self, identity: &Identity) -> std::result::Result<(), AccessError> {
        self.require(identity, Role::User)
    }

    /// Grant the Administrator flag (admin only, idempotent)
    pub fn add_admin(&self, caller: &Identity, identity: Identity) -> Result<()> {
        self.grant(caller, identity, Role::Admin)
    }

    /// Grant the User flag (admin only, idempotent)
    pub fn add_user(&self, caller: &Identity, identity: Identity) -> Result<()> {
        self.grant(caller, identity, Role::User)
    }

    fn grant(&self, caller: &Identity, identity: Identity, role: Role) -> Result<()> {
        self.require_admin(caller)?;

        let mut record = self.records.entry(identity.clone()).or_default();
        let already = record.has(role);
        match role {
            Role::Admin => record.is_admin = true,
            Role::User => record.is_user = true,
        }
        drop(record);

        if already {
            debug!(caller = %caller, identity = %identity, role = %role, "Role already held");
        } else {
            info!(caller = %caller, identity = %identity, role = %role, "Role granted");
        }
        Ok(())
    }

    /// All administrators, sorted
    pub fn admins(&self) -> Vec<Identity> {
        self.collect(Role::Admin)
    }

    /// All users, sorted
    pub fn users(&self) -> Vec<Identity> {
        self.collect(Role::User)
    }

    fn collect(&self, role: Role) -> Vec<Identity> {
        let mut out: Vec<Identity> = self
            .records
            .iter()
            .filter(|entry| entry.value().has(role))
            .map(|entry| entry.key().clone())
            .collect();
        out.sort();
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn authority() -> RoleAuthority {
        RoleAuthority::new(vec![Identity::new("alice"), Identity::new("bob")]).unwrap()
    }

    #[test]
    fn test_initial_admins() {
        let roles = authority();
        assert!(roles.is_admin(&"alice".into()));
        assert!(roles.is_admin(&"bob".into()));
        assert!(!roles.is_admin(&"carol".into()));
        assert!(!roles.is_user(&"alice".into()));
    }

    #[test]
    fn test_empty_admin_list_rejected() {
        let result = RoleAuthority::new(Vec::<Identity>::new());
        assert!(matches!(result, Err(AssuraError::Config(_))));
    }

    #[test]
    fn test_admin_grants_roles() {
        let roles = authority();
        let alice = Identity::new("alice");

        roles.add_admin(&alice, "carol".into()).unwrap();
        roles.add_user(&alice, "dave".into()).unwrap();

        assert!(roles.is_admin(&"carol".into()));
        assert!(roles.is_user(&"dave".into()));
        assert!(!roles.is_admin(&"dave".into()));
    }

    #[test]
    fn test_non_admin_cannot_grant() {
        let roles = authority();
        let mallory = Identity::new("mallory");

        let result = roles.add_admin(&mallory, "mallory".into());
        assert!(matches!(
            result,
            Err(AssuraError::Access(AccessError::Unauthorized {
                role: Role::Admin,
                ..
            }))
        ));
        assert!(!roles.is_admin(&mallory));

        assert!(roles.add_user(&mallory, "eve".into()).is_err());
        assert!(!roles.is_user(&"eve".into()));
    }

    #[test]
    fn test_user_cannot_grant() {
        let roles = authority();
        roles.add_user(&"alice".into(), "dave".into()).unwrap();

        assert!(roles.add_user(&"dave".into(), "erin".into()).is_err());
        assert!(!roles.is_user(&"erin".into()));
    }

    #[test]
    fn test_grants_are_idempotent_and_independent() {
        let roles = authority();
        let alice = Identity::new("alice");

        roles.add_user(&alice, alice.clone()).unwrap();
        roles.add_user(&alice, alice.clone()).unwrap();
        roles.add_admin(&alice, alice.clone()).unwrap();

        let record = roles.record(&alice);
        assert!(record.is_admin);
        assert!(record.is_user);
        assert_eq!(roles.admins(), vec![Identity::new("alice"), Identity::new("bob")]);
        assert_eq!(roles.users(), vec![alice]);
    }

    #[test]
    fn test_unknown_identity_has_empty_record() {
        let roles = authority();
        assert_eq!(roles.record(&"nobody".into()), RoleRecord::default());
        assert!(roles.require_user(&"nobody".into()).is_err());
        assert!(roles.require_admin(&"alice".into()).is_ok());
    }
}
