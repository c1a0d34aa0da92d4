//! Policy ledger
//!
//! Stores admin-defined policies under sequential ids and an append-only list
//! of selections per subscriber. Every mutation checks roles before touching
//! state and either completes fully or leaves the ledger unchanged.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use assura_common::{
    Identity, LedgerError, NewPolicy, Policy, PolicyId, Result, RoleAuthority, SelectedPolicies,
    Selection, FIRST_POLICY_ID, POLICY_TERM_DAYS,
};
use assura_oracle::{PriceConverter, PriceFeed, ReferencePriceFeed};
use chrono::Duration;
use parking_lot::RwLock;
use tokio::sync::broadcast;
use tracing::{debug, info, instrument};

use crate::clock::{Clock, SystemClock};
use crate::events::{EventBus, LedgerEvent, LedgerNotification};

/// Mutable ledger state, guarded as one unit
#[derive(Default)]
struct LedgerState {
    /// Policies in id order; `policies[i].id == i + 1`
    policies: Vec<Policy>,
    /// Highest id handed out so far
    policy_counter: PolicyId,
    /// Identities with at least one selection
    subscribers: HashSet<Identity>,
    /// Selections per subscriber, insertion ordered
    selections: HashMap<Identity, Vec<Selection>>,
}

impl LedgerState {
    fn contains(&self, id: PolicyId) -> bool {
        (FIRST_POLICY_ID..=self.policy_counter).contains(&id)
    }
}

/// Policy ledger
pub struct PolicyLedger {
    roles: Arc<RoleAuthority>,
    converter: PriceConverter,
    clock: Arc<dyn Clock>,
    events: EventBus,
    state: RwLock<LedgerState>,
}

impl PolicyLedger {
    /// Create a ledger backed by `feed`
    pub fn new(roles: Arc<RoleAuthority>, feed: Arc<dyn PriceFeed>) -> Self {
        Self {
            roles,
            converter: PriceConverter::new(feed),
            clock: Arc::new(SystemClock),
            events: EventBus::default(),
            state: RwLock::new(LedgerState::default()),
        }
    }

    /// Create a ledger with an in-process reference feed at `answer`
    pub fn with_reference_price(roles: Arc<RoleAuthority>, answer: i128, decimals: u8) -> Self {
        Self::new(roles, Arc::new(ReferencePriceFeed::new(answer, decimals)))
    }

    /// Use a different time source
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Resize the notification buffer
    pub fn with_event_capacity(mut self, capacity: usize) -> Self {
        self.events = EventBus::new(capacity);
        self
    }

    /// Define a new policy (admin only); returns its id
    #[instrument(skip(self, policy), fields(plan = %policy.plan))]
    pub fn create_policy(&self, caller: &Identity, policy: NewPolicy) -> Result<PolicyId> {
        self.roles.require_admin(caller)?;

        let mut state = self.state.write();
        let id = state.policy_counter + 1;
        let policy = policy.into_policy(id);
        state.policies.push(policy.clone());
        state.policy_counter = id;

        self.events.publish(
            LedgerEvent::PolicyCreated {
                policy,
                creator: caller.clone(),
            },
            self.clock.now(),
        );
        drop(state);

        info!(policy_id = id, creator = %caller, "Policy created");
        Ok(id)
    }

    /// Bind `subscriber` to `policy_id`, converting the nominal premium
    ///
    /// `caller` is not required to be `subscriber`; any caller may select on
    /// behalf of an identity holding the User role.
    #[instrument(skip(self))]
    pub fn select_policy(
        &self,
        caller: &Identity,
        subscriber: &Identity,
        policy_id: PolicyId,
        nominal_premium: u128,
    ) -> Result<Selection> {
        if !self.state.read().contains(policy_id) {
            return Err(LedgerError::PolicyNotFound(policy_id).into());
        }
        self.roles.require_user(subscriber)?;

        let premium = self.converter.convert(nominal_premium)?;

        let mut state = self.state.write();
        let now = self.clock.now();
        let selection = Selection {
            policy_id,
            premium,
            due_date: now + Duration::days(POLICY_TERM_DAYS),
        };
        state.subscribers.insert(subscriber.clone());
        state
            .selections
            .entry(subscriber.clone())
            .or_default()
            .push(selection.clone());

        self.events.publish(
            LedgerEvent::PolicySelected {
                subscriber: subscriber.clone(),
                policy_id,
                premium,
                due_date: selection.due_date,
            },
            now,
        );
        drop(state);

        if caller != subscriber {
            debug!(caller = %caller, subscriber = %subscriber, "Selection made on behalf of subscriber");
        }
        info!(
            subscriber = %subscriber,
            policy_id,
            premium,
            due_date = %selection.due_date,
            "Policy selected"
        );
        Ok(selection)
    }

    /// Look up one policy
    pub fn view_policy(&self, policy_id: PolicyId) -> Result<Policy> {
        let state = self.state.read();
        if !state.contains(policy_id) {
            return Err(LedgerError::PolicyNotFound(policy_id).into());
        }
        state
            .policies
            .get((policy_id - FIRST_POLICY_ID) as usize)
            .cloned()
            .ok_or_else(|| LedgerError::PolicyNotFound(policy_id).into())
    }

    /// All policies, id ascending
    pub fn view_all_policies(&self) -> Vec<Policy> {
        self.state.read().policies.clone()
    }

    /// A subscriber's selections as parallel columns, insertion ordered
    pub fn get_user_selected_policies(&self, subscriber: &Identity) -> Result<SelectedPolicies> {
        let state = self.state.read();
        match state.selections.get(subscriber) {
            Some(selections) if !selections.is_empty() => Ok(selections.iter().collect()),
            _ => Err(LedgerError::NoSelections(subscriber.clone()).into()),
        }
    }

    /// A subscriber's selections as records (empty when none)
    pub fn selections(&self, subscriber: &Identity) -> Vec<Selection> {
        self.state
            .read()
            .selections
            .get(subscriber)
            .cloned()
            .unwrap_or_default()
    }

    /// Number of policies defined so far
    pub fn policy_count(&self) -> u64 {
        self.state.read().policy_counter
    }

    /// Whether `identity` has ever selected a policy
    pub fn is_subscriber(&self, identity: &Identity) -> bool {
        self.state.read().subscribers.contains(identity)
    }

    /// Role authority consulted by this ledger
    pub fn roles(&self) -> &Arc<RoleAuthority> {
        &self.roles
    }

    /// Price converter used for premiums
    pub fn converter(&self) -> &PriceConverter {
        &self.converter
    }

    /// Subscribe to ledger notifications
    pub fn subscribe(&self) -> broadcast::Receiver<LedgerNotification> {
        self.events.subscribe()
    }
}
