//! Ledger notifications
//!
//! Fire-and-forget events published after each successful mutation, in
//! emission order. Publishing with no subscribers is not an error.

use assura_common::{Identity, Policy, PolicyId, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::trace;
use uuid::Uuid;

/// Default broadcast buffer size
pub const DEFAULT_EVENT_CAPACITY: usize = 1024;

/// Event types emitted by the ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum LedgerEvent {
    /// Administrator defined a new policy
    PolicyCreated { policy: Policy, creator: Identity },
    /// Subscriber was bound to a policy
    PolicySelected {
        subscriber: Identity,
        policy_id: PolicyId,
        premium: u128,
        due_date: DateTime<Utc>,
    },
}

impl LedgerEvent {
    /// Short name for logs
    pub fn name(&self) -> &'static str {
        match self {
            LedgerEvent::PolicyCreated { .. } => "policy_created",
            LedgerEvent::PolicySelected { .. } => "policy_selected",
        }
    }
}

/// Event with delivery metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerNotification {
    /// Unique, time-ordered event id
    pub event_id: Uuid,
    /// Ledger time at emission
    pub emitted_at: DateTime<Utc>,
    pub event: LedgerEvent,
}

impl LedgerNotification {
    /// JSON encoding of the event payload
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.event)?)
    }
}

/// Broadcast bus for ledger notifications
pub struct EventBus {
    sender: broadcast::Sender<LedgerNotification>,
}

impl EventBus {
    /// Create a bus buffering up to `capacity` undelivered events per receiver
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Publish an event
    pub fn publish(&self, event: LedgerEvent, emitted_at: DateTime<Utc>) -> LedgerNotification {
        let notification = LedgerNotification {
            event_id: Uuid::now_v7(),
            emitted_at,
            event,
        };

        // Broadcast (ignore errors if no receivers)
        if self.sender.send(notification.clone()).is_err() {
            trace!(event = notification.event.name(), "No notification subscribers");
        }
        notification
    }

    /// Subscribe to events published from now on
    pub fn subscribe(&self) -> broadcast::Receiver<LedgerNotification> {
        self.sender.subscribe()
    }

    /// Number of live subscribers
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_CAPACITY)
    }
}
