//! Registry Events
//!
//! Events emitted by the shared registry so external consumers can react to
//! registrations, availability changes and admin transfers.

use super::record::{Principal, RecordId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Events emitted after a successful registry mutation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RegistryEvent {
    /// A new record was registered
    RecordRegistered {
        id: RecordId,
        owner: Principal,
        capacity: i64,
        at: DateTime<Utc>,
    },

    /// A record's owner set its availability flag
    AvailabilityChanged {
        id: RecordId,
        available: bool,
        at: DateTime<Utc>,
    },

    /// The admin role moved to a new identity
    AdminTransferred {
        previous: Principal,
        current: Principal,
        at: DateTime<Utc>,
    },
}

impl RegistryEvent {
    /// Get the record ID associated with this event
    pub fn record_id(&self) -> Option<RecordId> {
        match self {
            RegistryEvent::RecordRegistered { id, .. } => Some(*id),
            RegistryEvent::AvailabilityChanged { id, .. } => Some(*id),
            RegistryEvent::AdminTransferred { .. } => None,
        }
    }

    /// Check if this is an admin-level event
    pub fn is_admin_event(&self) -> bool {
        matches!(self, RegistryEvent::AdminTransferred { .. })
    }

    /// When the mutation happened
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            RegistryEvent::RecordRegistered { at, .. }
            | RegistryEvent::AvailabilityChanged { at, .. }
            | RegistryEvent::AdminTransferred { at, .. } => *at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_record_id() {
        let event = RegistryEvent::RecordRegistered {
            id: RecordId(1),
            owner: Principal::new("user1"),
            capacity: 50,
            at: Utc::now(),
        };
        assert_eq!(event.record_id(), Some(RecordId(1)));
        assert!(!event.is_admin_event());
    }

    #[test]
    fn test_admin_event() {
        let at = Utc::now();
        let event = RegistryEvent::AdminTransferred {
            previous: Principal::new("owner"),
            current: Principal::new("newOwner"),
            at,
        };
        assert_eq!(event.record_id(), None);
        assert!(event.is_admin_event());
        assert_eq!(event.timestamp(), at);
    }

    #[test]
    fn test_event_tagged_serialization() {
        let event = RegistryEvent::AvailabilityChanged {
            id: RecordId(3),
            available: false,
            at: Utc::now(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "availability_changed");
        assert_eq!(json["id"], 3);
        assert_eq!(json["available"], false);
    }
}
