//! Shared Registry
//!
//! Thread-safe front end over [`Registry`]. One lock guards the whole state:
//! every mutation runs its check-then-write sequence under the write lock and
//! reads return owned snapshots taken under the read lock.

use super::events::RegistryEvent;
use super::record::{Principal, Record, RecordId};
use super::state::Registry;
use crate::config::RegistryConfig;
use crate::error::{RegistryResult, Result};
use chrono::Utc;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::broadcast;

// =============================================================================
// Statistics
// =============================================================================

/// Operation counters
#[derive(Debug, Default)]
pub struct RegistryStats {
    /// Successful registrations
    pub registrations: AtomicU64,
    /// Successful availability updates
    pub availability_updates: AtomicU64,
    /// Successful admin transfers
    pub admin_transfers: AtomicU64,
    /// Operations rejected with an error
    pub rejected: AtomicU64,
}

impl RegistryStats {
    /// Create a snapshot of current stats
    pub fn snapshot(&self) -> RegistryStatsSnapshot {
        RegistryStatsSnapshot {
            registrations: self.registrations.load(Ordering::Relaxed),
            availability_updates: self.availability_updates.load(Ordering::Relaxed),
            admin_transfers: self.admin_transfers.load(Ordering::Relaxed),
            rejected: self.rejected.load(Ordering::Relaxed),
        }
    }
}

/// Snapshot of registry statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct RegistryStatsSnapshot {
    pub registrations: u64,
    pub availability_updates: u64,
    pub admin_transfers: u64,
    pub rejected: u64,
}

// =============================================================================
// Shared Registry
// =============================================================================

/// Registry handle safe to share between threads and tasks
pub struct SharedRegistry {
    /// Entire registry state behind a single lock
    inner: RwLock<Registry>,
    /// Operation counters
    stats: RegistryStats,
    /// Event broadcaster
    event_sender: broadcast::Sender<RegistryEvent>,
}

impl std::fmt::Debug for SharedRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedRegistry")
            .field("records", &self.inner.read().len())
            .field("stats", &self.stats.snapshot())
            .finish()
    }
}

impl SharedRegistry {
    /// Create a new shared registry from validated configuration
    pub fn new(config: &RegistryConfig) -> Result<Arc<Self>> {
        config.validate()?;
        let (event_sender, _) = broadcast::channel(config.event_capacity);

        Ok(Arc::new(Self {
            inner: RwLock::new(Registry::from_config(config)),
            stats: RegistryStats::default(),
            event_sender,
        }))
    }

    /// Get an event receiver
    pub fn subscribe(&self) -> broadcast::Receiver<RegistryEvent> {
        self.event_sender.subscribe()
    }

    /// Register a new record
    pub fn register(&self, capacity: i64, owner: impl Into<Principal>) -> RegistryResult<RecordId> {
        let owner = owner.into();
        let mut registry = self.inner.write();
        let id = self.track(registry.register(capacity, owner.clone()))?;

        self.stats.registrations.fetch_add(1, Ordering::Relaxed);
        // Sent under the lock so subscribers observe mutation order
        let _ = self.event_sender.send(RegistryEvent::RecordRegistered {
            id,
            owner,
            capacity,
            at: Utc::now(),
        });

        Ok(id)
    }

    /// Set a record's availability flag
    pub fn update_availability(
        &self,
        id: RecordId,
        available: bool,
        caller: &Principal,
    ) -> RegistryResult<bool> {
        let mut registry = self.inner.write();
        let updated = self.track(registry.update_availability(id, available, caller))?;

        self.stats.availability_updates.fetch_add(1, Ordering::Relaxed);
        let _ = self.event_sender.send(RegistryEvent::AvailabilityChanged {
            id,
            available,
            at: Utc::now(),
        });

        Ok(updated)
    }

    /// Snapshot of a record, if present
    pub fn get_record(&self, id: RecordId) -> Option<Record> {
        self.inner.read().get_record(id).cloned()
    }

    /// Transfer the admin role
    pub fn set_admin(&self, new_admin: impl Into<Principal>, caller: &Principal) -> RegistryResult<bool> {
        let new_admin = new_admin.into();
        let mut registry = self.inner.write();
        let previous = registry.admin().clone();
        let updated = self.track(registry.set_admin(new_admin.clone(), caller))?;

        self.stats.admin_transfers.fetch_add(1, Ordering::Relaxed);
        let _ = self.event_sender.send(RegistryEvent::AdminTransferred {
            previous,
            current: new_admin,
            at: Utc::now(),
        });

        Ok(updated)
    }

    /// Current admin
    pub fn admin(&self) -> Principal {
        self.inner.read().admin().clone()
    }

    /// Highest id issued so far
    pub fn last_id(&self) -> Option<RecordId> {
        self.inner.read().last_id()
    }

    /// Check if a record exists
    pub fn contains(&self, id: RecordId) -> bool {
        self.inner.read().contains(id)
    }

    /// Number of registered records
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Check if no record has been registered
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Get statistics
    pub fn stats(&self) -> RegistryStatsSnapshot {
        self.stats.snapshot()
    }

    fn track<T>(&self, result: RegistryResult<T>) -> RegistryResult<T> {
        if result.is_err() {
            self.stats.rejected.fetch_add(1, Ordering::Relaxed);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RegistryError;
    use assert_matches::assert_matches;
    use std::collections::HashSet;

    fn shared() -> Arc<SharedRegistry> {
        SharedRegistry::new(&RegistryConfig::default()).unwrap()
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = RegistryConfig::default().with_admin("");
        assert!(SharedRegistry::new(&config).is_err());
    }

    #[test]
    fn test_register_and_snapshot() {
        let registry = shared();
        let id = registry.register(50, "user1").unwrap();
        assert_eq!(id, RecordId(1));

        let mut snapshot = registry.get_record(id).unwrap();
        snapshot.available = false;
        // Snapshot is detached from the registry
        assert!(registry.get_record(id).unwrap().available);
    }

    #[test]
    fn test_stats_count_success_and_rejection() {
        let registry = shared();
        let id = registry.register(50, "user1").unwrap();
        registry.update_availability(id, false, &"user1".into()).unwrap();
        let _ = registry.update_availability(id, true, &"user2".into());
        let _ = registry.update_availability(RecordId(99), true, &"user1".into());
        registry.set_admin("newOwner", &"owner".into()).unwrap();
        let _ = registry.set_admin("x", &"user1".into());

        let stats = registry.stats();
        assert_eq!(stats.registrations, 1);
        assert_eq!(stats.availability_updates, 1);
        assert_eq!(stats.admin_transfers, 1);
        assert_eq!(stats.rejected, 3);
    }

    #[test]
    fn test_failed_ops_leave_state() {
        let registry = shared();
        let id = registry.register(50, "user1").unwrap();

        assert_matches!(
            registry.update_availability(id, false, &"user2".into()),
            Err(RegistryError::Unauthorized { .. })
        );
        assert!(registry.get_record(id).unwrap().available);

        assert_matches!(
            registry.set_admin("x", &"user1".into()),
            Err(RegistryError::Unauthorized { .. })
        );
        assert_eq!(registry.admin(), "owner");
    }

    #[test]
    fn test_concurrent_registrations_are_dense() {
        let registry = shared();
        let threads = 8;
        let per_thread = 50;

        let ids: Vec<RecordId> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..threads)
                .map(|t| {
                    let registry = registry.clone();
                    scope.spawn(move || {
                        (0..per_thread)
                            .map(|_| registry.register(t, format!("user{}", t)).unwrap())
                            .collect::<Vec<_>>()
                    })
                })
                .collect();
            handles.into_iter().flat_map(|h| h.join().unwrap()).collect()
        });

        let total = (threads * per_thread) as usize;
        let unique: HashSet<_> = ids.iter().copied().collect();
        assert_eq!(unique.len(), total);
        assert_eq!(ids.iter().max(), Some(&RecordId(total as u64)));
        assert_eq!(registry.len(), total);
        assert_eq!(registry.last_id(), Some(RecordId(total as u64)));
    }

    #[test]
    fn test_every_mutation_publishes_one_event() {
        let registry = shared();
        let mut events = registry.subscribe();

        let first = registry.register(-5, "user1").unwrap();
        let second = registry.register(50, "user2").unwrap();
        registry.update_availability(first, false, &"user1".into()).unwrap();
        registry.update_availability(second, false, &"user2".into()).unwrap();
        registry.set_admin("newOwner", &"owner".into()).unwrap();

        let mut published = Vec::new();
        while let Ok(event) = events.try_recv() {
            published.push(event);
        }

        let stats = registry.stats();
        let mutations = stats.registrations + stats.availability_updates + stats.admin_transfers;
        assert_eq!(published.len() as u64, mutations);
        assert_eq!(mutations, 5);
        assert_matches!(
            &published[0],
            RegistryEvent::RecordRegistered { capacity: -5, .. }
        );
    }

    #[tokio::test]
    async fn test_events_follow_mutations() {
        let registry = shared();
        let mut events = registry.subscribe();

        let id = registry.register(50, "user1").unwrap();
        registry.update_availability(id, false, &"user1".into()).unwrap();
        let _ = registry.update_availability(id, true, &"user2".into());
        registry.set_admin("newOwner", &"owner".into()).unwrap();

        assert_matches!(
            events.recv().await.unwrap(),
            RegistryEvent::RecordRegistered { id: got, capacity: 50, .. } if got == id
        );
        assert_matches!(
            events.recv().await.unwrap(),
            RegistryEvent::AvailabilityChanged { available: false, .. }
        );
        // The rejected update published nothing
        assert_matches!(
            events.recv().await.unwrap(),
            RegistryEvent::AdminTransferred { previous, current, .. }
                if previous == "owner" && current == "newOwner"
        );
        assert!(events.try_recv().is_err());
    }
}
