//! Registry State
//!
//! Single-threaded core of the registry. All validation happens before any
//! mutation, so a failed operation leaves the state untouched.

use super::record::{Principal, Record, RecordId};
use crate::config::RegistryConfig;
use crate::error::{RegistryError, RegistryResult, Role};
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Ownership-gated record registry
#[derive(Debug, Clone)]
pub struct Registry {
    /// Records keyed by their assigned id
    records: HashMap<RecordId, Record>,
    /// Last id handed out; ids start at 1
    next_id: u64,
    /// Identity allowed to reassign the admin role
    admin: Principal,
}

impl Registry {
    /// Create an empty registry with the given admin
    pub fn new(admin: impl Into<Principal>) -> Self {
        Self {
            records: HashMap::new(),
            next_id: 0,
            admin: admin.into(),
        }
    }

    /// Create an empty registry from configuration
    pub fn from_config(config: &RegistryConfig) -> Self {
        Self::new(config.admin())
    }

    /// Register a new record owned by `owner`
    pub fn register(&mut self, capacity: i64, owner: impl Into<Principal>) -> RegistryResult<RecordId> {
        let owner = owner.into();
        self.next_id += 1;
        let id = RecordId(self.next_id);

        if self.records.contains_key(&id) {
            warn!(id = %id, "Record id collision on register");
            return Err(RegistryError::AlreadyRegistered { id });
        }

        info!(id = %id, owner = %owner, capacity, "Registered record");
        self.records.insert(id, Record::new(owner, capacity));
        Ok(id)
    }

    /// Set the availability flag of a record. Only its owner may do this.
    pub fn update_availability(
        &mut self,
        id: RecordId,
        available: bool,
        caller: &Principal,
    ) -> RegistryResult<bool> {
        let record = self
            .records
            .get_mut(&id)
            .ok_or(RegistryError::NotFound { id })?;

        if !record.is_owned_by(caller) {
            warn!(id = %id, caller = %caller, "Rejected availability update");
            return Err(RegistryError::Unauthorized {
                caller: caller.clone(),
                role: Role::RecordOwner,
            });
        }

        record.available = available;
        info!(id = %id, available, "Updated record availability");
        Ok(true)
    }

    /// Look up a record. Unknown ids yield `None`.
    pub fn get_record(&self, id: RecordId) -> Option<&Record> {
        let record = self.records.get(&id);
        debug!(id = %id, found = record.is_some(), "Record lookup");
        record
    }

    /// Hand the admin role to `new_admin`. Only the current admin may do this.
    pub fn set_admin(&mut self, new_admin: impl Into<Principal>, caller: &Principal) -> RegistryResult<bool> {
        if caller != &self.admin {
            warn!(caller = %caller, "Rejected admin transfer");
            return Err(RegistryError::Unauthorized {
                caller: caller.clone(),
                role: Role::Admin,
            });
        }

        let new_admin = new_admin.into();
        info!(previous = %self.admin, current = %new_admin, "Transferred admin role");
        self.admin = new_admin;
        Ok(true)
    }

    /// Current admin
    pub fn admin(&self) -> &Principal {
        &self.admin
    }

    /// Highest id issued so far, `None` before the first registration
    pub fn last_id(&self) -> Option<RecordId> {
        (self.next_id > 0).then_some(RecordId(self.next_id))
    }

    /// Check if a record exists
    pub fn contains(&self, id: RecordId) -> bool {
        self.records.contains_key(&id)
    }

    /// Number of registered records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if no record has been registered
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn insert_raw(&mut self, id: RecordId, record: Record) {
        self.records.insert(id, record);
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::from_config(&RegistryConfig::default())
    }
}
