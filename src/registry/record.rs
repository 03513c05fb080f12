//! Record Types
//!
//! Identifier and value types stored by the registry.

use serde::{Deserialize, Serialize};

// =============================================================================
// Record ID
// =============================================================================

/// Registry-assigned record key. The first id issued is 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub u64);

impl RecordId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    #[inline]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for RecordId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

// =============================================================================
// Principal
// =============================================================================

/// Opaque caller identity
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Principal(pub String);

impl Principal {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Principal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Principal {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Principal {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<&String> for Principal {
    fn from(s: &String) -> Self {
        Self(s.clone())
    }
}

impl PartialEq<str> for Principal {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Principal {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

// =============================================================================
// Record
// =============================================================================

/// A registered quantum computer
///
/// The id is not part of the body; it is the key the record is stored under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Registrant, the only identity allowed to toggle availability
    pub owner: Principal,
    /// Qubit count supplied at registration
    pub capacity: i64,
    /// Whether the machine accepts work
    pub available: bool,
}

impl Record {
    /// Create a freshly registered record, available by default
    pub fn new(owner: Principal, capacity: i64) -> Self {
        Self {
            owner,
            capacity,
            available: true,
        }
    }

    /// Check whether `caller` registered this record
    #[inline]
    pub fn is_owned_by(&self, caller: &Principal) -> bool {
        &self.owner == caller
    }
}
