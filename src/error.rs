//! Error types for the Quantum Registry
//!
//! Registry operations fail with [`RegistryError`], which has exactly three
//! kinds. Everything around the core (configuration, scenario files, IO)
//! surfaces through the crate-level [`Error`].

use crate::registry::record::{Principal, RecordId};
use thiserror::Error;

// =============================================================================
// Registry Errors
// =============================================================================

/// Errors raised by registry operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Record already registered: {id}")]
    AlreadyRegistered { id: RecordId },

    #[error("Record not found: {id}")]
    NotFound { id: RecordId },

    #[error("Unauthorized: {caller} is not the {role}")]
    Unauthorized { caller: Principal, role: Role },
}

/// The identity an operation required
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Registrant of the targeted record
    RecordOwner,
    /// Current registry admin
    Admin,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::RecordOwner => write!(f, "record owner"),
            Role::Admin => write!(f, "registry admin"),
        }
    }
}

/// Fieldless error kind for callers that branch on the failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    AlreadyRegistered,
    NotFound,
    Unauthorized,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::AlreadyRegistered => write!(f, "already_registered"),
            ErrorKind::NotFound => write!(f, "not_found"),
            ErrorKind::Unauthorized => write!(f, "unauthorized"),
        }
    }
}

impl RegistryError {
    /// Kind of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            RegistryError::AlreadyRegistered { .. } => ErrorKind::AlreadyRegistered,
            RegistryError::NotFound { .. } => ErrorKind::NotFound,
            RegistryError::Unauthorized { .. } => ErrorKind::Unauthorized,
        }
    }

    /// Registry errors are deterministic: retrying with the same inputs
    /// against the same state fails identically.
    pub fn is_retryable(&self) -> bool {
        false
    }
}

// =============================================================================
// Crate Errors
// =============================================================================

/// Unified error type for the crate
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Scenario error: {0}")]
    Scenario(String),

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Registry error kind, if this wraps a registry failure
    pub fn registry_kind(&self) -> Option<ErrorKind> {
        match self {
            Error::Registry(e) => Some(e.kind()),
            _ => None,
        }
    }
}

/// Result type alias for registry operations
pub type RegistryResult<T> = std::result::Result<T, RegistryError>;

/// Result type alias for the crate
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        let err = RegistryError::NotFound { id: RecordId(7) };
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.to_string(), "Record not found: 7");

        let err = RegistryError::Unauthorized {
            caller: Principal::new("user2"),
            role: Role::RecordOwner,
        };
        assert_eq!(err.kind(), ErrorKind::Unauthorized);
        assert_eq!(err.to_string(), "Unauthorized: user2 is not the record owner");

        let err = RegistryError::AlreadyRegistered { id: RecordId(1) };
        assert_eq!(err.kind(), ErrorKind::AlreadyRegistered);
    }

    #[test]
    fn test_registry_errors_not_retryable() {
        let err = RegistryError::Unauthorized {
            caller: Principal::new("user1"),
            role: Role::Admin,
        };
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_crate_error_wraps_registry_kind() {
        let err: Error = RegistryError::NotFound { id: RecordId(3) }.into();
        assert_eq!(err.registry_kind(), Some(ErrorKind::NotFound));
        assert_eq!(err.to_string(), "Record not found: 3");

        let err = Error::Configuration("bad".into());
        assert_eq!(err.registry_kind(), None);
    }

    #[test]
    fn test_error_kind_serde_names() {
        let kind: ErrorKind = serde_json::from_str("\"unauthorized\"").unwrap();
        assert_eq!(kind, ErrorKind::Unauthorized);
        assert_eq!(ErrorKind::NotFound.to_string(), "not_found");
    }
}
