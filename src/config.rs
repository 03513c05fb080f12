//! Registry Configuration

use crate::error::{Error, Result};
use crate::registry::record::Principal;
use serde::{Deserialize, Serialize};

/// Admin identity a fresh registry starts with
pub const DEFAULT_ADMIN: &str = "owner";

/// Default buffer size of the event broadcast channel
pub const DEFAULT_EVENT_CAPACITY: usize = 1024;

/// Configuration for a registry instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Initial admin identity
    pub default_admin: String,
    /// Event channel capacity for [`SharedRegistry`](crate::SharedRegistry)
    pub event_capacity: usize,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            default_admin: DEFAULT_ADMIN.to_string(),
            event_capacity: DEFAULT_EVENT_CAPACITY,
        }
    }
}

impl RegistryConfig {
    /// Override the initial admin
    pub fn with_admin(mut self, admin: impl Into<String>) -> Self {
        self.default_admin = admin.into();
        self
    }

    /// Check that the configuration yields a well-defined registry
    pub fn validate(&self) -> Result<()> {
        if self.default_admin.trim().is_empty() {
            return Err(Error::Configuration(
                "default admin must not be empty".to_string(),
            ));
        }
        if self.event_capacity == 0 {
            return Err(Error::Configuration(
                "event capacity must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Initial admin as a principal
    pub fn admin(&self) -> Principal {
        Principal::new(self.default_admin.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_defaults() {
        let config = RegistryConfig::default();
        assert_eq!(config.default_admin, "owner");
        assert_eq!(config.event_capacity, 1024);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_empty_admin() {
        let config = RegistryConfig::default().with_admin("  ");
        assert_matches!(config.validate(), Err(Error::Configuration(_)));
    }

    #[test]
    fn test_rejects_zero_event_capacity() {
        let config = RegistryConfig {
            event_capacity: 0,
            ..Default::default()
        };
        assert_matches!(config.validate(), Err(Error::Configuration(_)));
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config: RegistryConfig = serde_yaml::from_str("default_admin: root\n").unwrap();
        assert_eq!(config.default_admin, "root");
        assert_eq!(config.event_capacity, DEFAULT_EVENT_CAPACITY);
    }
}
