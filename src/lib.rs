//! Quantum Registry - Ownership-Gated Record Registry
//!
//! Callers register quantum computers under auto-incrementing ids. Only a
//! record's registrant may toggle its availability, and only the registry
//! admin may hand the admin role to someone else.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                 quantum-registry CLI (scenarios)             │
//! ├──────────────────────────────────────────────────────────────┤
//! │                      SharedRegistry                          │
//! │     (single RwLock, stats counters, event broadcast)         │
//! │                            │                                 │
//! │                ┌───────────┴───────────┐                     │
//! │                │   Registry (core)     │                     │
//! │                │ records · next_id ·   │                     │
//! │                │ admin                 │                     │
//! │                └───────────────────────┘                     │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`registry`]: Core state machine, shared front end and events
//! - [`scenario`]: Scripted replays of registry operations
//! - [`config`]: Registry configuration
//! - [`error`]: Error types and handling

pub mod config;
pub mod error;
pub mod registry;
pub mod scenario;

// Re-export commonly used types
pub use config::RegistryConfig;

pub use error::{Error, ErrorKind, RegistryError, RegistryResult, Result, Role};

pub use registry::{
    Principal, Record, RecordId, Registry, RegistryEvent, RegistryStatsSnapshot,
    SharedRegistry,
};

pub use scenario::{Operation, Scenario, ScenarioReport, ScenarioStep, StepOutcome, StepStatus};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
