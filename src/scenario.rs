//! Scenario Runner
//!
//! Replays a scripted sequence of registry operations from a YAML or JSON
//! file against a fresh [`SharedRegistry`] and reports the outcome of each
//! step. Steps may declare the error they expect, which turns a scenario
//! file into an executable check of the registry's authorization rules.

use crate::config::RegistryConfig;
use crate::error::{Error, ErrorKind, RegistryResult, Result};
use crate::registry::{Principal, RecordId, RegistryStatsSnapshot, SharedRegistry};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;
use tracing::{debug, info, warn};

// =============================================================================
// Scenario Definition
// =============================================================================

/// A single registry operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case", deny_unknown_fields)]
pub enum Operation {
    Register {
        capacity: i64,
        owner: Principal,
    },
    UpdateAvailability {
        id: RecordId,
        available: bool,
        caller: Principal,
    },
    GetRecord {
        id: RecordId,
    },
    SetAdmin {
        new_admin: Principal,
        caller: Principal,
    },
}

impl Operation {
    /// Operation name as written in scenario files
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Register { .. } => "register",
            Operation::UpdateAvailability { .. } => "update_availability",
            Operation::GetRecord { .. } => "get_record",
            Operation::SetAdmin { .. } => "set_admin",
        }
    }
}

/// One scripted step
///
/// Keys other than `expect_error` belong to the operation, and unknown keys
/// are rejected, so a misspelled `expect_error` fails to load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct ScenarioStep {
    #[serde(flatten)]
    pub operation: Operation,
    /// Error kind the step must fail with; `None` means it must succeed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expect_error: Option<ErrorKind>,
}

impl TryFrom<Map<String, Value>> for ScenarioStep {
    type Error = serde_json::Error;

    fn try_from(mut fields: Map<String, Value>) -> std::result::Result<Self, Self::Error> {
        let expect_error = match fields.remove("expect_error") {
            Some(value) => serde_json::from_value(value)?,
            None => None,
        };
        let operation = serde_json::from_value(Value::Object(fields))?;
        Ok(Self {
            operation,
            expect_error,
        })
    }
}

/// A scripted run against a fresh registry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Overrides the configured initial admin
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin: Option<String>,
    #[serde(default)]
    pub steps: Vec<ScenarioStep>,
}

impl Scenario {
    /// Parse a scenario from YAML
    pub fn from_yaml_str(s: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Parse a scenario from JSON
    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Load a scenario file; `.json` files are read as JSON, anything else as YAML
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        debug!(path = %path.display(), json = is_json, "Loading scenario");
        if is_json {
            Self::from_json_str(&contents)
        } else {
            Self::from_yaml_str(&contents)
        }
    }

    /// Run every step against a fresh registry built from `config`
    pub fn run(&self, config: &RegistryConfig) -> Result<ScenarioReport> {
        let mut config = config.clone();
        if let Some(admin) = &self.admin {
            config.default_admin = admin.clone();
        }
        if self.steps.is_empty() {
            return Err(Error::Scenario("scenario has no steps".to_string()));
        }

        let registry = SharedRegistry::new(&config)?;
        info!(steps = self.steps.len(), admin = %config.default_admin, "Running scenario");

        let outcomes: Vec<StepOutcome> = self
            .steps
            .iter()
            .enumerate()
            .map(|(idx, step)| run_step(&registry, idx + 1, step))
            .collect();

        let passed = outcomes.iter().all(|o| o.matched);
        if passed {
            info!(steps = outcomes.len(), "Scenario passed");
        } else {
            warn!(
                failed = outcomes.iter().filter(|o| !o.matched).count(),
                "Scenario had unexpected outcomes"
            );
        }

        Ok(ScenarioReport {
            passed,
            admin: registry.admin(),
            stats: registry.stats(),
            outcomes,
        })
    }
}

// =============================================================================
// Outcomes
// =============================================================================

/// Whether a step succeeded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    Ok,
    Error,
}

/// Result of one step
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepOutcome {
    /// 1-based step number
    pub step: usize,
    pub op: &'static str,
    pub result: StepStatus,
    /// Returned value on success (`null` for an absent record)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Outcome agrees with the step's `expect_error`
    pub matched: bool,
}

/// Result of a full scenario run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioReport {
    pub passed: bool,
    /// Admin at the end of the run
    pub admin: Principal,
    pub stats: RegistryStatsSnapshot,
    pub outcomes: Vec<StepOutcome>,
}

fn run_step(registry: &SharedRegistry, step: usize, spec: &ScenarioStep) -> StepOutcome {
    let result: RegistryResult<Value> = match &spec.operation {
        Operation::Register { capacity, owner } => registry
            .register(*capacity, owner.clone())
            .map(|id| Value::from(id.get())),
        Operation::UpdateAvailability {
            id,
            available,
            caller,
        } => registry
            .update_availability(*id, *available, caller)
            .map(Value::Bool),
        Operation::GetRecord { id } => Ok(registry
            .get_record(*id)
            .and_then(|record| serde_json::to_value(record).ok())
            .unwrap_or(Value::Null)),
        Operation::SetAdmin { new_admin, caller } => registry
            .set_admin(new_admin.clone(), caller)
            .map(Value::Bool),
    };

    let op = spec.operation.name();
    match result {
        Ok(value) => {
            let matched = spec.expect_error.is_none();
            if !matched {
                warn!(step, op, expected = ?spec.expect_error, "Step succeeded but an error was expected");
            }
            StepOutcome {
                step,
                op,
                result: StepStatus::Ok,
                value: Some(value),
                error: None,
                message: None,
                matched,
            }
        }
        Err(e) => {
            let kind = e.kind();
            let matched = spec.expect_error == Some(kind);
            if !matched {
                warn!(step, op, error = %e, expected = ?spec.expect_error, "Step failed unexpectedly");
            }
            StepOutcome {
                step,
                op,
                result: StepStatus::Error,
                value: None,
                error: Some(kind),
                message: Some(e.to_string()),
                matched,
            }
        }
    }
}
