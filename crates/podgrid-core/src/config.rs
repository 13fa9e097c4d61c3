//! podgrid.toml configuration parser.
//!
//! Every section is optional; missing values fall back to the defaults the
//! scheduler has always used (0.25 CPU and 64 MB of executor overhead, a task
//! named `PodTask`, pods stored under `/pods`).

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::key::POD_PATH;

/// Initial CPU allocated for the executor.
pub const DEFAULT_EXECUTOR_CPUS: f64 = 0.25;
/// Initial memory (MB) allocated for the executor.
pub const DEFAULT_EXECUTOR_MEM: f64 = 64.0;
/// Static name given to every launch descriptor.
pub const DEFAULT_TASK_NAME: &str = "PodTask";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct PodgridConfig {
    pub floors: ResourceFloors,
    pub task: TaskConfig,
    pub store: StoreConfig,
}

/// Minimum resources an offer must carry for a task to be placed on it.
///
/// These stand for the executor's own footprint, not the workload's requests.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ResourceFloors {
    pub cpus: f64,
    pub mem: f64,
}

impl Default for ResourceFloors {
    fn default() -> Self {
        Self {
            cpus: DEFAULT_EXECUTOR_CPUS,
            mem: DEFAULT_EXECUTOR_MEM,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TaskConfig {
    pub name: String,
}

impl Default for TaskConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_TASK_NAME.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StoreConfig {
    pub pod_prefix: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            pod_prefix: POD_PATH.to_string(),
        }
    }
}

impl PodgridConfig {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse and validate a TOML document.
    pub fn parse(content: &str) -> anyhow::Result<Self> {
        let config: PodgridConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        for (name, value) in [("cpus", self.floors.cpus), ("mem", self.floors.mem)] {
            if !value.is_finite() || value < 0.0 {
                anyhow::bail!("floors.{name} must be a non-negative number, got {value}");
            }
        }
        if self.task.name.is_empty() {
            anyhow::bail!("task.name must not be empty");
        }
        if self.store.pod_prefix.is_empty() {
            anyhow::bail!("store.pod_prefix must not be empty");
        }
        Ok(())
    }
}
