//! Workload and executor types consumed by the scheduler.
//!
//! These mirror the subset of a pod definition the scheduler needs: identity
//! (namespace + name) and the container port declarations that turn into
//! host-port reservations. Everything is serde-serializable so pods can be
//! read straight from JSON.

use serde::{Deserialize, Serialize};

/// Host port value meaning "no host binding requested".
pub const UNSET_HOST_PORT: u16 = 0;

// ── Pod ───────────────────────────────────────────────────────────

/// A deployable workload unit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Pod {
    pub name: String,
    #[serde(default)]
    pub namespace: String,
    #[serde(default)]
    pub spec: PodSpec,
}

/// The container layout of a pod.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PodSpec {
    #[serde(default)]
    pub containers: Vec<Container>,
}

/// A single container inside a pod.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Container {
    pub name: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub ports: Vec<ContainerPort>,
}

/// A port exposed by a container, optionally mapped onto the host.
///
/// Uses camelCase on the wire (`containerPort`, `hostPort`) so pod manifests
/// can be read as written for Kubernetes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ContainerPort {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub container_port: u16,
    /// Host port to reserve. `0` leaves the binding to the runtime.
    #[serde(default)]
    pub host_port: u16,
    #[serde(default)]
    pub protocol: Protocol,
}

impl ContainerPort {
    /// Whether this declaration consumes a port on the host.
    pub fn binds_host(&self) -> bool {
        self.host_port != UNSET_HOST_PORT
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Protocol {
    #[default]
    Tcp,
    Udp,
}

impl Pod {
    /// Build a pod with no containers.
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            spec: PodSpec::default(),
        }
    }

    /// Append a container, returning `self` for chaining.
    pub fn with_container(mut self, container: Container) -> Self {
        self.spec.containers.push(container);
        self
    }
}

impl Container {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Declare a port mapping `container_port -> host_port`.
    pub fn with_port(mut self, container_port: u16, host_port: u16) -> Self {
        self.ports.push(ContainerPort {
            name: None,
            container_port,
            host_port,
            protocol: Protocol::Tcp,
        });
        self
    }
}

// ── Executor ──────────────────────────────────────────────────────

/// The execution agent that will run a task on the target host.
///
/// The scheduler never interprets these fields; they ride along in every
/// launch descriptor built for the task.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ExecutorInfo {
    pub executor_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
}

impl ExecutorInfo {
    pub fn new(executor_id: impl Into<String>) -> Self {
        Self {
            executor_id: executor_id.into(),
            ..Default::default()
        }
    }
}
