//! Task construction.
//!
//! The factory derives a task's storage key from the pod's namespace and
//! name, draws a fresh id from an [`IdGenerator`], and hands the task the
//! configured resource floors and descriptor name.

use std::fmt;
use std::sync::Arc;

use podgrid_core::{ExecutorInfo, Pod, PodgridConfig, ResourceFloors, key};
use tracing::debug;

use crate::error::SchedulerResult;
use crate::task::PodTask;

/// Source of task identifiers.
///
/// Ids must be unique across all live tasks; the scheduler does not check.
pub trait IdGenerator: fmt::Debug + Send + Sync {
    fn next_id(&self) -> String;
}

/// Random (v4) UUIDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

/// Builds [`PodTask`]s with a fixed configuration.
#[derive(Debug, Clone)]
pub struct TaskFactory {
    floors: ResourceFloors,
    task_name: String,
    pod_prefix: String,
    ids: Arc<dyn IdGenerator>,
}

impl TaskFactory {
    /// Create a factory issuing UUID task ids.
    pub fn new(config: &PodgridConfig) -> Self {
        Self::with_ids(config, Arc::new(UuidGenerator))
    }

    pub fn with_ids(config: &PodgridConfig, ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            floors: config.floors,
            task_name: config.task.name.clone(),
            pod_prefix: config.store.pod_prefix.clone(),
            ids,
        }
    }

    /// Create an unbound task for `pod`, to be run by `executor`.
    ///
    /// Fails without producing a task if the pod's namespace or name is empty.
    pub fn new_pod_task(&self, pod: Arc<Pod>, executor: ExecutorInfo) -> SchedulerResult<PodTask> {
        let key = key::item_key(&self.pod_prefix, &pod.namespace, &pod.name)?;
        let id = self.ids.next_id();
        debug!(task_id = %id, %key, "created pod task");

        Ok(PodTask::new(
            id,
            pod,
            key,
            self.task_name.clone(),
            executor,
            self.floors,
        ))
    }
}

impl Default for TaskFactory {
    fn default() -> Self {
        Self::new(&PodgridConfig::default())
    }
}
