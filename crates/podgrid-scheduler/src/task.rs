//! Pod tasks and their offer binding lifecycle.
//!
//! A [`PodTask`] is the scheduler's handle on one pod instance. It starts
//! unbound, may be bound to an offer with [`PodTask::fill_task_info`] (which
//! materializes the launch descriptor), and unbound again with
//! [`PodTask::clear_task_info`] when the offer turns out to be unusable.
//!
//! Mutation goes through `&mut self`; a driver that shares tasks across
//! threads serializes access per task itself.

use std::sync::Arc;

use podgrid_core::{ExecutorInfo, Pod, ResourceFloors};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{SchedulerError, SchedulerResult};
use crate::matcher::{OfferFit, evaluate_offer};
use crate::offer::{OfferDetails, OfferRef, describe, same_offer};
use crate::ports::{PortSet, required_ports};
use crate::resource::{CPUS, MEM, PORTS, Resource};

/// Offer-derived part of a launch descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchSpec {
    pub task_id: String,
    pub agent_id: String,
    pub resources: Vec<Resource>,
    /// Opaque payload handed to the executor.
    pub data: Option<Vec<u8>>,
}

/// Binding state of a task. Offer and launch data only exist together.
#[derive(Debug, Clone, Default)]
pub enum Binding {
    #[default]
    Unbound,
    Bound { offer: OfferRef, launch: LaunchSpec },
}

/// Launch descriptor as submitted to the execution layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaskInfo {
    pub name: String,
    pub executor: ExecutorInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<String>,
    #[serde(default)]
    pub resources: Vec<Resource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<u8>>,
}

/// Static fields of the descriptor; these survive unbinding.
#[derive(Debug, Clone)]
struct TaskShell {
    name: String,
    executor: ExecutorInfo,
}

/// A pod awaiting or holding an offer.
#[derive(Debug)]
pub struct PodTask {
    id: String,
    pod: Arc<Pod>,
    key: String,
    shell: TaskShell,
    floors: ResourceFloors,
    binding: Binding,
    launched: bool,
    deleted: bool,
}

impl PodTask {
    /// Assemble an unbound task. Use [`TaskFactory`](crate::TaskFactory)
    /// to derive id and key.
    pub(crate) fn new(
        id: String,
        pod: Arc<Pod>,
        key: String,
        name: String,
        executor: ExecutorInfo,
        floors: ResourceFloors,
    ) -> Self {
        Self {
            id,
            pod,
            key,
            shell: TaskShell { name, executor },
            floors,
            binding: Binding::Unbound,
            launched: false,
            deleted: false,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn pod(&self) -> &Arc<Pod> {
        &self.pod
    }

    /// Storage key of the pod definition.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn floors(&self) -> &ResourceFloors {
        &self.floors
    }

    pub fn binding(&self) -> &Binding {
        &self.binding
    }

    /// Host ports this task must reserve.
    pub fn ports(&self) -> PortSet {
        required_ports(&self.pod)
    }

    // ── Matching ──────────────────────────────────────────────────

    /// Evaluate an offer for this task without touching either.
    ///
    /// Rejections are logged here, with the reason, pod and offer.
    pub fn evaluate_offer(&self, offer: &OfferDetails) -> OfferFit {
        let fit = evaluate_offer(&offer.resources, &self.ports(), &self.floors);
        if !fit.is_accepted() {
            debug!(pod = %self.pod.name, offer = %offer.id, ?fit, "offer rejected");
        }
        fit
    }

    pub fn accept_offer(&self, offer: &OfferDetails) -> bool {
        self.evaluate_offer(offer).is_accepted()
    }

    // ── Binding lifecycle ─────────────────────────────────────────

    /// Bind the task to `offer` and build its launch descriptor.
    ///
    /// Rebinding to the offer already held is a no-op in effect: the
    /// descriptor is rebuilt to the same value. Binding to a different offer
    /// while bound fails and leaves the current binding in place.
    pub fn fill_task_info(&mut self, offer: &OfferRef) -> SchedulerResult<()> {
        let details = offer.details().ok_or_else(|| SchedulerError::InvalidOffer {
            task_id: self.id.clone(),
            reason: "offer has no details".to_string(),
        })?;

        if let Binding::Bound { offer: bound, .. } = &self.binding {
            if !same_offer(bound, offer) {
                return Err(SchedulerError::NonIdempotentOffer {
                    task_id: self.id.clone(),
                    bound: describe(bound),
                    offered: details.id.clone(),
                });
            }
        }

        debug!(offer = %details.id, pod = %self.pod.name, "recording offer against pod");

        let mut resources = vec![
            Resource::scalar(CPUS, self.floors.cpus),
            Resource::scalar(MEM, self.floors.mem),
        ];
        resources.extend(Resource::point_ranges(PORTS, self.ports()));

        self.binding = Binding::Bound {
            offer: Arc::clone(offer),
            launch: LaunchSpec {
                task_id: self.id.clone(),
                agent_id: details.agent_id.clone(),
                resources,
                data: None,
            },
        };
        Ok(())
    }

    /// Drop the offer and every offer-derived descriptor field.
    pub fn clear_task_info(&mut self) {
        debug!(pod = %self.pod.name, "clearing offer from pod");
        self.binding = Binding::Unbound;
    }

    /// Attach an opaque executor payload to the bound descriptor.
    pub fn set_data(&mut self, data: Vec<u8>) -> SchedulerResult<()> {
        match &mut self.binding {
            Binding::Bound { launch, .. } => {
                launch.data = Some(data);
                Ok(())
            }
            Binding::Unbound => Err(SchedulerError::NotBound(self.id.clone())),
        }
    }

    pub fn has_accepted_offer(&self) -> bool {
        matches!(self.binding, Binding::Bound { .. })
    }

    pub fn bound_offer(&self) -> Option<&OfferRef> {
        match &self.binding {
            Binding::Bound { offer, .. } => Some(offer),
            Binding::Unbound => None,
        }
    }

    /// Id of the bound offer, if bound to one that still has details.
    pub fn offer_id(&self) -> Option<&str> {
        self.bound_offer()
            .and_then(|o| o.details())
            .map(|d| d.id.as_str())
    }

    /// Current launch descriptor. Offer-derived fields are empty when unbound.
    pub fn task_info(&self) -> TaskInfo {
        let mut info = TaskInfo {
            name: self.shell.name.clone(),
            executor: self.shell.executor.clone(),
            task_id: None,
            agent_id: None,
            resources: Vec::new(),
            data: None,
        };
        if let Binding::Bound { launch, .. } = &self.binding {
            info.task_id = Some(launch.task_id.clone());
            info.agent_id = Some(launch.agent_id.clone());
            info.resources = launch.resources.clone();
            info.data = launch.data.clone();
        }
        info
    }

    // ── Flags ─────────────────────────────────────────────────────

    /// Record that the descriptor was submitted. Cannot be undone.
    pub fn mark_launched(&mut self) {
        self.launched = true;
    }

    pub fn is_launched(&self) -> bool {
        self.launched
    }

    /// Record that the task is to be removed. Cannot be undone.
    pub fn mark_deleted(&mut self) {
        self.deleted = true;
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::offer::OfferSnapshot;
    use crate::resource::Range;
    use podgrid_core::Container;

    fn task(pod: Pod) -> PodTask {
        PodTask::new(
            "task-1".to_string(),
            Arc::new(pod),
            "/pods/default/web".to_string(),
            "PodTask".to_string(),
            ExecutorInfo::new("exec-1"),
            ResourceFloors::default(),
        )
    }

    fn web_pod() -> Pod {
        Pod::new("default", "web").with_container(Container::new("nginx").with_port(80, 8005))
    }

    fn offer(id: &str) -> OfferRef {
        OfferSnapshot::new(OfferDetails {
            id: id.to_string(),
            agent_id: format!("agent-of-{id}"),
            hostname: "host".to_string(),
            resources: vec![
                Resource::scalar(CPUS, 1.0),
                Resource::scalar(MEM, 256.0),
                Resource::ranges(PORTS, vec![Range::new(8000, 8010)]),
            ],
        })
        .into_ref()
    }

    #[test]
    fn new_task_is_unbound() {
        let t = task(web_pod());
        assert!(!t.has_accepted_offer());
        assert!(t.offer_id().is_none());
        assert!(!t.is_launched());
        assert!(!t.is_deleted());

        let info = t.task_info();
        assert_eq!(info.name, "PodTask");
        assert_eq!(info.executor.executor_id, "exec-1");
        assert!(info.task_id.is_none());
        assert!(info.resources.is_empty());
    }

    #[test]
    fn fill_builds_descriptor() {
        let mut t = task(web_pod());
        let o = offer("o1");
        t.fill_task_info(&o).unwrap();

        assert_eq!(t.offer_id(), Some("o1"));
        let info = t.task_info();
        assert_eq!(info.task_id.as_deref(), Some("task-1"));
        assert_eq!(info.agent_id.as_deref(), Some("agent-of-o1"));
        assert_eq!(
            info.resources,
            vec![
                Resource::scalar(CPUS, 0.25),
                Resource::scalar(MEM, 64.0),
                Resource::ranges(PORTS, vec![Range::point(8005)]),
            ]
        );
    }

    #[test]
    fn fill_without_ports_claims_only_scalars() {
        let mut t = task(Pod::new("default", "batch").with_container(Container::new("job")));
        t.fill_task_info(&offer("o1")).unwrap();
        assert_eq!(t.task_info().resources.len(), 2);
    }

    #[test]
    fn fill_rejects_offer_without_details() {
        let mut t = task(web_pod());
        let err = t.fill_task_info(&OfferSnapshot::empty().into_ref()).unwrap_err();

        assert!(matches!(err, SchedulerError::InvalidOffer { .. }));
        assert!(err.is_validation());
        assert!(!t.has_accepted_offer());
    }

    #[test]
    fn fill_twice_with_same_offer_is_idempotent() {
        let mut t = task(web_pod());
        let o = offer("o1");
        t.fill_task_info(&o).unwrap();
        let first = t.task_info();

        t.fill_task_info(&Arc::clone(&o)).unwrap();
        assert_eq!(t.task_info(), first);
        assert!(same_offer(t.bound_offer().unwrap(), &o));
    }

    #[test]
    fn fill_with_other_offer_keeps_binding() {
        let mut t = task(web_pod());
        let o1 = offer("o1");
        t.fill_task_info(&o1).unwrap();
        t.set_data(b"payload".to_vec()).unwrap();
        let before = t.task_info();

        let err = t.fill_task_info(&offer("o2")).unwrap_err();
        match err {
            SchedulerError::NonIdempotentOffer { bound, offered, .. } => {
                assert_eq!(bound, "o1");
                assert_eq!(offered, "o2");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(t.task_info(), before);
        assert!(same_offer(t.bound_offer().unwrap(), &o1));
    }

    #[test]
    fn clear_keeps_static_fields() {
        let mut t = task(web_pod());
        t.fill_task_info(&offer("o1")).unwrap();
        t.set_data(vec![1, 2, 3]).unwrap();
        t.clear_task_info();

        let info = t.task_info();
        assert!(t.bound_offer().is_none());
        assert!(info.task_id.is_none());
        assert!(info.agent_id.is_none());
        assert!(info.resources.is_empty());
        assert!(info.data.is_none());
        assert_eq!(info.name, "PodTask");
        assert_eq!(info.executor.executor_id, "exec-1");
    }

    #[test]
    fn clear_on_unbound_task_is_harmless() {
        let mut t = task(web_pod());
        t.clear_task_info();
        t.clear_task_info();
        assert!(!t.has_accepted_offer());
    }

    #[test]
    fn rebind_after_clear_accepts_new_offer() {
        let mut t = task(web_pod());
        t.fill_task_info(&offer("o1")).unwrap();
        t.clear_task_info();
        t.fill_task_info(&offer("o2")).unwrap();
        assert_eq!(t.offer_id(), Some("o2"));
    }

    #[test]
    fn fill_resets_payload() {
        let mut t = task(web_pod());
        let o = offer("o1");
        t.fill_task_info(&o).unwrap();
        t.set_data(vec![9]).unwrap();
        t.fill_task_info(&o).unwrap();
        assert!(t.task_info().data.is_none());
    }

    #[test]
    fn set_data_requires_binding() {
        let mut t = task(web_pod());
        assert!(matches!(t.set_data(vec![1]), Err(SchedulerError::NotBound(_))));
    }

    #[test]
    fn accept_offer_uses_task_ports() {
        let t = task(web_pod());
        let o = offer("o1");
        assert!(t.accept_offer(o.details().unwrap()));

        let far = task(Pod::new("default", "far").with_container(Container::new("c").with_port(80, 9000)));
        assert!(!far.accept_offer(o.details().unwrap()));
    }

    #[test]
    fn evaluate_offer_reports_rejection_reason() {
        let far = task(Pod::new("default", "far").with_container(Container::new("c").with_port(80, 9000)));
        let o = offer("o1");

        let fit = far.evaluate_offer(o.details().unwrap());
        assert_eq!(fit, OfferFit::UnsatisfiedPorts(PortSet::from([9000])));
        assert!(!far.has_accepted_offer());
    }

    #[test]
    fn flags_are_sticky() {
        let mut t = task(web_pod());
        t.mark_launched();
        t.mark_deleted();
        t.clear_task_info();
        assert!(t.is_launched());
        assert!(t.is_deleted());
    }

    #[test]
    fn descriptor_serializes_without_empty_fields() {
        let t = task(web_pod());
        let json = serde_json::to_value(t.task_info()).unwrap();
        assert!(json.get("task_id").is_none());
        assert_eq!(json["name"], "PodTask");
    }
}
