//! podgrid-scheduler — offer matching and task binding.
//!
//! Decides whether a resource offer can host a pod and, once it can, binds
//! the pod's task to that offer by materializing a launch descriptor. The
//! driver that picks candidate offers, submits descriptors and handles
//! retries lives outside this crate.
//!
//! # Components
//!
//! - **`ports`** — host ports a pod must reserve
//! - **`matcher`** — single-offer sufficiency check (cpus, mem, port ranges)
//! - **`task`** — `PodTask` and its bind / unbind lifecycle
//! - **`factory`** — task construction, identity and storage key
//!
//! # Architecture
//!
//! ```text
//! TaskFactory ──creates──▶ PodTask (Unbound)
//!                            │  accept_offer(&OfferDetails)   ── matcher + ports
//!                            │  fill_task_info(&OfferRef)     ── Bound { offer, launch }
//!                            │  clear_task_info()             ── Unbound
//!                            ▼
//!                         TaskInfo (launch descriptor, serializable)
//! ```

pub mod error;
pub mod factory;
pub mod matcher;
pub mod offer;
pub mod ports;
pub mod resource;
pub mod task;

pub use error::{SchedulerError, SchedulerResult};
pub use factory::{IdGenerator, TaskFactory, UuidGenerator};
pub use matcher::{OfferFit, accept_offer, evaluate_offer};
pub use offer::{OfferDetails, OfferRef, OfferSnapshot, PerishableOffer};
pub use ports::{PortSet, required_ports};
pub use resource::{Range, Resource, ResourceValue};
pub use task::{Binding, LaunchSpec, PodTask, TaskInfo};
