//! podgrid-core — shared types for the podgrid scheduler.
//!
//! Holds the workload definitions the scheduler reads (`Pod`, `Container`,
//! `ContainerPort`), the executor descriptor carried through to launch
//! descriptors, the `podgrid.toml` configuration, and the storage-key
//! helpers used to address pods in the backing store.

pub mod config;
pub mod error;
pub mod key;
pub mod types;

pub use config::{PodgridConfig, ResourceFloors, StoreConfig, TaskConfig};
pub use error::{CoreError, CoreResult};
pub use types::*;
