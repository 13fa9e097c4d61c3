//! Offer sufficiency check.
//!
//! A single offer fits a task when:
//! - every required host port lies inside some `ports` range of the offer,
//! - the offer's total `cpus` and `mem` reach the configured floors.
//!
//! The floors describe executor overhead, so the check never looks at what
//! the workload itself requests. Matching is read-only and may run
//! concurrently against the same offer.

use podgrid_core::ResourceFloors;
use tracing::trace;

use crate::ports::PortSet;
use crate::resource::{CPUS, MEM, PORTS, Resource};

/// Outcome of evaluating one offer against one task.
#[derive(Debug, Clone, PartialEq)]
pub enum OfferFit {
    Accepted,
    /// Required ports no range in the offer covers.
    UnsatisfiedPorts(PortSet),
    /// Offered totals fall below the floors.
    InsufficientResources { cpus: f64, mem: f64 },
}

impl OfferFit {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }
}

/// Evaluate an offer's resources against required ports and floors.
pub fn evaluate_offer(
    resources: &[Resource],
    required_ports: &PortSet,
    floors: &ResourceFloors,
) -> OfferFit {
    let mut cpus = 0.0;
    let mut mem = 0.0;
    let mut pending = required_ports.clone();

    for resource in resources {
        match resource.name.as_str() {
            CPUS => cpus += resource.as_scalar().unwrap_or(0.0),
            MEM => mem += resource.as_scalar().unwrap_or(0.0),
            PORTS => {
                for range in resource.as_ranges() {
                    pending.retain(|&port| {
                        trace!(begin = range.begin, end = range.end, port, "evaluating port range");
                        !range.contains(port)
                    });
                }
            }
            _ => {}
        }
    }

    if !pending.is_empty() {
        return OfferFit::UnsatisfiedPorts(pending);
    }

    if cpus < floors.cpus || mem < floors.mem {
        return OfferFit::InsufficientResources { cpus, mem };
    }

    OfferFit::Accepted
}

/// Whether the offer can host a task with these requirements.
pub fn accept_offer(resources: &[Resource], required_ports: &PortSet, floors: &ResourceFloors) -> bool {
    evaluate_offer(resources, required_ports, floors).is_accepted()
}
