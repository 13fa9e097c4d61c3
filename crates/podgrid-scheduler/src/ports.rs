//! Host port requirements of a pod.

use std::collections::BTreeSet;

use podgrid_core::Pod;

/// A set of host ports. Iteration order carries no meaning for callers.
pub type PortSet = BTreeSet<u64>;

/// Collect the host ports the pod's containers ask to bind.
///
/// Declarations with host port `0` are wildcards: the container runtime picks
/// nothing on the host for them, so they consume no offered port.
pub fn required_ports(pod: &Pod) -> PortSet {
    pod.spec
        .containers
        .iter()
        .flat_map(|c| c.ports.iter())
        .filter(|p| p.binds_host())
        .map(|p| u64::from(p.host_port))
        .collect()
}
