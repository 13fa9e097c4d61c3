//! Resource descriptions shared by offers and launch descriptors.
//!
//! A resource is a named value that is either a scalar (`cpus`, `mem`) or a
//! list of inclusive integer ranges (`ports`). Offers advertise them and
//! launch descriptors claim them, using the same shape.

use serde::{Deserialize, Serialize};

pub const CPUS: &str = "cpus";
pub const MEM: &str = "mem";
pub const PORTS: &str = "ports";

/// A named resource.
///
/// Serializes as `{"name": "cpus", "scalar": 1.0}` or
/// `{"name": "ports", "ranges": [{"begin": 80, "end": 80}]}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Resource {
    pub name: String,
    #[serde(flatten)]
    pub value: ResourceValue,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum ResourceValue {
    Scalar(f64),
    Ranges(Vec<Range>),
}

/// Inclusive range `[begin, end]`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Range {
    pub begin: u64,
    pub end: u64,
}

impl Range {
    pub fn new(begin: u64, end: u64) -> Self {
        Self { begin, end }
    }

    /// A range covering exactly one value.
    pub fn point(value: u64) -> Self {
        Self::new(value, value)
    }

    pub fn contains(&self, value: u64) -> bool {
        self.begin <= value && value <= self.end
    }
}

impl Resource {
    pub fn scalar(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value: ResourceValue::Scalar(value),
        }
    }

    pub fn ranges(name: impl Into<String>, ranges: Vec<Range>) -> Self {
        Self {
            name: name.into(),
            value: ResourceValue::Ranges(ranges),
        }
    }

    /// A ranges resource claiming each port as its own single-point range.
    ///
    /// Returns `None` when there are no ports: a pod whose containers expose
    /// nothing on the host claims no port resource at all.
    pub fn point_ranges<I>(name: impl Into<String>, ports: I) -> Option<Self>
    where
        I: IntoIterator<Item = u64>,
    {
        let ranges: Vec<Range> = ports.into_iter().map(Range::point).collect();
        if ranges.is_empty() {
            return None;
        }
        Some(Self::ranges(name, ranges))
    }

    pub fn as_scalar(&self) -> Option<f64> {
        match &self.value {
            ResourceValue::Scalar(v) => Some(*v),
            ResourceValue::Ranges(_) => None,
        }
    }

    /// The ranges of this resource; empty for scalars.
    pub fn as_ranges(&self) -> &[Range] {
        match &self.value {
            ResourceValue::Ranges(r) => r,
            ResourceValue::Scalar(_) => &[],
        }
    }
}
