//! Offers as seen by the scheduler.
//!
//! The offer source owns offer lifetime and expiry. This crate only reads a
//! snapshot of the offer through [`PerishableOffer::details`], and identifies
//! offers by the shared handle they are passed around in.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::resource::Resource;

/// Shared handle to an offer. Two handles denote the same offer when they
/// point at the same allocation.
pub type OfferRef = Arc<dyn PerishableOffer>;

/// Snapshot of the resources an agent advertises.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct OfferDetails {
    pub id: String,
    pub agent_id: String,
    #[serde(default)]
    pub hostname: String,
    #[serde(default)]
    pub resources: Vec<Resource>,
}

/// An offer that may be rescinded or expire outside the scheduler's control.
pub trait PerishableOffer: fmt::Debug + Send + Sync {
    /// Current details, or `None` if the offer carries no usable payload.
    fn details(&self) -> Option<&OfferDetails>;
}

/// A fixed, never-expiring offer backed by plain details.
#[derive(Debug, Clone, Default)]
pub struct OfferSnapshot {
    details: Option<OfferDetails>,
}

impl OfferSnapshot {
    pub fn new(details: OfferDetails) -> Self {
        Self {
            details: Some(details),
        }
    }

    /// An offer with no details, as left behind by a rescinded offer.
    pub fn empty() -> Self {
        Self { details: None }
    }

    /// Wrap into a shared [`OfferRef`].
    pub fn into_ref(self) -> OfferRef {
        Arc::new(self)
    }
}

impl PerishableOffer for OfferSnapshot {
    fn details(&self) -> Option<&OfferDetails> {
        self.details.as_ref()
    }
}

/// Whether two handles refer to the same offer.
pub fn same_offer(a: &OfferRef, b: &OfferRef) -> bool {
    Arc::ptr_eq(a, b)
}

/// Offer id for logs and errors; `"<none>"` when details are missing.
pub(crate) fn describe(offer: &OfferRef) -> String {
    offer
        .details()
        .map(|d| d.id.clone())
        .unwrap_or_else(|| "<none>".to_string())
}
