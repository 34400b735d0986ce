//! Narrow interfaces to everything a convoy reads from or reports to.

use super::cargo::CargoType;
use crate::path::Path;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Opaque handle of a service point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ServicePointId(pub u32);

/// Read-only view of a service point, taken at the start of a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServicePointView {
    pub id: ServicePointId,
    pub demanded_type: CargoType,
    pub queue_length: usize,
}

/// What a convoy's assigned route looks like this tick.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteSnapshot {
    pub path: Path,
    pub service_stops: Vec<ServicePointView>,
}

impl RouteSnapshot {
    pub fn new(path: Path, service_stops: Vec<ServicePointView>) -> Self {
        Self {
            path,
            service_stops,
        }
    }

    pub fn stop(&self, id: ServicePointId) -> Option<&ServicePointView> {
        self.service_stops.iter().find(|stop| stop.id == id)
    }
}

/// Where a convoy gets its route from. `None` means it has been unassigned.
pub trait PathSource {
    fn snapshot(&self) -> Option<RouteSnapshot>;
}

/// A fixed route that never changes.
impl PathSource for RouteSnapshot {
    fn snapshot(&self) -> Option<RouteSnapshot> {
        Some(self.clone())
    }
}

/// Fleet-wide counters notified when convoys are disposed.
pub trait FleetAccounting {
    fn trailing_unit_released(&self);

    fn lead_unit_released(&self);
}

/// Atomic counters of released units.
#[derive(Debug, Default)]
pub struct FleetCounters {
    trailing: AtomicU64,
    leads: AtomicU64,
}

impl FleetCounters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trailing_released(&self) -> u64 {
        self.trailing.load(Ordering::Relaxed)
    }

    pub fn leads_released(&self) -> u64 {
        self.leads.load(Ordering::Relaxed)
    }
}

impl FleetAccounting for FleetCounters {
    fn trailing_unit_released(&self) {
        self.trailing.fetch_add(1, Ordering::Relaxed);
    }

    fn lead_unit_released(&self) {
        self.leads.fetch_add(1, Ordering::Relaxed);
    }
}

/// The lead unit's own visuals, including the cargo it displays.
pub trait ConvoyVisuals {
    /// Tint everything to show the convoy is winding down.
    fn mark_for_removal(&mut self);
}

/// Visuals that ignore every signal.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoVisuals;

impl ConvoyVisuals for NoVisuals {
    fn mark_for_removal(&mut self) {}
}
