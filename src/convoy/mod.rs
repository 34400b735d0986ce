//! The convoy: a lead unit, its trailing units and their cargo.
//!
//! A [`Convoy`] is ticked once per simulation step. Each tick it
//!
//! 1. polls its [`PathSource`] for this tick's route (or notices it has been
//!    unassigned and starts winding down),
//! 2. ticks its state machine, which either changes state or runs the
//!    current [`Phase`],
//! 3. repositions every trailing unit behind the lead,
//! 4. checks whether a pending removal has finished.
//!
//! # Example
//!
//! ```rust
//! use convoy::convoy::{ConvoyBuilder, ConvoyStatus, FleetCounters, RouteSnapshot};
//! use convoy::path::{Path, Vec2};
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use std::sync::Arc;
//!
//! let route = RouteSnapshot::new(
//!     Path::open(vec![Vec2::new(0.0, 0.0), Vec2::new(5.0, 0.0)]),
//!     Vec::new(),
//! );
//! let fleet = Arc::new(FleetCounters::new());
//!
//! let mut convoy = ConvoyBuilder::new()
//!     .source(route)
//!     .accounting(fleet.clone())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(convoy.tick(0.016), ConvoyStatus::Active);
//!
//! // Nothing on board, so removal completes on the spot.
//! let done = Rc::new(Cell::new(false));
//! let flag = done.clone();
//! convoy.request_removal(move || flag.set(true));
//!
//! assert!(done.get());
//! assert!(convoy.is_disposed());
//! assert_eq!(fleet.leads_released(), 1);
//! ```

mod behavior;
mod cargo;
mod collaborators;
mod error;
mod removal;

pub use behavior::{
    arrived, convoy_machine, loaded, unloaded, ConvoyData, ConvoyState, Idle, Phase, Phases,
};
pub use cargo::{Cargo, CargoType, CargoUnit};
pub use collaborators::{
    ConvoyVisuals, FleetAccounting, FleetCounters, NoVisuals, PathSource, RouteSnapshot,
    ServicePointId, ServicePointView,
};
pub use error::ConvoyError;
pub use removal::RemovalState;

use crate::checkpoint::{Checkpoint, CHECKPOINT_VERSION};
use crate::config::ConvoyConfig;
use crate::core::{State, StateHistory};
use crate::formation::{TrailFormation, TrailingUnit};
use crate::fsm::StateMachine;
use crate::path::{ProgressCursor, Vec2};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

/// Stable identity of a convoy, carried through logs and checkpoints.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConvoyId(Uuid);

impl ConvoyId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ConvoyId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConvoyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Whether a convoy is still in the simulation after a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConvoyStatus {
    Active,
    Disposed,
}

type OnComplete = Box<dyn FnOnce()>;

/// Assembles a [`Convoy`] from its collaborators.
pub struct ConvoyBuilder {
    id: Option<ConvoyId>,
    config: ConvoyConfig,
    phases: Phases,
    source: Option<Box<dyn PathSource>>,
    accounting: Option<Arc<dyn FleetAccounting>>,
    visuals: Box<dyn ConvoyVisuals>,
    start: Option<(Vec2, ProgressCursor)>,
    checkpoint: Option<Checkpoint>,
}

impl Default for ConvoyBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ConvoyBuilder {
    pub fn new() -> Self {
        Self {
            id: None,
            config: ConvoyConfig::default(),
            phases: Phases::default(),
            source: None,
            accounting: None,
            visuals: Box::new(NoVisuals),
            start: None,
            checkpoint: None,
        }
    }

    pub fn id(mut self, id: ConvoyId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn config(mut self, config: ConvoyConfig) -> Self {
        self.config = config;
        self
    }

    pub fn phases(mut self, phases: Phases) -> Self {
        self.phases = phases;
        self
    }

    /// Where the convoy reads its route each tick (required).
    pub fn source(mut self, source: impl PathSource + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Fleet counters notified on disposal (required).
    pub fn accounting(mut self, accounting: Arc<dyn FleetAccounting>) -> Self {
        self.accounting = Some(accounting);
        self
    }

    pub fn visuals(mut self, visuals: impl ConvoyVisuals + 'static) -> Self {
        self.visuals = Box::new(visuals);
        self
    }

    /// Place the lead somewhere other than the route's first waypoint.
    pub fn start_at(mut self, position: Vec2, cursor: ProgressCursor) -> Self {
        self.start = Some((position, cursor));
        self
    }

    /// Continue from a saved checkpoint instead of starting fresh.
    ///
    /// Trailing units are not part of a checkpoint and must be attached
    /// again after building.
    pub fn resume(mut self, checkpoint: Checkpoint) -> Self {
        self.checkpoint = Some(checkpoint);
        self
    }

    pub fn build(self) -> Result<Convoy, ConvoyError> {
        self.config.check()?;
        let source = self.source.ok_or(ConvoyError::MissingPathSource)?;
        let accounting = self.accounting.ok_or(ConvoyError::MissingAccounting)?;

        let route = source.snapshot().unwrap_or_default();
        let mut data = ConvoyData::new(route, self.config.cargo_per_unit);
        if let Some((position, cursor)) = self.start {
            data.position = position;
            data.cursor = cursor;
        }

        let mut id = self.id.unwrap_or_default();
        let mut visuals = self.visuals;
        let machine = match self.checkpoint {
            None => convoy_machine(ConvoyState::Travel)?,
            Some(checkpoint) => {
                checkpoint.validate()?;
                id = checkpoint.id;
                data.position = checkpoint.position;
                data.cursor = checkpoint.cursor;
                data.cargo = checkpoint.cargo;
                data.service_point = checkpoint.service_point;
                data.removal = checkpoint.removal;
                if data.removal.is_pending() {
                    visuals.mark_for_removal();
                }
                convoy_machine(checkpoint.state)?
                    .with_history(checkpoint.history, checkpoint.ticks)
            }
        };

        debug!(convoy = %id, state = machine.current_state().name(), "convoy built");

        Ok(Convoy {
            id,
            formation: self.config.formation(),
            config: self.config,
            data,
            machine,
            phases: self.phases,
            source,
            accounting,
            visuals,
            on_complete: None,
            disposed: false,
        })
    }
}

/// A lead unit with trailing units, driven one tick at a time.
pub struct Convoy {
    id: ConvoyId,
    config: ConvoyConfig,
    data: ConvoyData,
    machine: StateMachine<ConvoyState, ConvoyData>,
    phases: Phases,
    formation: TrailFormation,
    source: Box<dyn PathSource>,
    accounting: Arc<dyn FleetAccounting>,
    visuals: Box<dyn ConvoyVisuals>,
    on_complete: Option<OnComplete>,
    disposed: bool,
}

impl Convoy {
    pub fn id(&self) -> ConvoyId {
        self.id
    }

    pub fn config(&self) -> &ConvoyConfig {
        &self.config
    }

    pub fn state(&self) -> ConvoyState {
        *self.machine.current_state()
    }

    pub fn data(&self) -> &ConvoyData {
        &self.data
    }

    pub fn position(&self) -> Vec2 {
        self.data.position
    }

    pub fn cursor(&self) -> ProgressCursor {
        self.data.cursor
    }

    pub fn cargo(&self) -> &Cargo {
        &self.data.cargo
    }

    /// Cargo, for collaborators that fill or drain it outside a phase.
    pub fn cargo_mut(&mut self) -> &mut Cargo {
        &mut self.data.cargo
    }

    pub fn removal(&self) -> &RemovalState {
        &self.data.removal
    }

    pub fn history(&self) -> &StateHistory<ConvoyState> {
        self.machine.history()
    }

    pub fn trailing_count(&self) -> usize {
        self.data.trailing.len()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Put the lead at (or take it away from) a service point.
    pub fn assign_service_point(&mut self, point: Option<ServicePointView>) {
        self.data.service_point = point;
    }

    /// Couple a trailing unit to the back of the convoy.
    pub fn attach_trailing_unit(&mut self, mut unit: Box<dyn TrailingUnit>) {
        if self.data.removal.is_pending() {
            unit.mark_for_removal();
        }
        self.data.trailing.push(unit);
    }

    /// Uncouple the rearmost trailing unit.
    pub fn detach_trailing_unit(&mut self) -> Option<Box<dyn TrailingUnit>> {
        self.data.trailing.pop()
    }

    /// Advance the convoy by one simulation step.
    ///
    /// A disposed convoy ignores further ticks.
    pub fn tick(&mut self, delta_time: f32) -> ConvoyStatus {
        if self.disposed {
            return ConvoyStatus::Disposed;
        }

        match self.source.snapshot() {
            Some(route) => self.data.refresh_route(route),
            None if !self.data.removal.is_pending() => {
                debug!(convoy = %self.id, "route unassigned, winding down");
                self.begin_removal(None);
                if self.disposed {
                    return ConvoyStatus::Disposed;
                }
            }
            None => {}
        }

        self.machine.tick(&mut self.data, &mut self.phases, delta_time);

        self.formation.arrange(
            &self.data.route.path,
            self.data.position,
            self.data.cursor,
            &mut self.data.trailing,
        );

        if self.data.removal.is_pending() {
            let stops = self.data.service_stop_count();
            if !self.data.cargo.is_empty() {
                let serviced = self.data.can_unload_here();
                self.data.removal.record_tick(serviced, stops);
            }
            if self
                .data
                .removal
                .is_complete(self.data.cargo.is_empty(), stops)
            {
                self.dispose();
                return ConvoyStatus::Disposed;
            }
        }

        ConvoyStatus::Active
    }

    /// Ask the convoy to retire, calling `on_complete` once it is gone.
    ///
    /// With no cargo on board the convoy is disposed before this returns.
    /// Otherwise it keeps running until its cargo is gone or it has spent as
    /// many ticks without a useful service point as its route has stops.
    /// Calls made while a removal is already pending leave the wind-down
    /// untouched. Their callback is kept only if the pending removal has none
    /// yet (it began because the route was unassigned); otherwise it is
    /// dropped without being run.
    pub fn request_removal<F>(&mut self, on_complete: F)
    where
        F: FnOnce() + 'static,
    {
        self.begin_removal(Some(Box::new(on_complete)));
    }

    /// Capture the convoy's simulation state.
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            version: CHECKPOINT_VERSION,
            id: self.id,
            timestamp: Utc::now(),
            state: self.state(),
            position: self.data.position,
            cursor: self.data.cursor,
            cargo: self.data.cargo.clone(),
            service_point: self.data.service_point,
            removal: self.data.removal,
            trailing_units: self.data.trailing.len(),
            ticks: self.machine.ticks(),
            history: self.machine.history().clone(),
        }
    }

    fn begin_removal(&mut self, on_complete: Option<OnComplete>) {
        if self.disposed {
            debug!(convoy = %self.id, "removal requested on a disposed convoy");
            return;
        }
        if self.data.removal.is_pending() {
            if self.on_complete.is_none() && on_complete.is_some() {
                debug!(convoy = %self.id, "completion callback attached to pending removal");
                self.on_complete = on_complete;
            } else {
                debug!(convoy = %self.id, "removal already in progress");
            }
            return;
        }
        self.on_complete = on_complete;

        if self.data.cargo.is_empty() {
            self.dispose();
            return;
        }

        self.data.removal.begin();
        self.visuals.mark_for_removal();
        for unit in &mut self.data.trailing {
            unit.mark_for_removal();
        }
        info!(
            convoy = %self.id,
            cargo = self.data.cargo.len(),
            stops = self.data.service_stop_count(),
            "convoy winding down"
        );
    }

    fn dispose(&mut self) {
        self.disposed = true;
        if let Some(on_complete) = self.on_complete.take() {
            on_complete();
        }

        let released = self.data.trailing.len();
        for _unit in self.data.trailing.drain(..) {
            self.accounting.trailing_unit_released();
        }
        self.accounting.lead_unit_released();

        info!(convoy = %self.id, trailing = released, "convoy disposed");
    }
}
