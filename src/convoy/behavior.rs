//! Travel / Unload / Load sequencing.
//!
//! The three states and their transition table live here. What each state
//! does per tick is supplied from outside through [`Phase`]; this module only
//! decides when to move between them.

use super::cargo::Cargo;
use super::collaborators::{RouteSnapshot, ServicePointView};
use super::removal::RemovalState;
use crate::builder::{guarded_transition, BuildError, StateMachineBuilder};
use crate::formation::TrailingUnit;
use crate::fsm::{StateBehavior, StateMachine};
use crate::path::{Path, ProgressCursor, Vec2};
use crate::state_enum;

state_enum! {
    /// What a convoy is doing.
    pub enum ConvoyState {
        /// Following the path toward the next service point.
        Travel,
        /// Dropping off cargo the occupied service point demands.
        Unload,
        /// Taking on cargo from the occupied service point's queue.
        Load,
    }
}

/// Everything the state machine's guards and phases see.
///
/// Phases may move the lead, change cargo and assign or clear the occupied
/// service point. The route, trailing units and removal bookkeeping belong to
/// the convoy and are read-only here.
pub struct ConvoyData {
    pub position: Vec2,
    pub cursor: ProgressCursor,
    pub cargo: Cargo,
    pub service_point: Option<ServicePointView>,
    pub(crate) route: RouteSnapshot,
    pub(crate) trailing: Vec<Box<dyn TrailingUnit>>,
    pub(crate) removal: RemovalState,
    pub(crate) cargo_per_unit: usize,
}

impl ConvoyData {
    pub(crate) fn new(route: RouteSnapshot, cargo_per_unit: usize) -> Self {
        Self {
            position: route.path.point(0).unwrap_or_default(),
            cursor: ProgressCursor::default(),
            cargo: Cargo::new(),
            service_point: None,
            route,
            trailing: Vec::new(),
            removal: RemovalState::default(),
            cargo_per_unit,
        }
    }

    pub fn path(&self) -> &Path {
        &self.route.path
    }

    pub fn route(&self) -> &RouteSnapshot {
        &self.route
    }

    pub fn service_stop_count(&self) -> usize {
        self.route.service_stops.len()
    }

    pub fn trailing_count(&self) -> usize {
        self.trailing.len()
    }

    pub fn removal(&self) -> &RemovalState {
        &self.removal
    }

    /// Cargo units the lead and its current trailing units can hold.
    pub fn capacity(&self) -> usize {
        self.cargo_per_unit * (self.trailing.len() + 1)
    }

    pub fn is_full(&self) -> bool {
        self.cargo.len() >= self.capacity()
    }

    /// Whether the occupied service point takes any of the cargo on board.
    pub fn can_unload_here(&self) -> bool {
        self.service_point
            .is_some_and(|point| self.cargo.contains(point.demanded_type))
    }

    /// Swap in this tick's route and refresh the occupied service point from
    /// it. A service point that is no longer on the route keeps its last view.
    pub(crate) fn refresh_route(&mut self, route: RouteSnapshot) {
        if let Some(occupied) = self.service_point {
            if let Some(fresh) = route.stop(occupied.id) {
                self.service_point = Some(*fresh);
            }
        }
        self.route = route;
    }
}

/// Travel → Unload: a service point is occupied.
pub fn arrived(data: &ConvoyData) -> bool {
    data.service_point.is_some()
}

/// Unload → Load: nothing left that the service point wants.
pub fn unloaded(data: &ConvoyData) -> bool {
    match data.service_point {
        Some(point) => !data.cargo.contains(point.demanded_type),
        None => true,
    }
}

/// Load → Travel: queue drained, hold full, or winding down.
pub fn loaded(data: &ConvoyData) -> bool {
    let queue_empty = data.service_point.is_none_or(|point| point.queue_length == 0);
    queue_empty || data.is_full() || data.removal.is_pending()
}

/// The convoy's machine. It has no terminal state; a fresh convoy starts in
/// [`ConvoyState::Travel`].
pub fn convoy_machine(
    initial: ConvoyState,
) -> Result<StateMachine<ConvoyState, ConvoyData>, BuildError> {
    StateMachineBuilder::new()
        .initial(initial)
        .add_transition(guarded_transition(
            ConvoyState::Travel,
            ConvoyState::Unload,
            arrived,
        ))
        .add_transition(guarded_transition(
            ConvoyState::Unload,
            ConvoyState::Load,
            unloaded,
        ))
        .add_transition(guarded_transition(
            ConvoyState::Load,
            ConvoyState::Travel,
            loaded,
        ))
        .build()
}

/// Per-tick behavior of one convoy state.
pub trait Phase {
    fn enter(&mut self, _data: &mut ConvoyData) {}

    fn tick(&mut self, data: &mut ConvoyData, delta_time: f32);

    fn exit(&mut self, _data: &mut ConvoyData) {}
}

/// A phase that does nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct Idle;

impl Phase for Idle {
    fn tick(&mut self, _data: &mut ConvoyData, _delta_time: f32) {}
}

/// The three phases, dispatched by state.
pub struct Phases {
    pub travel: Box<dyn Phase>,
    pub unload: Box<dyn Phase>,
    pub load: Box<dyn Phase>,
}

impl Default for Phases {
    fn default() -> Self {
        Self {
            travel: Box::new(Idle),
            unload: Box::new(Idle),
            load: Box::new(Idle),
        }
    }
}

impl Phases {
    pub fn new(
        travel: impl Phase + 'static,
        unload: impl Phase + 'static,
        load: impl Phase + 'static,
    ) -> Self {
        Self {
            travel: Box::new(travel),
            unload: Box::new(unload),
            load: Box::new(load),
        }
    }

    fn phase(&mut self, state: &ConvoyState) -> &mut dyn Phase {
        match state {
            ConvoyState::Travel => self.travel.as_mut(),
            ConvoyState::Unload => self.unload.as_mut(),
            ConvoyState::Load => self.load.as_mut(),
        }
    }
}

impl StateBehavior<ConvoyState, ConvoyData> for Phases {
    fn enter(&mut self, state: &ConvoyState, data: &mut ConvoyData) {
        self.phase(state).enter(data);
    }

    fn tick(&mut self, state: &ConvoyState, data: &mut ConvoyData, delta_time: f32) {
        self.phase(state).tick(data, delta_time);
    }

    fn exit(&mut self, state: &ConvoyState, data: &mut ConvoyData) {
        self.phase(state).exit(data);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convoy::cargo::{CargoType, CargoUnit};
    use crate::convoy::collaborators::ServicePointId;
    use crate::core::State;
    use crate::fsm::StepResult;

    const COAL: CargoType = CargoType(0);
    const GRAIN: CargoType = CargoType(1);

    struct Wagon;

    impl TrailingUnit for Wagon {
        fn move_to(&mut self, _target: Vec2) {}
    }

    fn data() -> ConvoyData {
        ConvoyData::new(RouteSnapshot::default(), 6)
    }

    fn stop(demanded_type: CargoType, queue_length: usize) -> ServicePointView {
        ServicePointView {
            id: ServicePointId(1),
            demanded_type,
            queue_length,
        }
    }

    fn holding(data: &mut ConvoyData, kind: CargoType, count: usize) {
        data.cargo.extend(std::iter::repeat(CargoUnit::new(kind)).take(count));
    }

    #[test]
    fn state_names_match_variants() {
        assert_eq!(ConvoyState::Travel.name(), "Travel");
        assert_eq!(ConvoyState::Unload.name(), "Unload");
        assert_eq!(ConvoyState::Load.name(), "Load");
        assert!(!ConvoyState::Load.is_final());
    }

    #[test]
    fn arrived_needs_a_service_point() {
        let mut data = data();
        assert!(!arrived(&data));

        data.service_point = Some(stop(COAL, 2));
        assert!(arrived(&data));
    }

    #[test]
    fn unloaded_when_no_demanded_cargo_remains() {
        let mut data = data();
        data.service_point = Some(stop(COAL, 2));
        holding(&mut data, GRAIN, 3);
        assert!(unloaded(&data));

        holding(&mut data, COAL, 1);
        assert!(!unloaded(&data));
    }

    #[test]
    fn loaded_when_queue_is_empty() {
        let mut data = data();
        data.service_point = Some(stop(COAL, 0));
        assert!(loaded(&data));
    }

    #[test]
    fn loaded_when_capacity_reached() {
        let mut data = data();
        data.service_point = Some(stop(COAL, 10));
        data.trailing.push(Box::new(Wagon));
        assert_eq!(data.capacity(), 12);

        holding(&mut data, GRAIN, 11);
        assert!(!loaded(&data));

        holding(&mut data, GRAIN, 1);
        assert!(loaded(&data));
    }

    #[test]
    fn loaded_when_removal_pending() {
        let mut data = data();
        data.service_point = Some(stop(COAL, 10));
        holding(&mut data, GRAIN, 1);
        assert!(!loaded(&data));

        data.removal.begin();
        assert!(loaded(&data));
    }

    #[test]
    fn refresh_route_updates_occupied_service_point() {
        let mut data = data();
        data.service_point = Some(stop(COAL, 5));

        data.refresh_route(RouteSnapshot::new(Path::default(), vec![stop(COAL, 2)]));
        assert_eq!(data.service_point.map(|p| p.queue_length), Some(2));

        data.refresh_route(RouteSnapshot::default());
        assert_eq!(data.service_point.map(|p| p.queue_length), Some(2));
    }

    #[test]
    fn machine_cycles_through_all_states() {
        let mut machine = convoy_machine(ConvoyState::Travel).unwrap();
        let mut data = data();
        let mut phases = Phases::default();

        assert_eq!(
            machine.tick(&mut data, &mut phases, 0.1),
            StepResult::Ticked(ConvoyState::Travel)
        );

        data.service_point = Some(stop(COAL, 0));
        machine.tick(&mut data, &mut phases, 0.1);
        assert_eq!(machine.current_state(), &ConvoyState::Unload);

        machine.tick(&mut data, &mut phases, 0.1);
        assert_eq!(machine.current_state(), &ConvoyState::Load);

        machine.tick(&mut data, &mut phases, 0.1);
        assert_eq!(machine.current_state(), &ConvoyState::Travel);
    }
}
