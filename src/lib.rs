//! Convoy: guarded state machines driving lead-and-trailer transport units
//!
//! A convoy is a lead unit that travels along a path between service points,
//! towing trailing units that follow behind it at fixed arc-length spacing.
//! At each service point it unloads cargo the point demands and loads what
//! the point has queued, until the hold is full or the queue runs dry.
//!
//! The crate is split into a generic core and the convoy built on top of it:
//!
//! - **State machine** ([`core`], [`fsm`], [`builder`]): states, guards,
//!   bounded history and a machine that fires at most one guarded transition
//!   per tick, in registration order
//! - **Paths** ([`path`], [`formation`]): walking a fixed distance along an
//!   open or cyclic polyline and spacing trailing units behind the lead
//! - **Convoy** ([`convoy`]): Travel / Unload / Load sequencing, cargo and
//!   the wind-down protocol for retiring a loaded convoy
//! - **Persistence** ([`checkpoint`], [`config`]): resumable snapshots and
//!   validated tunables
//!
//! # Example
//!
//! ```rust
//! use convoy::{state_enum, StateMachineBuilder, StepResult};
//! use convoy::builder::guarded_transition;
//!
//! state_enum! {
//!     enum Gate {
//!         Closed,
//!         Open,
//!     }
//! }
//!
//! struct Sensor {
//!     waiting: usize,
//! }
//!
//! let mut machine = StateMachineBuilder::new()
//!     .initial(Gate::Closed)
//!     .add_transition(guarded_transition(Gate::Closed, Gate::Open, |s: &Sensor| s.waiting > 0))
//!     .add_transition(guarded_transition(Gate::Open, Gate::Closed, |s: &Sensor| s.waiting == 0))
//!     .build()
//!     .unwrap();
//!
//! let mut sensor = Sensor { waiting: 0 };
//! assert_eq!(machine.tick(&mut sensor, &mut (), 0.1), StepResult::Ticked(Gate::Closed));
//!
//! sensor.waiting = 2;
//! machine.tick(&mut sensor, &mut (), 0.1);
//! assert_eq!(machine.current_state(), &Gate::Open);
//! assert_eq!(machine.history().transitions().len(), 1);
//! ```

pub mod builder;
pub mod checkpoint;
pub mod config;
pub mod convoy;
pub mod core;
pub mod formation;
pub mod fsm;
pub mod layout;
pub mod path;

// Re-export commonly used types
pub use builder::{BuildError, StateMachineBuilder, TransitionBuilder};
pub use checkpoint::{Checkpoint, CheckpointError};
pub use config::{ConfigError, ConvoyConfig};
pub use convoy::{
    Convoy, ConvoyBuilder, ConvoyError, ConvoyId, ConvoyState, ConvoyStatus, FleetAccounting,
    PathSource, Phase, Phases,
};
pub use crate::core::{Guard, State, StateHistory, StateTransition};
pub use formation::{TrailFormation, TrailingUnit};
pub use fsm::{StateBehavior, StateMachine, StepResult, Transition};
pub use path::{Direction, Path, PathWalker, ProgressCursor, Vec2};
