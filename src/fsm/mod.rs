//! Tick-driven execution of guarded state machines.
//!
//! This module is the imperative half of the machine: it owns the current
//! state, walks the transition table once per tick and drives the per-state
//! Enter/Tick/Exit hooks against a mutable context.
//!
//! # Example
//!
//! ```rust
//! use convoy::core::Guard;
//! use convoy::fsm::{StateMachine, StepResult, Transition};
//! use convoy::state_enum;
//!
//! state_enum! {
//!     enum Door {
//!         Closed,
//!         Open,
//!     }
//! }
//!
//! struct Sensor {
//!     someone_waiting: bool,
//! }
//!
//! let mut machine = StateMachine::new(Door::Closed);
//! machine.add_transition(Transition::guarded(
//!     Door::Closed,
//!     Door::Open,
//!     Guard::new(|s: &Sensor| s.someone_waiting),
//! ));
//!
//! let mut sensor = Sensor { someone_waiting: false };
//! assert_eq!(machine.tick(&mut sensor, &mut (), 0.1), StepResult::Ticked(Door::Closed));
//!
//! sensor.someone_waiting = true;
//! machine.tick(&mut sensor, &mut (), 0.1);
//! assert_eq!(machine.current_state(), &Door::Open);
//! ```

mod behavior;
mod machine;
mod transition;

pub use behavior::StateBehavior;
pub use machine::{StateMachine, StepResult, DEFAULT_HISTORY_LIMIT};
pub use transition::Transition;
