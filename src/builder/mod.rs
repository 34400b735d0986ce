//! Builder API for ergonomic state machine construction.
//!
//! This module provides fluent builders and a macro for creating state
//! machines with minimal boilerplate while keeping the transition table
//! explicit and ordered.

pub mod error;
pub mod machine;
pub mod macros;
pub mod transition;

pub use error::{BuildError, Endpoint};
pub use machine::StateMachineBuilder;
pub use transition::TransitionBuilder;

use crate::core::{Guard, State};
use crate::fsm::Transition;

/// Transition that fires whenever the machine is in `from`.
pub fn simple_transition<S: State, C>(from: S, to: S) -> Transition<S, C> {
    Transition::new(from, to)
}

/// Transition that fires when the machine is in `from` and `guard` holds.
pub fn guarded_transition<S, C, F>(from: S, to: S, guard: F) -> Transition<S, C>
where
    S: State,
    F: Fn(&C) -> bool + Send + Sync + 'static,
{
    Transition::guarded(from, to, Guard::new(guard))
}
