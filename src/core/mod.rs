//! Core state machine types and logic.
//!
//! This module contains the pure pieces of the state machine:
//! - State tags via the `State` trait
//! - Guard predicates over the machine's context
//! - Immutable history tracking
//!
//! Nothing in here mutates a context; that happens in [`crate::fsm`].

mod guard;
mod history;
mod state;

pub use guard::Guard;
pub use history::{StateHistory, StateTransition};
pub use state::State;
