//! Errors reported while assembling a transition table.

use std::fmt;
use thiserror::Error;

/// One end of a transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endpoint {
    From,
    To,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::From => f.write_str("from"),
            Self::To => f.write_str("to"),
        }
    }
}

/// Reasons a machine or transition builder refuses to build.
#[derive(Debug, Error, PartialEq)]
pub enum BuildError {
    /// `.initial(state)` was never called
    #[error("State machine has no initial state. Call .initial(state) before .build()")]
    NoInitialState,

    /// The machine could never leave its initial state
    #[error("State machine has an empty transition table")]
    EmptyTable,

    /// A transition was finished without one of its states
    #[error("Transition has no '{0}' state. Call .{0}(state)")]
    MissingEndpoint(Endpoint),

    /// The second copy of an unguarded pair could never fire
    #[error("Unguarded transition '{from}' -> '{to}' is registered more than once")]
    DuplicateUnguarded { from: String, to: String },
}
