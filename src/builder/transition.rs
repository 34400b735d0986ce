//! Builder for constructing state transitions.

use crate::builder::error::{BuildError, Endpoint};
use crate::core::{Guard, State};
use crate::fsm::Transition;

/// Fluent construction of a single [`Transition`].
pub struct TransitionBuilder<S: State, C> {
    from: Option<S>,
    to: Option<S>,
    guard: Option<Guard<C>>,
}

impl<S: State, C> TransitionBuilder<S, C> {
    /// Start an empty builder.
    pub fn new() -> Self {
        Self {
            from: None,
            to: None,
            guard: None,
        }
    }

    /// Set the state the transition leaves (required).
    pub fn from(mut self, state: S) -> Self {
        self.from = Some(state);
        self
    }

    /// Set the state the transition enters (required).
    pub fn to(mut self, state: S) -> Self {
        self.to = Some(state);
        self
    }

    /// Gate the transition on a context predicate (optional).
    pub fn guard(mut self, guard: Guard<C>) -> Self {
        self.guard = Some(guard);
        self
    }

    /// Gate the transition on a closure over the context (optional).
    pub fn when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&C) -> bool + Send + Sync + 'static,
    {
        self.guard = Some(Guard::new(predicate));
        self
    }

    /// Finish the transition.
    ///
    /// Fails with [`BuildError::MissingEndpoint`] if either state is unset.
    pub fn build(self) -> Result<Transition<S, C>, BuildError> {
        let from = self.from.ok_or(BuildError::MissingEndpoint(Endpoint::From))?;
        let to = self.to.ok_or(BuildError::MissingEndpoint(Endpoint::To))?;

        Ok(Transition {
            from,
            to,
            guard: self.guard,
        })
    }
}

impl<S: State, C> Default for TransitionBuilder<S, C> {
    fn default() -> Self {
        Self::new()
    }
}
