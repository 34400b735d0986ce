//! Builder for constructing state machines.

use crate::builder::error::BuildError;
use crate::builder::transition::TransitionBuilder;
use crate::core::{State, StateHistory};
use crate::fsm::{StateMachine, Transition};

/// Builder for constructing state machines with a fluent API.
///
/// Transitions keep the order in which they are added; that order is the
/// machine's evaluation order.
pub struct StateMachineBuilder<S: State, C> {
    initial: Option<S>,
    transitions: Vec<Transition<S, C>>,
    history_limit: Option<usize>,
}

impl<S: State, C> StateMachineBuilder<S, C> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            initial: None,
            transitions: Vec::new(),
            history_limit: None,
        }
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: S) -> Self {
        self.initial = Some(state);
        self
    }

    /// Retain at most `limit` transitions in the machine's history.
    pub fn history_limit(mut self, limit: usize) -> Self {
        self.history_limit = Some(limit);
        self
    }

    /// Add a transition using a builder.
    /// Returns an error if the builder fails validation.
    pub fn transition(mut self, builder: TransitionBuilder<S, C>) -> Result<Self, BuildError> {
        let transition = builder.build()?;
        self.transitions.push(transition);
        Ok(self)
    }

    /// Add a pre-built transition.
    pub fn add_transition(mut self, transition: Transition<S, C>) -> Self {
        self.transitions.push(transition);
        self
    }

    /// Add multiple transitions at once.
    pub fn transitions(mut self, transitions: Vec<Transition<S, C>>) -> Self {
        self.transitions.extend(transitions);
        self
    }

    /// Build the state machine.
    ///
    /// Fails if the initial state is missing, no transitions were added, or
    /// the same unguarded `(from, to)` pair appears twice.
    pub fn build(self) -> Result<StateMachine<S, C>, BuildError> {
        let initial = self.initial.ok_or(BuildError::NoInitialState)?;

        if self.transitions.is_empty() {
            return Err(BuildError::EmptyTable);
        }

        for (i, a) in self.transitions.iter().enumerate() {
            let duplicate = self.transitions[..i].iter().any(|b| {
                a.guard.is_none() && b.guard.is_none() && a.from == b.from && a.to == b.to
            });
            if duplicate {
                return Err(BuildError::DuplicateUnguarded {
                    from: a.from.name().to_string(),
                    to: a.to.name().to_string(),
                });
            }
        }

        let mut machine = StateMachine::new(initial);
        if let Some(limit) = self.history_limit {
            machine = machine.with_history(StateHistory::with_limit(limit), 0);
        }
        for transition in self.transitions {
            machine.add_transition(transition);
        }

        Ok(machine)
    }
}

impl<S: State, C> Default for StateMachineBuilder<S, C> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{guarded_transition, simple_transition, Endpoint};
    use serde::{Deserialize, Serialize};

    #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
    enum TestState {
        Docked,
        Underway,
    }

    impl State for TestState {
        fn name(&self) -> &str {
            match self {
                Self::Docked => "Docked",
                Self::Underway => "Underway",
            }
        }
    }

    #[test]
    fn builder_validates_required_fields() {
        let result = StateMachineBuilder::<TestState, ()>::new().build();

        assert!(matches!(result, Err(BuildError::NoInitialState)));
    }

    #[test]
    fn builder_requires_transitions() {
        let result = StateMachineBuilder::<TestState, ()>::new()
            .initial(TestState::Docked)
            .build();

        assert!(matches!(result, Err(BuildError::EmptyTable)));
    }

    #[test]
    fn fluent_api_builds_machine() {
        let machine = StateMachineBuilder::new()
            .initial(TestState::Docked)
            .add_transition(guarded_transition(
                TestState::Docked,
                TestState::Underway,
                |tide: &u8| *tide > 3,
            ))
            .add_transition(simple_transition(TestState::Underway, TestState::Docked))
            .build()
            .unwrap();

        assert_eq!(machine.current_state(), &TestState::Docked);
        assert_eq!(machine.transitions().len(), 2);
    }

    #[test]
    fn duplicate_unguarded_transition_is_rejected() {
        let result = StateMachineBuilder::<TestState, ()>::new()
            .initial(TestState::Docked)
            .transitions(vec![
                simple_transition(TestState::Docked, TestState::Underway),
                simple_transition(TestState::Docked, TestState::Underway),
            ])
            .build();

        assert!(matches!(
            result,
            Err(BuildError::DuplicateUnguarded { .. })
        ));
    }

    #[test]
    fn transition_builder_errors_propagate() {
        let result = StateMachineBuilder::<TestState, ()>::new()
            .initial(TestState::Docked)
            .transition(TransitionBuilder::new().from(TestState::Docked));

        assert!(matches!(result, Err(BuildError::MissingEndpoint(Endpoint::To))));
    }
}
