//! State transition history tracking.
//!
//! Provides immutable tracking of state machine transitions, stamped with the
//! tick on which each one fired.

use super::state::State;
use serde::{Deserialize, Serialize};

/// Record of a single state transition.
///
/// # Example
///
/// ```rust
/// use convoy::core::StateTransition;
/// use convoy::ConvoyState;
///
/// let transition = StateTransition {
///     from: ConvoyState::Travel,
///     to: ConvoyState::Unload,
///     tick: 42,
/// };
/// assert_eq!(transition.tick, 42);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateTransition<S: State> {
    /// The state being transitioned from
    pub from: S,
    /// The state being transitioned to
    pub to: S,
    /// Machine tick on which the transition fired
    pub tick: u64,
}

/// Ordered history of state transitions.
///
/// History is immutable - `record` returns a new history with the transition
/// appended. A history built with [`StateHistory::with_limit`] keeps only the
/// most recent transitions, so a machine that runs indefinitely does not grow
/// without bound.
///
/// # Example
///
/// ```rust
/// use convoy::core::{StateHistory, StateTransition};
/// use convoy::ConvoyState;
///
/// let history = StateHistory::new()
///     .record(StateTransition {
///         from: ConvoyState::Travel,
///         to: ConvoyState::Unload,
///         tick: 3,
///     })
///     .record(StateTransition {
///         from: ConvoyState::Unload,
///         to: ConvoyState::Load,
///         tick: 9,
///     });
///
/// let path = history.get_path();
/// assert_eq!(path.len(), 3); // Travel -> Unload -> Load
/// assert_eq!(history.span_ticks(), Some(6));
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateHistory<S: State> {
    transitions: Vec<StateTransition<S>>,
    limit: Option<usize>,
}

impl<S: State> Default for StateHistory<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> StateHistory<S> {
    /// Create a new, unbounded, empty history.
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
            limit: None,
        }
    }

    /// Create an empty history that retains at most `limit` transitions.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            transitions: Vec::new(),
            limit: Some(limit),
        }
    }

    /// Record a transition, returning a new history.
    ///
    /// The original history is left unchanged.
    pub fn record(&self, transition: StateTransition<S>) -> Self {
        let mut transitions = self.transitions.clone();
        transitions.push(transition);
        if let Some(limit) = self.limit {
            let excess = transitions.len().saturating_sub(limit);
            transitions.drain(..excess);
        }
        Self {
            transitions,
            limit: self.limit,
        }
    }

    /// Get the sequence of states visited.
    ///
    /// Returns the `from` state of the first retained transition followed by
    /// every `to` state. Empty if nothing was recorded.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::new();
        if let Some(first) = self.transitions.first() {
            path.push(&first.from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    /// Ticks elapsed between the first and last retained transition.
    pub fn span_ticks(&self) -> Option<u64> {
        match (self.transitions.first(), self.transitions.last()) {
            (Some(first), Some(last)) => Some(last.tick.saturating_sub(first.tick)),
            _ => None,
        }
    }

    /// Most recent transition, if any.
    pub fn last(&self) -> Option<&StateTransition<S>> {
        self.transitions.last()
    }

    /// Get all retained transitions.
    pub fn transitions(&self) -> &[StateTransition<S>] {
        &self.transitions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
    enum TestState {
        Idle,
        Moving,
        Parked,
    }

    impl State for TestState {
        fn name(&self) -> &str {
            match self {
                Self::Idle => "Idle",
                Self::Moving => "Moving",
                Self::Parked => "Parked",
            }
        }
    }

    fn step(from: TestState, to: TestState, tick: u64) -> StateTransition<TestState> {
        StateTransition { from, to, tick }
    }

    #[test]
    fn new_history_is_empty() {
        let history: StateHistory<TestState> = StateHistory::new();
        assert_eq!(history.transitions().len(), 0);
        assert!(history.get_path().is_empty());
        assert!(history.span_ticks().is_none());
        assert!(history.last().is_none());
    }

    #[test]
    fn record_is_immutable() {
        let history = StateHistory::new();
        let new_history = history.record(step(TestState::Idle, TestState::Moving, 1));

        assert_eq!(history.transitions().len(), 0);
        assert_eq!(new_history.transitions().len(), 1);
    }

    #[test]
    fn get_path_returns_state_sequence() {
        let history = StateHistory::new()
            .record(step(TestState::Idle, TestState::Moving, 1))
            .record(step(TestState::Moving, TestState::Parked, 5));

        let path = history.get_path();
        assert_eq!(path.len(), 3);
        assert_eq!(path[0], &TestState::Idle);
        assert_eq!(path[1], &TestState::Moving);
        assert_eq!(path[2], &TestState::Parked);
    }

    #[test]
    fn span_counts_ticks_between_ends() {
        let history = StateHistory::new()
            .record(step(TestState::Idle, TestState::Moving, 4))
            .record(step(TestState::Moving, TestState::Parked, 11));

        assert_eq!(history.span_ticks(), Some(7));
    }

    #[test]
    fn single_transition_has_zero_span() {
        let history = StateHistory::new().record(step(TestState::Idle, TestState::Moving, 8));
        assert_eq!(history.span_ticks(), Some(0));
    }

    #[test]
    fn limit_drops_oldest_transitions() {
        let mut history = StateHistory::with_limit(2);
        history = history.record(step(TestState::Idle, TestState::Moving, 1));
        history = history.record(step(TestState::Moving, TestState::Idle, 2));
        history = history.record(step(TestState::Idle, TestState::Parked, 3));

        assert_eq!(history.transitions().len(), 2);
        assert_eq!(history.transitions()[0].tick, 2);
        assert_eq!(history.last().map(|t| t.tick), Some(3));
    }

    #[test]
    fn history_serializes_correctly() {
        let history = StateHistory::new().record(step(TestState::Idle, TestState::Moving, 1));

        let json = serde_json::to_string(&history).unwrap();
        let deserialized: StateHistory<TestState> = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized.transitions(), history.transitions());
    }
}
