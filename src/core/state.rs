//! Core State trait for state machine states.
//!
//! States are plain tags. Everything a state needs to read or mutate lives in
//! the context the machine is ticked with, never inside the state value.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait for state machine states.
///
/// All methods are pure. A state is a small, copyable tag that identifies
/// where the machine currently is; the transition table is keyed on it.
///
/// # Required Traits
///
/// - `Clone`: States are recorded in the transition history
/// - `PartialEq`: Transitions match on the `from` state
/// - `Debug`: States show up in logs and diagnostics
/// - `Serialize` + `Deserialize`: States are written into checkpoints
///
/// # Example
///
/// ```rust
/// use convoy::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// enum Signal {
///     Clear,
///     Caution,
///     Stop,
/// }
///
/// impl State for Signal {
///     fn name(&self) -> &str {
///         match self {
///             Self::Clear => "Clear",
///             Self::Caution => "Caution",
///             Self::Stop => "Stop",
///         }
///     }
/// }
///
/// assert_eq!(Signal::Caution.name(), "Caution");
/// assert!(!Signal::Stop.is_final());
/// ```
pub trait State:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Get the state's name for display/logging.
    fn name(&self) -> &str;

    /// Check if this is a final (terminal) state.
    ///
    /// A machine sitting in a final state still ticks; the flag is purely
    /// informational. Default implementation returns `false`.
    fn is_final(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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

        fn is_final(&self) -> bool {
            matches!(self, Self::Parked)
        }
    }

    #[test]
    fn state_name_returns_correct_value() {
        assert_eq!(TestState::Idle.name(), "Idle");
        assert_eq!(TestState::Moving.name(), "Moving");
        assert_eq!(TestState::Parked.name(), "Parked");
    }

    #[test]
    fn is_final_identifies_terminal_states() {
        assert!(!TestState::Idle.is_final());
        assert!(!TestState::Moving.is_final());
        assert!(TestState::Parked.is_final());
    }

    #[test]
    fn state_serializes_correctly() {
        let state = TestState::Moving;
        let json = serde_json::to_string(&state).unwrap();
        let deserialized: TestState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, deserialized);
    }
}
