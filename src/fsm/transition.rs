//! Guarded transitions between state tags.

use crate::core::{Guard, State};

/// A `(from, to, guard)` triple in a machine's transition table.
///
/// A transition with no guard fires as soon as the machine is in `from`.
pub struct Transition<S: State, C> {
    pub from: S,
    pub to: S,
    pub guard: Option<Guard<C>>,
}

impl<S: State, C> Transition<S, C> {
    /// Unguarded transition.
    pub fn new(from: S, to: S) -> Self {
        Self {
            from,
            to,
            guard: None,
        }
    }

    /// Transition that fires only while `guard` holds.
    pub fn guarded(from: S, to: S, guard: Guard<C>) -> Self {
        Self {
            from,
            to,
            guard: Some(guard),
        }
    }

    pub fn can_execute(&self, current: &S, context: &C) -> bool {
        if *current != self.from {
            return false;
        }

        self.guard.as_ref().is_none_or(|g| g.check(context))
    }
}

impl<S: State, C> Clone for Transition<S, C> {
    fn clone(&self) -> Self {
        Self {
            from: self.from.clone(),
            to: self.to.clone(),
            guard: self.guard.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
    enum TestState {
        Start,
        Middle,
        End,
    }

    impl State for TestState {
        fn name(&self) -> &str {
            match self {
                Self::Start => "Start",
                Self::Middle => "Middle",
                Self::End => "End",
            }
        }
    }

    #[test]
    fn can_execute_matches_from_state() {
        let transition: Transition<TestState, ()> =
            Transition::new(TestState::Start, TestState::Middle);

        assert!(transition.can_execute(&TestState::Start, &()));
        assert!(!transition.can_execute(&TestState::Middle, &()));
    }

    #[test]
    fn can_execute_respects_guard() {
        let transition = Transition::guarded(
            TestState::Middle,
            TestState::End,
            Guard::new(|remaining: &u32| *remaining == 0),
        );

        assert!(transition.can_execute(&TestState::Middle, &0));
        assert!(!transition.can_execute(&TestState::Middle, &4));
        assert!(!transition.can_execute(&TestState::Start, &0));
    }
}
