//! Guard predicates for controlling state transitions.
//!
//! Guards are pure boolean functions over the machine's context. They decide
//! whether a transition fires on the current tick and must not mutate
//! anything.

use std::fmt;
use std::sync::Arc;

/// Pure predicate that determines if a transition can execute.
///
/// A guard sees the owning context (for a convoy, its cargo, progress and
/// removal data) rather than the state tag, since the tag alone is already
/// matched by the transition's `from` field.
///
/// # Example
///
/// ```rust
/// use convoy::core::Guard;
///
/// struct Tank {
///     level: u32,
/// }
///
/// let full = Guard::new(|tank: &Tank| tank.level >= 10);
///
/// assert!(full.check(&Tank { level: 12 }));
/// assert!(!full.check(&Tank { level: 3 }));
/// ```
pub struct Guard<C> {
    predicate: Arc<dyn Fn(&C) -> bool + Send + Sync>,
}

impl<C> Guard<C> {
    /// Create a guard from a pure predicate function.
    ///
    /// The predicate must be deterministic and free of side effects; the
    /// machine may evaluate it any number of times per tick.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&C) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Arc::new(predicate),
        }
    }

    /// Guard that always passes.
    pub fn always() -> Self {
        Self::new(|_| true)
    }

    /// Check if the guard allows a transition given this context.
    pub fn check(&self, context: &C) -> bool {
        (self.predicate)(context)
    }
}

impl<C> Clone for Guard<C> {
    fn clone(&self) -> Self {
        Self {
            predicate: Arc::clone(&self.predicate),
        }
    }
}

impl<C> fmt::Debug for Guard<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Guard").finish_non_exhaustive()
    }
}
