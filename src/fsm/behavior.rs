//! Per-state hooks driven by the machine.

use crate::core::State;

/// Enter/Tick/Exit hooks for the states of a machine.
///
/// `enter` and `exit` run on transition boundaries; `tick` runs on every
/// machine tick in which no transition fired. All three may mutate the
/// context.
pub trait StateBehavior<S: State, C> {
    fn enter(&mut self, _state: &S, _context: &mut C) {}

    fn tick(&mut self, state: &S, context: &mut C, delta_time: f32);

    fn exit(&mut self, _state: &S, _context: &mut C) {}
}

/// States with no behavior of their own.
impl<S: State, C> StateBehavior<S, C> for () {
    fn tick(&mut self, _state: &S, _context: &mut C, _delta_time: f32) {}
}
