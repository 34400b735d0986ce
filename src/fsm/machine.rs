//! Tick-driven guarded state machine.

use crate::core::{State, StateHistory, StateTransition};
use crate::fsm::behavior::StateBehavior;
use crate::fsm::transition::Transition;
use tracing::debug;

/// Transitions retained by a machine's history unless overridden.
pub const DEFAULT_HISTORY_LIMIT: usize = 64;

/// Outcome of a single machine tick.
#[derive(Clone, Debug, PartialEq)]
pub enum StepResult<S: State> {
    /// A guard matched; the machine exited `from` and entered `to`.
    Transitioned { from: S, to: S },

    /// No guard matched; the current state's tick behavior ran.
    Ticked(S),
}

/// Guarded state machine over state tags `S` and a context `C`.
///
/// Each tick walks the transition table in registration order. The first
/// transition whose `from` equals the current state and whose guard passes
/// fires, and evaluation stops there. If none fires, the current state's
/// tick behavior runs instead. At most one transition fires per tick.
pub struct StateMachine<S: State, C> {
    current: S,
    transitions: Vec<Transition<S, C>>,
    history: StateHistory<S>,
    ticks: u64,
    started: bool,
}

impl<S: State, C> StateMachine<S, C> {
    pub fn new(initial: S) -> Self {
        Self {
            current: initial,
            transitions: Vec::new(),
            history: StateHistory::with_limit(DEFAULT_HISTORY_LIMIT),
            ticks: 0,
            started: false,
        }
    }

    /// Replace the machine's history and tick counter, e.g. when resuming
    /// from a checkpoint.
    pub fn with_history(mut self, history: StateHistory<S>, ticks: u64) -> Self {
        self.history = history;
        self.ticks = ticks;
        self
    }

    pub fn add_transition(&mut self, transition: Transition<S, C>) {
        self.transitions.push(transition);
    }

    pub fn current_state(&self) -> &S {
        &self.current
    }

    pub fn is_final(&self) -> bool {
        self.current.is_final()
    }

    pub fn history(&self) -> &StateHistory<S> {
        &self.history
    }

    pub fn transitions(&self) -> &[Transition<S, C>] {
        &self.transitions
    }

    /// Number of ticks processed so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Enter the initial state. Runs once; later calls do nothing.
    pub fn start<B>(&mut self, context: &mut C, behavior: &mut B)
    where
        B: StateBehavior<S, C> + ?Sized,
    {
        if self.started {
            return;
        }
        self.started = true;
        behavior.enter(&self.current, context);
    }

    /// Evaluate transitions once, then either transition or tick.
    pub fn tick<B>(&mut self, context: &mut C, behavior: &mut B, delta_time: f32) -> StepResult<S>
    where
        B: StateBehavior<S, C> + ?Sized,
    {
        self.start(context, behavior);
        self.ticks += 1;

        let view: &C = context;
        let next = self
            .transitions
            .iter()
            .find(|t| t.can_execute(&self.current, view))
            .map(|t| t.to.clone());

        let Some(to) = next else {
            behavior.tick(&self.current, context, delta_time);
            return StepResult::Ticked(self.current.clone());
        };

        let from = self.current.clone();
        behavior.exit(&from, context);

        debug!(
            from = from.name(),
            to = to.name(),
            tick = self.ticks,
            "state transition"
        );
        self.history = self.history.record(StateTransition {
            from: from.clone(),
            to: to.clone(),
            tick: self.ticks,
        });
        self.current = to.clone();

        behavior.enter(&self.current, context);
        StepResult::Transitioned { from, to }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Guard;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
    enum Light {
        Red,
        Green,
        Yellow,
    }

    impl State for Light {
        fn name(&self) -> &str {
            match self {
                Self::Red => "Red",
                Self::Green => "Green",
                Self::Yellow => "Yellow",
            }
        }
    }

    #[derive(Default)]
    struct Junction {
        waiting: u32,
        elapsed: f32,
    }

    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
    }

    impl StateBehavior<Light, Junction> for Recorder {
        fn enter(&mut self, state: &Light, _context: &mut Junction) {
            self.calls.push(format!("enter {}", state.name()));
        }

        fn tick(&mut self, state: &Light, context: &mut Junction, delta_time: f32) {
            context.elapsed += delta_time;
            self.calls.push(format!("tick {}", state.name()));
        }

        fn exit(&mut self, state: &Light, _context: &mut Junction) {
            self.calls.push(format!("exit {}", state.name()));
        }
    }

    fn junction_machine() -> StateMachine<Light, Junction> {
        let mut machine = StateMachine::new(Light::Red);
        machine.add_transition(Transition::guarded(
            Light::Red,
            Light::Green,
            Guard::new(|j: &Junction| j.waiting > 2),
        ));
        machine.add_transition(Transition::new(Light::Green, Light::Yellow));
        machine.add_transition(Transition::new(Light::Yellow, Light::Red));
        machine
    }

    #[test]
    fn unmatched_guard_runs_tick_behavior() {
        let mut machine = junction_machine();
        let mut junction = Junction::default();
        let mut recorder = Recorder::default();

        let result = machine.tick(&mut junction, &mut recorder, 0.5);

        assert_eq!(result, StepResult::Ticked(Light::Red));
        assert_eq!(recorder.calls, vec!["enter Red", "tick Red"]);
        assert_eq!(junction.elapsed, 0.5);
    }

    #[test]
    fn transition_exits_then_enters_without_ticking() {
        let mut machine = junction_machine();
        let mut junction = Junction {
            waiting: 3,
            elapsed: 0.0,
        };
        let mut recorder = Recorder::default();

        let result = machine.tick(&mut junction, &mut recorder, 1.0);

        assert_eq!(
            result,
            StepResult::Transitioned {
                from: Light::Red,
                to: Light::Green
            }
        );
        assert_eq!(recorder.calls, vec!["enter Red", "exit Red", "enter Green"]);
        assert_eq!(junction.elapsed, 0.0);
    }

    #[test]
    fn at_most_one_transition_per_tick() {
        let mut machine = junction_machine();
        let mut junction = Junction {
            waiting: 3,
            elapsed: 0.0,
        };

        machine.tick(&mut junction, &mut (), 0.1);
        assert_eq!(machine.current_state(), &Light::Green);

        // Green -> Yellow is unguarded but must wait for the next tick.
        machine.tick(&mut junction, &mut (), 0.1);
        assert_eq!(machine.current_state(), &Light::Yellow);
        assert_eq!(machine.ticks(), 2);
    }

    #[test]
    fn first_registered_transition_wins() {
        let mut machine: StateMachine<Light, Junction> = StateMachine::new(Light::Red);
        machine.add_transition(Transition::new(Light::Red, Light::Yellow));
        machine.add_transition(Transition::new(Light::Red, Light::Green));

        machine.tick(&mut Junction::default(), &mut (), 0.1);

        assert_eq!(machine.current_state(), &Light::Yellow);
    }

    #[test]
    fn start_enters_initial_state_once() {
        let mut machine = junction_machine();
        let mut junction = Junction::default();
        let mut recorder = Recorder::default();

        machine.start(&mut junction, &mut recorder);
        machine.start(&mut junction, &mut recorder);
        machine.tick(&mut junction, &mut recorder, 0.1);

        assert_eq!(recorder.calls, vec!["enter Red", "tick Red"]);
    }

    #[test]
    fn history_records_tick_of_each_transition() {
        let mut machine = junction_machine();
        let mut junction = Junction::default();

        machine.tick(&mut junction, &mut (), 0.1);
        junction.waiting = 5;
        machine.tick(&mut junction, &mut (), 0.1);
        machine.tick(&mut junction, &mut (), 0.1);

        let transitions = machine.history().transitions();
        assert_eq!(transitions.len(), 2);
        assert_eq!(transitions[0].tick, 2);
        assert_eq!(transitions[1].tick, 3);

        let path = machine.history().get_path();
        assert_eq!(path, vec![&Light::Red, &Light::Green, &Light::Yellow]);
    }
}
