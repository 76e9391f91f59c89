//! Enter/update state machines that drive the boss and the player.
//!
//! A behavior owns its per-state data (timers, counters) and decides
//! transitions; the `StateMachine` only tracks which state is current and
//! makes sure a state's `enter` hook runs exactly once, at the start of the
//! first drive after the state became current.

pub mod boss;
pub mod player;

use std::fmt::Debug;

use tracing::debug;

pub trait Behavior<C> {
    type State: Copy + PartialEq + Debug;

    /// Runs once when `state` becomes current, before its first `update`.
    /// `previous` is the state that was active before the switch.
    fn enter(&mut self, _state: Self::State, _previous: Option<Self::State>, _ctx: &mut C, _dt: f64) {}

    /// Per-frame logic.  Returning a state requests a transition that takes
    /// effect on the next drive.
    fn update(&mut self, state: Self::State, ctx: &mut C, dt: f64) -> Option<Self::State>;
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StateMachine<S> {
    current: S,
    /// State active right before the most recent transition.
    previous: Option<S>,
    /// `enter` has run for `current`.
    entered: bool,
}

impl<S: Copy + PartialEq + Debug> StateMachine<S> {
    pub fn new(initial: S) -> Self {
        Self { current: initial, previous: None, entered: false }
    }

    /// A machine that has just switched `from` one state `to` another and has
    /// not yet run the new state's `enter`.
    pub fn transitioning(from: S, to: S) -> Self {
        Self { current: to, previous: Some(from), entered: false }
    }

    #[inline]
    pub fn current(&self) -> S {
        self.current
    }

    #[inline]
    pub fn previous(&self) -> Option<S> {
        self.previous
    }

    /// One cycle: fire `enter` if the state changed since the last cycle, then
    /// `update`, recording any transition it asks for.
    pub fn drive<C, B>(&mut self, behavior: &mut B, ctx: &mut C, dt: f64)
    where
        B: Behavior<C, State = S>,
    {
        if !self.entered {
            debug!(from = ?self.previous, to = ?self.current, "entering state");
            behavior.enter(self.current, self.previous, ctx, dt);
            self.entered = true;
        }

        if let Some(next) = behavior.update(self.current, ctx, dt) {
            self.previous = Some(self.current);
            self.current = next;
            self.entered = false;
        }
    }
}
