//! A single workout attempt: a validated program plus its current snapshot.
//!
//! `Session::apply` is the only way the snapshot changes. After each event it
//! settles the snapshot: while the current phase has no time left it keeps
//! advancing, so zero-length phases are skipped without waiting for a tick.

use crate::engine::{initial_state, transition};
use crate::progress;
use crate::{Event, Exercise, Notification, Program, Result, TimerState};

#[derive(Clone, Debug)]
pub struct Session {
    program: Program,
    state: TimerState,
}

impl Session {
    /// Build a session in its idle initial snapshot
    ///
    /// Fails fast with `Error::InvalidProgram` for a malformed program.
    pub fn new(program: Program) -> Result<Self> {
        program.ensure_valid()?;
        let state = initial_state(&program);
        tracing::debug!(
            "New session for '{}' ({}s total)",
            program.name,
            state.total_workout_time
        );
        Ok(Self { program, state })
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn state(&self) -> &TimerState {
        &self.state
    }

    /// Apply an event, then settle, returning every notification in order
    pub fn apply(&mut self, event: Event) -> Vec<Notification> {
        let t = transition(&self.program, &self.state, event);
        let mut notifications = t.notifications;
        self.commit(event, t.state);

        while self.state.needs_advance() {
            let t = transition(&self.program, &self.state, Event::AdvancePhase);
            notifications.extend(t.notifications);
            self.commit(Event::AdvancePhase, t.state);
        }

        notifications
    }

    fn commit(&mut self, event: Event, next: TimerState) {
        if next.phase != self.state.phase
            || next.current_exercise_index != self.state.current_exercise_index
        {
            tracing::info!(
                "Phase {} -> {} (set {}/{}, exercise {})",
                self.state.phase,
                next.phase,
                next.current_set,
                self.program.sets,
                next.current_exercise_index + 1
            );
        } else if next != self.state {
            tracing::debug!("{:?}: {:?}", event, next);
        }
        self.state = next;
    }

    pub fn phase_progress(&self) -> f64 {
        progress::phase_progress(&self.program, &self.state)
    }

    pub fn overall_progress(&self) -> f64 {
        progress::overall_progress(&self.state)
    }

    pub fn current_exercise(&self) -> Option<&Exercise> {
        progress::current_exercise(&self.program, &self.state)
    }

    pub fn next_exercise(&self) -> Option<&Exercise> {
        progress::next_exercise(&self.program, &self.state)
    }
}
