//! Phase-sequencing engine.
//!
//! `transition` is a pure, total function over (program, snapshot, event).
//! It never performs side effects itself; notifications are returned to the
//! caller alongside the new snapshot.
//!
//! Phase order within a workout:
//! - Preparing → Working (first exercise)
//! - Working → RestingBetweenExercises (more exercises in this set)
//! - Working → RestingBetweenSets (last exercise, more sets)
//! - Working → Done (last exercise of the last set)
//! - RestingBetweenExercises → Working (next exercise)
//! - RestingBetweenSets → Working (first exercise of the next set)

use crate::{Event, Notification, Phase, Program, Status, TimerState};

/// Length of the preparation phase in seconds
pub const PREPARE_SECONDS: u32 = 5;

/// Number of final whole seconds of a phase that emit a countdown cue
pub const COUNTDOWN_SECONDS: u32 = 3;

/// Result of applying one event
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    pub state: TimerState,
    pub notifications: Vec<Notification>,
}

impl Transition {
    fn unchanged(state: &TimerState) -> Self {
        Self {
            state: state.clone(),
            notifications: Vec::new(),
        }
    }

    fn with(state: TimerState, notification: Notification) -> Self {
        Self {
            state,
            notifications: vec![notification],
        }
    }
}

/// Position within the phase sequence, independent of time accounting
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Position {
    pub phase: Phase,
    pub set: u32,
    pub exercise_index: usize,
    /// Full length of `phase` at this position
    pub duration: u32,
}

impl Position {
    pub(crate) fn start() -> Self {
        Self {
            phase: Phase::Preparing,
            set: 1,
            exercise_index: 0,
            duration: PREPARE_SECONDS,
        }
    }
}

/// The single phase-advance rule
///
/// Both the engine and the phase plan go through here, so the computed total
/// workout time always agrees with what a session actually runs.
pub(crate) fn next_position(program: &Program, from: Position) -> Position {
    match from.phase {
        Phase::Preparing => Position {
            phase: Phase::Working,
            set: from.set,
            exercise_index: 0,
            duration: program.exercise_duration(0),
        },
        Phase::Working => {
            if !program.is_last_exercise(from.exercise_index) {
                Position {
                    phase: Phase::RestingBetweenExercises,
                    duration: program.rest_between_exercises,
                    ..from
                }
            } else if from.set < program.sets {
                Position {
                    phase: Phase::RestingBetweenSets,
                    duration: program.rest_between_sets,
                    ..from
                }
            } else {
                Position {
                    phase: Phase::Done,
                    duration: 0,
                    ..from
                }
            }
        }
        Phase::RestingBetweenExercises => {
            let next = from.exercise_index + 1;
            Position {
                phase: Phase::Working,
                set: from.set,
                exercise_index: next,
                duration: program.exercise_duration(next),
            }
        }
        Phase::RestingBetweenSets => Position {
            phase: Phase::Working,
            set: from.set + 1,
            exercise_index: 0,
            duration: program.exercise_duration(0),
        },
        Phase::Done => from,
    }
}

/// The idle snapshot a session begins from (and returns to on `Stop`)
pub fn initial_state(program: &Program) -> TimerState {
    TimerState {
        phase: Phase::Preparing,
        status: Status::Idle,
        time_left: PREPARE_SECONDS,
        current_set: 1,
        current_exercise_index: 0,
        elapsed_time: 0,
        total_workout_time: crate::schedule::total_workout_time(program),
    }
}

fn is_initial(state: &TimerState) -> bool {
    state.status == Status::Idle && state.phase != Phase::Done && state.elapsed_time == 0
}

/// Apply one event to a snapshot
///
/// Total over every (state, event) pair: combinations that make no sense
/// return the snapshot unchanged with no notifications.
pub fn transition(program: &Program, state: &TimerState, event: Event) -> Transition {
    match event {
        Event::Start => {
            if !is_initial(state) {
                return Transition::unchanged(state);
            }
            let next = TimerState {
                status: Status::Running,
                phase: Phase::Preparing,
                time_left: PREPARE_SECONDS,
                ..state.clone()
            };
            Transition::with(next, Notification::Start)
        }

        Event::Pause => {
            if state.status != Status::Running {
                return Transition::unchanged(state);
            }
            Transition {
                state: TimerState {
                    status: Status::Paused,
                    ..state.clone()
                },
                notifications: Vec::new(),
            }
        }

        Event::Resume => {
            if state.status != Status::Paused {
                return Transition::unchanged(state);
            }
            Transition {
                state: TimerState {
                    status: Status::Running,
                    ..state.clone()
                },
                notifications: Vec::new(),
            }
        }

        Event::Stop => {
            if state.is_done() {
                return Transition::unchanged(state);
            }
            Transition {
                state: initial_state(program),
                notifications: Vec::new(),
            }
        }

        Event::Tick => {
            if state.status != Status::Running || state.time_left == 0 {
                return Transition::unchanged(state);
            }
            let next = TimerState {
                time_left: state.time_left - 1,
                elapsed_time: state.elapsed_time.saturating_add(1),
                ..state.clone()
            };
            if (1..=COUNTDOWN_SECONDS).contains(&next.time_left) {
                Transition::with(next, Notification::Countdown)
            } else {
                Transition {
                    state: next,
                    notifications: Vec::new(),
                }
            }
        }

        Event::AdvancePhase => {
            if !state.needs_advance() {
                return Transition::unchanged(state);
            }
            let to = next_position(
                program,
                Position {
                    phase: state.phase,
                    set: state.current_set,
                    exercise_index: state.current_exercise_index,
                    duration: 0,
                },
            );
            let status = if to.phase == Phase::Done {
                Status::Idle
            } else {
                state.status
            };
            let next = TimerState {
                phase: to.phase,
                status,
                time_left: to.duration,
                current_set: to.set,
                current_exercise_index: to.exercise_index,
                ..state.clone()
            };
            Transition::with(next, Notification::EndOfPhase)
        }
    }
}
