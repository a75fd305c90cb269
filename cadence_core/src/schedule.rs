//! Phase plan and total workout time.
//!
//! The plan is produced by walking the same advance rule the engine applies
//! at runtime, so `total_workout_time` matches what a session really runs
//! for every combination of sets, exercises and zero-length phases.

use crate::engine::{next_position, Position};
use crate::{Phase, Program};
use serde::Serialize;

/// One phase of a workout as it will be run
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct PlannedPhase {
    pub phase: Phase,
    pub set: u32,
    pub exercise_index: usize,
    pub duration: u32,
}

/// Upper bound on phases per workout; keeps plans and the settle loop small
pub const MAX_PHASES: u64 = 100_000;

/// Visit every phase a program runs through, in order, excluding `Done`
fn walk(program: &Program, mut visit: impl FnMut(&Position)) {
    // An empty exercise list never reaches Done through the advance rule
    if program.exercises.is_empty() || program.sets == 0 {
        return;
    }

    let mut pos = Position::start();
    while pos.phase != Phase::Done {
        visit(&pos);
        pos = next_position(program, pos);
    }
}

/// Ordered list of every phase a program runs through, excluding `Done`
pub fn phase_plan(program: &Program) -> Vec<PlannedPhase> {
    let mut plan = Vec::new();
    walk(program, |pos| {
        plan.push(PlannedPhase {
            phase: pos.phase,
            set: pos.set,
            exercise_index: pos.exercise_index,
            duration: pos.duration,
        })
    });
    plan
}

/// Total seconds from Start to Done, saturating at `u32::MAX`
pub fn total_workout_time(program: &Program) -> u32 {
    let mut total: u64 = 0;
    walk(program, |pos| total += u64::from(pos.duration));
    u32::try_from(total).unwrap_or(u32::MAX)
}

/// Number of phases before `Done`: prepare, then per set `n` work phases,
/// `n − 1` exercise rests and one set rest (none after the last set)
pub fn phase_count(program: &Program) -> u64 {
    if program.exercises.is_empty() || program.sets == 0 {
        return 0;
    }
    2 * u64::from(program.sets) * program.exercises.len() as u64
}

/// Closed-form total:
/// `prepare + sets·Σdurations + sets·restEx·(n−1) + (sets−1)·restSet`
///
/// Computed in u64 so validation can detect programs too long for a `u32`.
pub fn closed_form_total(program: &Program) -> u64 {
    let sets = u64::from(program.sets);
    let count = program.exercises.len() as u64;
    let work: u64 = program.exercises.iter().map(|e| u64::from(e.duration)).sum();

    u64::from(crate::PREPARE_SECONDS)
        + sets * work
        + sets * u64::from(program.rest_between_exercises) * count.saturating_sub(1)
        + sets.saturating_sub(1) * u64::from(program.rest_between_sets)
}
