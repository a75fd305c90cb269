//! Derived progress values for rendering.
//!
//! Nothing here is stored on the snapshot; everything is recomputed from
//! (program, snapshot) so the views cannot drift from the engine.

use crate::{Exercise, Phase, Program, TimerState, PREPARE_SECONDS};

/// Full length of the snapshot's current phase in seconds
pub fn phase_duration(program: &Program, state: &TimerState) -> u32 {
    match state.phase {
        Phase::Preparing => PREPARE_SECONDS,
        Phase::Working => program.exercise_duration(state.current_exercise_index),
        Phase::RestingBetweenExercises => program.rest_between_exercises,
        Phase::RestingBetweenSets => program.rest_between_sets,
        Phase::Done => 0,
    }
}

/// Fraction of the current phase already elapsed, in [0, 1]
///
/// Done and zero-length phases report 1.
pub fn phase_progress(program: &Program, state: &TimerState) -> f64 {
    if state.is_done() {
        return 1.0;
    }
    let duration = phase_duration(program, state);
    if duration == 0 {
        return 1.0;
    }
    let done = duration.saturating_sub(state.time_left);
    (f64::from(done) / f64::from(duration)).clamp(0.0, 1.0)
}

/// Fraction of the whole workout elapsed, in [0, 1]
pub fn overall_progress(state: &TimerState) -> f64 {
    if state.total_workout_time == 0 {
        return 1.0;
    }
    (f64::from(state.elapsed_time) / f64::from(state.total_workout_time)).clamp(0.0, 1.0)
}

/// Exercise being worked (or rested after) at this snapshot
pub fn current_exercise<'a>(program: &'a Program, state: &TimerState) -> Option<&'a Exercise> {
    program.exercises.get(state.current_exercise_index)
}

/// Preview of the exercise coming up next
///
/// While working or resting between exercises, that is the following
/// exercise in the list; between sets (and otherwise) it is the first one.
/// The index is `current_exercise_index + 1` because during a rest the
/// snapshot still points at the exercise just finished.
pub fn next_exercise<'a>(program: &'a Program, state: &TimerState) -> Option<&'a Exercise> {
    match state.phase {
        Phase::Working | Phase::RestingBetweenExercises
            if !program.is_last_exercise(state.current_exercise_index) =>
        {
            program.exercises.get(state.current_exercise_index + 1)
        }
        _ => program.exercises.first(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{initial_state, Exercise, Status};

    fn program() -> Program {
        Program {
            name: "Progress".into(),
            exercises: vec![
                Exercise::new("Lunges", 20),
                Exercise::new("Plank", 0),
                Exercise::new("Burpees", 40),
            ],
            sets: 2,
            rest_between_exercises: 10,
            rest_between_sets: 0,
        }
    }

    fn snapshot(program: &Program, phase: Phase, index: usize, time_left: u32) -> TimerState {
        TimerState {
            phase,
            status: Status::Running,
            time_left,
            current_exercise_index: index,
            ..initial_state(program)
        }
    }

    #[test]
    fn test_phase_progress_fraction() {
        let p = program();
        let state = snapshot(&p, Phase::Working, 0, 15);
        assert!((phase_progress(&p, &state) - 0.25).abs() < 1e-9);

        let state = snapshot(&p, Phase::Preparing, 0, 5);
        assert_eq!(phase_progress(&p, &state), 0.0);
    }

    #[test]
    fn test_zero_length_phase_reports_complete() {
        let p = program();
        assert_eq!(phase_progress(&p, &snapshot(&p, Phase::Working, 1, 0)), 1.0);
        assert_eq!(
            phase_progress(&p, &snapshot(&p, Phase::RestingBetweenSets, 2, 0)),
            1.0
        );
    }

    #[test]
    fn test_done_reports_complete() {
        let p = program();
        let state = TimerState {
            status: Status::Idle,
            ..snapshot(&p, Phase::Done, 2, 0)
        };
        assert_eq!(phase_progress(&p, &state), 1.0);
    }

    #[test]
    fn test_overall_progress() {
        let p = program();
        let mut state = initial_state(&p);
        assert_eq!(overall_progress(&state), 0.0);

        state.elapsed_time = state.total_workout_time / 2;
        let half = overall_progress(&state);
        assert!(half > 0.45 && half <= 0.5);

        state.elapsed_time = state.total_workout_time;
        assert_eq!(overall_progress(&state), 1.0);
    }

    #[test]
    fn test_next_exercise_preview() {
        let p = program();

        let working = snapshot(&p, Phase::Working, 0, 10);
        assert_eq!(next_exercise(&p, &working).map(|e| e.name.as_str()), Some("Plank"));

        let resting = snapshot(&p, Phase::RestingBetweenExercises, 1, 10);
        assert_eq!(next_exercise(&p, &resting).map(|e| e.name.as_str()), Some("Burpees"));

        let last = snapshot(&p, Phase::Working, 2, 10);
        assert_eq!(next_exercise(&p, &last).map(|e| e.name.as_str()), Some("Lunges"));

        let set_rest = snapshot(&p, Phase::RestingBetweenSets, 2, 0);
        assert_eq!(next_exercise(&p, &set_rest).map(|e| e.name.as_str()), Some("Lunges"));

        let preparing = snapshot(&p, Phase::Preparing, 0, 5);
        assert_eq!(next_exercise(&p, &preparing).map(|e| e.name.as_str()), Some("Lunges"));
    }

    #[test]
    fn test_current_exercise() {
        let p = program();
        let state = snapshot(&p, Phase::Working, 2, 3);
        assert_eq!(current_exercise(&p, &state).map(|e| e.duration), Some(40));
    }
}
