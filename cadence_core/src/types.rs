//! Core domain types for the Cadence interval trainer.
//!
//! This module defines the fundamental types used throughout the system:
//! - Programs and their exercises
//! - Phases and run status
//! - Timer snapshots produced by the engine
//! - Events, user commands and notifications

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Program Types
// ============================================================================

/// A single timed exercise within a program
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Exercise {
    pub name: String,
    /// Work duration in seconds. Zero is legal and is skipped immediately.
    pub duration: u32,
}

impl Exercise {
    pub fn new(name: impl Into<String>, duration: u32) -> Self {
        Self {
            name: name.into(),
            duration,
        }
    }
}

/// An interval workout program
///
/// Read-only input to the engine. Every set runs the full exercise list in
/// order, with `rest_between_exercises` between consecutive exercises and
/// `rest_between_sets` between sets.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Program {
    pub name: String,
    pub exercises: Vec<Exercise>,
    pub sets: u32,
    #[serde(default)]
    pub rest_between_exercises: u32,
    #[serde(default)]
    pub rest_between_sets: u32,
}

impl Program {
    pub fn exercise_count(&self) -> usize {
        self.exercises.len()
    }

    pub fn is_last_exercise(&self, index: usize) -> bool {
        index + 1 >= self.exercises.len()
    }

    /// Duration of the exercise at `index`, or 0 if out of range
    pub fn exercise_duration(&self, index: usize) -> u32 {
        self.exercises.get(index).map(|e| e.duration).unwrap_or(0)
    }
}

// ============================================================================
// Phase and Status
// ============================================================================

/// Stage of the workout cycle
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Preparing,
    Working,
    RestingBetweenExercises,
    RestingBetweenSets,
    Done,
}

impl Phase {
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Preparing => "Get Ready",
            Phase::Working => "Work",
            Phase::RestingBetweenExercises => "Rest",
            Phase::RestingBetweenSets => "Set Rest",
            Phase::Done => "Done",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Run disposition, orthogonal to the phase
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Running,
    Paused,
    Idle,
}

// ============================================================================
// Timer Snapshot
// ============================================================================

/// Immutable snapshot of a workout in progress
///
/// Snapshots are only ever produced by [`crate::engine::transition`]; a new
/// one replaces the previous one after every event.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimerState {
    pub phase: Phase,
    pub status: Status,
    pub time_left: u32,
    /// 1-based set counter
    pub current_set: u32,
    pub current_exercise_index: usize,
    pub elapsed_time: u32,
    pub total_workout_time: u32,
}

impl TimerState {
    pub fn is_done(&self) -> bool {
        self.phase == Phase::Done
    }

    pub fn is_running(&self) -> bool {
        self.status == Status::Running
    }

    /// True when the current phase has run out and must be advanced
    pub fn needs_advance(&self) -> bool {
        self.time_left == 0 && self.phase != Phase::Done && self.status != Status::Idle
    }
}

// ============================================================================
// Events, Commands and Notifications
// ============================================================================

/// Every input the transition function understands
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    Start,
    Tick,
    Pause,
    Resume,
    Stop,
    AdvancePhase,
}

/// User-issued commands accepted by the driver
///
/// `Tick` and `AdvancePhase` are internal to the driver and cannot be sent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Start,
    Pause,
    Resume,
    Stop,
}

impl From<Command> for Event {
    fn from(cmd: Command) -> Self {
        match cmd {
            Command::Start => Event::Start,
            Command::Pause => Event::Pause,
            Command::Resume => Event::Resume,
            Command::Stop => Event::Stop,
        }
    }
}

/// Side-effect cues emitted by transitions, carrying no payload
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Notification {
    Start,
    /// One of the final three whole seconds of a phase
    Countdown,
    EndOfPhase,
}

/// Why a driven session ended
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    Completed,
    Aborted,
}

impl fmt::Display for FinishReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FinishReason::Completed => f.write_str("completed"),
            FinishReason::Aborted => f.write_str("aborted"),
        }
    }
}
