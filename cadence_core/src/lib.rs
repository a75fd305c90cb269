#![forbid(unsafe_code)]

//! Core domain model and timer engine for the Cadence interval trainer.
//!
//! This crate provides:
//! - Domain types (programs, exercises, phases, timer snapshots)
//! - The pure phase-sequencing engine and its phase plan
//! - A session wrapper and an async tick driver
//! - Program library, configuration and the workout journal

pub mod types;
pub mod error;
pub mod engine;
pub mod schedule;
pub mod progress;
pub mod session;
pub mod driver;
pub mod catalog;
pub mod config;
pub mod journal;
pub mod logging;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use engine::{initial_state, transition, Transition, COUNTDOWN_SECONDS, PREPARE_SECONDS};
pub use schedule::{phase_plan, total_workout_time, PlannedPhase};
pub use session::Session;
pub use driver::{Driver, Finish, SessionObserver};
pub use catalog::{find_program, get_default_library, load_program_file};
pub use config::Config;
pub use journal::{JsonlSink, RecordSink, WorkoutRecord};
