//! Built-in program library and program files.
//!
//! The library is read-only: programs are defined here or loaded from a
//! user-supplied JSON/TOML file, never edited in place.

use crate::types::*;
use crate::{Error, Result};
use once_cell::sync::Lazy;
use std::collections::BTreeMap;
use std::path::Path;

/// Library of built-in programs keyed by id
pub type Library = BTreeMap<String, Program>;

/// Cached default library - built once and reused across all operations
static DEFAULT_LIBRARY: Lazy<Library> = Lazy::new(build_default_library);

/// Get a reference to the cached default library
pub fn get_default_library() -> &'static Library {
    &DEFAULT_LIBRARY
}

/// Look up a built-in program by id
pub fn find_program(id: &str) -> Result<&'static Program> {
    get_default_library()
        .get(id)
        .ok_or_else(|| Error::UnknownProgram(id.to_string()))
}

fn build_default_library() -> Library {
    let mut library = BTreeMap::new();

    library.insert(
        "tabata".into(),
        Program {
            name: "Tabata".into(),
            exercises: vec![Exercise::new("Burpees", 20)],
            sets: 8,
            rest_between_exercises: 0,
            rest_between_sets: 10,
        },
    );

    library.insert(
        "quick".into(),
        Program {
            name: "Quick Start".into(),
            exercises: vec![
                Exercise::new("Jumping Jacks", 20),
                Exercise::new("Squats", 20),
            ],
            sets: 2,
            rest_between_exercises: 10,
            rest_between_sets: 20,
        },
    );

    library.insert(
        "circuit".into(),
        Program {
            name: "Full Body Circuit".into(),
            exercises: vec![
                Exercise::new("Kettlebell Swings", 40),
                Exercise::new("Push-ups", 30),
                Exercise::new("Reverse Lunges", 40),
                Exercise::new("Mountain Climbers", 30),
                Exercise::new("Plank", 45),
            ],
            sets: 3,
            rest_between_exercises: 15,
            rest_between_sets: 60,
        },
    );

    library.insert(
        "ladder".into(),
        Program {
            name: "Sprint Ladder".into(),
            exercises: vec![
                Exercise::new("Sprint 15s", 15),
                Exercise::new("Sprint 30s", 30),
                Exercise::new("Sprint 45s", 45),
                Exercise::new("Sprint 60s", 60),
            ],
            sets: 2,
            rest_between_exercises: 30,
            rest_between_sets: 90,
        },
    );

    library
}

impl Program {
    /// Validate program shape
    ///
    /// Returns every violation found; an empty list means a session can be
    /// built from this program. Zero-length exercises and rests are legal.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.exercises.is_empty() {
            errors.push(format!("Program '{}' has no exercises", self.name));
        }

        if self.sets == 0 {
            errors.push(format!("Program '{}' must have at least one set", self.name));
        }

        for (i, exercise) in self.exercises.iter().enumerate() {
            if exercise.name.trim().is_empty() {
                errors.push(format!("Exercise {} has an empty name", i + 1));
            }
        }

        if crate::schedule::closed_form_total(self) > u64::from(u32::MAX) {
            errors.push(format!("Program '{}' is too long to time", self.name));
        }

        if crate::schedule::phase_count(self) > crate::schedule::MAX_PHASES {
            errors.push(format!(
                "Program '{}' has more than {} phases",
                self.name,
                crate::schedule::MAX_PHASES
            ));
        }

        errors
    }

    /// Validate, collapsing all violations into a single error
    pub fn ensure_valid(&self) -> Result<()> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(Error::InvalidProgram(errors.join("; ")))
        }
    }
}

/// Load and validate a program from a file
///
/// `.json` files are parsed as JSON; anything else as TOML.
pub fn load_program_file(path: &Path) -> Result<Program> {
    let contents = std::fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let program: Program = if is_json {
        serde_json::from_str(&contents)?
    } else {
        toml::from_str(&contents)?
    };

    program.ensure_valid()?;
    tracing::info!("Loaded program '{}' from {:?}", program.name, path);
    Ok(program)
}
