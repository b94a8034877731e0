//! Validation and normalization engine for hierarchical workout definitions.
//!
//! A workout document is a tree: a workout holds stages, a stage holds jobs
//! and a job holds exercises. Every job names a training mode (`MODE`), and
//! the mode decides which fields the job needs, which defaults it receives
//! and which extra invariants its exercises must satisfy.
//!
//! ```text
//! parse(yaml) → Value → validate(&value) → Workout → serialize::to_yaml → yaml
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! let yaml = r#"
//! NAME: Monday
//! STAGES:
//!   - NAME: Main
//!     JOBS:
//!       - NAME: Intervals
//!         MODE: tabata
//!         EXERCISES:
//!           - NAME: Burpees
//!             reps: 10
//! "#;
//!
//! let workout = workout_spec::load(yaml).expect("valid workout");
//! let job = &workout.stages[0].jobs[0];
//! assert_eq!(job.mode, workout_spec::ModeId::Tabata);
//! assert_eq!(job.rounds, Some(8));
//! ```
//!
//! # Feature Flags
//!
//! | Feature  | Default | Description |
//! |----------|---------|-------------|
//! | `schema` | yes     | JSON Schema backed pipeline via the [`jsonschema`] crate. Enables [`schema::SchemaValidator`]. |

pub mod config;
pub mod enums;
pub mod error;
pub mod normalize;
pub mod parse;
pub mod primitives;
pub mod registry;
pub mod rules;
#[cfg(feature = "schema")]
pub mod schema;
pub mod serialize;
pub mod types;
pub mod validate;

pub use config::Limits;
pub use enums::ModeId;
pub use error::*;
pub use types::*;

pub use parse::parse;
pub use registry::resolve;
pub use validate::{InlineValidator, Pipeline, validate};

use std::path::Path;

/// Parse and validate a YAML workout with the inline pipeline and default limits.
///
/// # Errors
///
/// [`LoadError::Parse`] when the text is not a YAML mapping,
/// [`LoadError::Validation`] when the document breaks a rule.
pub fn load(input: &str) -> Result<Workout, LoadError> {
    load_with(input, &InlineValidator::default())
}

/// Parse `input` and validate it with any [`Pipeline`].
///
/// ```rust
/// use workout_spec::{InlineValidator, Limits};
///
/// let limits = Limits { name: 8, ..Limits::default() };
/// let err = workout_spec::load_with(
///     "NAME: A very long workout name\nSTAGES: []\n",
///     &InlineValidator::with_limits(limits),
/// )
/// .unwrap_err();
/// assert!(err.to_string().contains("exceeds max length 8"));
/// ```
pub fn load_with(input: &str, pipeline: &impl Pipeline) -> Result<Workout, LoadError> {
    let document = parse::parse(input)?;
    let workout = pipeline.validate(&document)?;
    tracing::debug!(
        workout = %workout.name,
        stages = workout.stages.len(),
        exercises = workout.exercise_count(),
        "workout loaded"
    );
    Ok(workout)
}

/// Read a workout file and [`load`] it.
pub fn load_file(path: impl AsRef<Path>) -> Result<Workout, LoadError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load(&text)
}
