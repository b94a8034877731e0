//! String length limits shared by both validation pipelines.
//!
//! Names and extra-field keys are strictly capped (too long is an error);
//! descriptions, notes, help texts and extra-field string values are softly
//! capped (silently truncated).

use crate::error::ParseError;
use serde::{Deserialize, Serialize};

pub const MAX_NAME_LEN: usize = 40;
pub const MAX_DESCRIPTION_LEN: usize = 300;
pub const MAX_CADENCE_LEN: usize = 20;
pub const MAX_NOTES_LEN: usize = 200;
pub const MAX_EXTRA_KEY_LEN: usize = 30;
pub const MAX_EXTRA_VALUE_LEN: usize = 100;

/// Length caps, in characters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// Strict: `NAME` of every node.
    pub name: usize,
    /// Soft: `description` of workouts, stages and jobs.
    pub description: usize,
    /// Strict: job `cadence`.
    pub cadence: usize,
    /// Soft: exercise `notes` and `help`.
    pub notes: usize,
    /// Strict: keys of extra fields.
    pub extra_key: usize,
    /// Soft: string values of extra fields.
    pub extra_value: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            name: MAX_NAME_LEN,
            description: MAX_DESCRIPTION_LEN,
            cadence: MAX_CADENCE_LEN,
            notes: MAX_NOTES_LEN,
            extra_key: MAX_EXTRA_KEY_LEN,
            extra_value: MAX_EXTRA_VALUE_LEN,
        }
    }
}

impl Limits {
    /// Load limits from a YAML mapping. Absent keys keep their defaults.
    ///
    /// ```rust
    /// let limits = workout_spec::config::Limits::from_yaml("name: 60\n").unwrap();
    /// assert_eq!(limits.name, 60);
    /// assert_eq!(limits.description, 300);
    /// ```
    pub fn from_yaml(input: &str) -> Result<Limits, ParseError> {
        if input.trim().is_empty() {
            return Ok(Limits::default());
        }
        serde_saphyr::from_str(input).map_err(|e| ParseError {
            kind: crate::error::ParseErrorKind::TypeMismatch,
            message: format!("invalid limits: {}", e),
            line: None,
            column: None,
        })
    }
}
