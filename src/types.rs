use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::enums::ModeId;
use crate::registry::rule_for;
use crate::rules::ModeRule;

/// Unrecognized keys of a node, in document order.
pub type Extras = Map<String, Value>;

// ─── Exercise ────────────────────────────────────────────────────────────────

/// One exercise of a job. At least one of `reps` / `work_time_in_seconds` is set.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reps: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_time_in_seconds: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub extra: Extras,
}

// ─── Job ─────────────────────────────────────────────────────────────────────

/// A block of work inside a stage, shaped by its [`ModeId`].
///
/// Mode defaults are already materialized: a TABATA job without `Rounds` in
/// the source carries `rounds == Some(8)`, and an EDT job never carries rounds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub name: String,
    pub mode: ModeId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rounds: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_time_in_seconds: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_time_in_minutes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rest_time_in_seconds: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rest_between_exercises_in_seconds: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rest_between_rounds_in_seconds: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cadence: Option<String>,
    #[serde(default)]
    pub eccentric_neg: bool,
    #[serde(default)]
    pub isometric_hold: bool,
    #[serde(default)]
    pub exercises: Vec<Exercise>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub extra: Extras,
}

impl Job {
    /// The rule this job was validated against.
    pub fn rule(&self) -> &'static ModeRule {
        rule_for(self.mode)
    }
}

// ─── Stage ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Stage {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub jobs: Vec<Job>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub extra: Extras,
}

// ─── Workout ─────────────────────────────────────────────────────────────────

/// Root of the validated tree.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub stages: Vec<Stage>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub extra: Extras,
}

impl Workout {
    /// All jobs in document order.
    pub fn jobs(&self) -> impl Iterator<Item = &Job> {
        self.stages.iter().flat_map(|s| s.jobs.iter())
    }

    /// Total number of exercises across all jobs.
    pub fn exercise_count(&self) -> usize {
        self.jobs().map(|j| j.exercises.len()).sum()
    }
}
