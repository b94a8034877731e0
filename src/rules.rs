//! Per-mode rules: required fields, defaults, exercise-count floor and
//! mode-specific invariants.
//!
//! A [`ModeRule`] never looks at raw document nodes. It operates on a
//! [`JobDraft`], the already-coerced field set of one job, so each rule can be
//! exercised in isolation from the tree traversal.

use crate::enums::ModeId;
use crate::error::{ErrorKind, Scope, ValidationError};
use crate::primitives::{empty_list, missing};
use crate::types::Exercise;

/// Job fields a mode may require.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JobField {
    Rounds,
    Exercises,
    WorkTimeInMinutes,
}

impl JobField {
    /// Canonical document key, as used in messages and paths.
    pub fn key(self) -> &'static str {
        match self {
            JobField::Rounds => "Rounds",
            JobField::Exercises => "EXERCISES",
            JobField::WorkTimeInMinutes => "work_time_in_minutes",
        }
    }
}

/// Values substituted for absent optional fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct ModeDefaults {
    pub rounds: Option<u64>,
    pub work_time_in_seconds: Option<u64>,
    pub rest_time_in_seconds: Option<u64>,
}

impl ModeDefaults {
    pub const NONE: ModeDefaults = ModeDefaults {
        rounds: None,
        work_time_in_seconds: None,
        rest_time_in_seconds: None,
    };
}

/// What happens to a declared `Rounds` value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundsPolicy {
    Keep,
    /// Rounds are meaningless for the mode and always dropped.
    Suppress,
}

/// A mode-specific predicate over the parsed job.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Invariant {
    /// Every exercise declares `reps > 0`.
    PositiveReps,
    /// Every exercise declares `reps`.
    RepsDeclared,
    /// No exercise declares `work_time_in_seconds`.
    NoExerciseWorkTime,
    /// The job declares `work_time_in_minutes`.
    RequiresWorkTimeInMinutes,
}

/// Immutable description of one training mode.
#[derive(Debug, PartialEq, Eq)]
pub struct ModeRule {
    pub id: ModeId,
    /// Short display label.
    pub label: &'static str,
    /// Accepted `MODE` spellings, lowercase. Matching ignores ASCII case.
    pub synonyms: &'static [&'static str],
    /// File name of the mode's JSON Schema under a schema root.
    pub schema_file: &'static str,
    pub description: &'static str,
    pub required: &'static [JobField],
    pub defaults: ModeDefaults,
    pub rounds: RoundsPolicy,
    pub min_exercises: usize,
    pub invariants: &'static [Invariant],
}

/// Coerced job fields the mode rules operate on.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct JobDraft {
    pub rounds: Option<u64>,
    pub work_time_in_seconds: Option<u64>,
    pub work_time_in_minutes: Option<u64>,
    pub rest_time_in_seconds: Option<u64>,
    /// `None` when the document has no exercise list at all.
    pub exercises: Option<Vec<Exercise>>,
}

impl JobDraft {
    fn exercise_slice(&self) -> &[Exercise] {
        self.exercises.as_deref().unwrap_or(&[])
    }
}

impl ModeRule {
    /// Required-field checks, exercise-count floor, then defaults.
    pub fn apply(&self, draft: &mut JobDraft) -> Result<(), ValidationError> {
        for field in self.required {
            let present = match field {
                JobField::Rounds => draft.rounds.is_some(),
                JobField::WorkTimeInMinutes => draft.work_time_in_minutes.is_some(),
                JobField::Exercises => draft.exercises.is_some(),
            };
            if !present {
                let mut err = missing(field.key(), Scope::Job);
                if *field == JobField::Exercises {
                    err.kind = ErrorKind::EmptyCollection;
                }
                return Err(err);
            }
        }

        let count = draft.exercise_slice().len();
        if count < self.min_exercises {
            let mut err = empty_list(JobField::Exercises.key(), Scope::Job);
            if self.min_exercises > 1 {
                err.message = format!(
                    "{} job requires at least {} items in 'EXERCISES', got {}",
                    self.id, self.min_exercises, count
                );
            }
            return Err(err);
        }

        draft.rounds = match self.rounds {
            RoundsPolicy::Suppress => None,
            RoundsPolicy::Keep => draft.rounds.or(self.defaults.rounds),
        };
        draft.work_time_in_seconds = draft
            .work_time_in_seconds
            .or(self.defaults.work_time_in_seconds);
        draft.rest_time_in_seconds = draft
            .rest_time_in_seconds
            .or(self.defaults.rest_time_in_seconds);
        Ok(())
    }

    /// Mode-specific invariants, checked in declaration order; exercises in
    /// document order.
    pub fn check_invariants(&self, draft: &JobDraft) -> Result<(), ValidationError> {
        for invariant in self.invariants {
            self.check(*invariant, draft)?;
        }
        Ok(())
    }

    fn check(&self, invariant: Invariant, draft: &JobDraft) -> Result<(), ValidationError> {
        let mode = self.id;
        match invariant {
            Invariant::RequiresWorkTimeInMinutes => {
                if draft.work_time_in_minutes.is_none() {
                    return Err(violation(
                        JobField::WorkTimeInMinutes.key().to_string(),
                        format!("{} job requires 'work_time_in_minutes'", mode),
                    ));
                }
            }
            Invariant::PositiveReps => {
                if let Some(idx) = draft
                    .exercise_slice()
                    .iter()
                    .position(|ex| !matches!(ex.reps, Some(r) if r > 0))
                {
                    return Err(self.reps_violation(invariant, idx));
                }
            }
            Invariant::RepsDeclared => {
                if let Some(idx) = draft.exercise_slice().iter().position(|ex| ex.reps.is_none()) {
                    return Err(self.reps_violation(invariant, idx));
                }
            }
            Invariant::NoExerciseWorkTime => {
                if let Some(idx) = draft
                    .exercise_slice()
                    .iter()
                    .position(|ex| ex.work_time_in_seconds.is_some())
                {
                    return Err(violation(
                        format!("EXERCISES/{}/work_time_in_seconds", idx),
                        format!(
                            "{} job exercise at index {} must not define 'work_time_in_seconds'",
                            mode, idx
                        ),
                    ));
                }
            }
        }
        Ok(())
    }
}

impl ModeRule {
    /// Re-express a failed exercise in this mode's terms.
    ///
    /// An exercise with neither `reps` nor work time breaks every mode that
    /// demands reps; such modes report their own violation, relative to the
    /// exercise, with the generic error as its cause. Any other failure comes
    /// back unchanged.
    pub fn exercise_violation(&self, idx: usize, err: ValidationError) -> ValidationError {
        if err.kind != ErrorKind::ExerciseInvariantViolation {
            return err;
        }
        let demand = self
            .invariants
            .iter()
            .find(|i| matches!(i, Invariant::PositiveReps | Invariant::RepsDeclared));
        match demand {
            Some(invariant) => {
                let mut violation = self.reps_violation(*invariant, idx);
                violation.path = "reps".to_string();
                violation.cause = Some(Box::new(err));
                violation
            }
            None => err,
        }
    }

    fn reps_violation(&self, invariant: Invariant, idx: usize) -> ValidationError {
        let message = match invariant {
            Invariant::PositiveReps => format!(
                "{} exercise at index {} must define a positive 'reps' value",
                self.id, idx
            ),
            _ => format!("{} job exercise at index {} must define 'reps'", self.id, idx),
        };
        violation(format!("EXERCISES/{}/reps", idx), message)
    }
}

fn violation(path: String, message: String) -> ValidationError {
    ValidationError::new(ErrorKind::ModeInvariantViolation, Scope::Job, path, message)
}
