//! Inline validation pipeline: workout → stage → job → exercise.
//!
//! Validation is fail-fast. The first invalid child in document order is
//! reported, wrapped by every enclosing layer with its index and the parent's
//! name. Validation never modifies the input tree.

use serde_json::{Map, Value};

use crate::config::Limits;
use crate::error::{ErrorKind, Scope, ValidationError};
use crate::normalize::{
    EXERCISE_FIELDS, JOB_FIELDS, NodeFields, STAGE_FIELDS, WORKOUT_FIELDS, canonicalize,
    collect_extras,
};
use crate::primitives::*;
use crate::registry::{resolve, rule_for};
use crate::rules::JobDraft;
use crate::types::*;

/// A complete validation backend: generic document in, typed model out.
pub trait Pipeline {
    fn validate(&self, document: &Value) -> Result<Workout, ValidationError>;
}

/// The hand-written validator. Canonical for both pipelines' semantics.
#[derive(Clone, Debug, Default)]
pub struct InlineValidator {
    limits: Limits,
}

impl Pipeline for InlineValidator {
    fn validate(&self, document: &Value) -> Result<Workout, ValidationError> {
        self.validate_workout(document)
    }
}

/// Validate a workout document with default limits.
pub fn validate(document: &Value) -> Result<Workout, ValidationError> {
    InlineValidator::default().validate_workout(document)
}

/// Validate a single exercise node with default limits.
pub fn validate_exercise(node: &Value) -> Result<Exercise, ValidationError> {
    InlineValidator::default().validate_exercise(node)
}

/// Validate a single job node with default limits.
pub fn validate_job(node: &Value) -> Result<Job, ValidationError> {
    InlineValidator::default().validate_job(node)
}

/// Validate a single stage node with default limits.
pub fn validate_stage(node: &Value) -> Result<Stage, ValidationError> {
    InlineValidator::default().validate_stage(node)
}

impl InlineValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(limits: Limits) -> Self {
        InlineValidator { limits }
    }

    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    // ─── Exercise ────────────────────────────────────────────────────────────

    pub fn validate_exercise(&self, node: &Value) -> Result<Exercise, ValidationError> {
        let scope = Scope::Exercise;
        let fields = canonicalize(as_mapping(node, "exercise", scope)?, EXERCISE_FIELDS);

        let name = self.require_name(&fields, scope)?;
        // Counts are sign-free here; modes that need positive reps say so.
        let reps = optional_int(fields.get("reps"), "reps", scope)?;
        let work_time_in_seconds =
            optional_int(fields.get("work_time_in_seconds"), "work_time_in_seconds", scope)?;
        if reps.is_none() && work_time_in_seconds.is_none() {
            return Err(ValidationError::new(
                ErrorKind::ExerciseInvariantViolation,
                scope,
                "",
                format!(
                    "Exercise '{}': at least one of 'reps' or 'work_time_in_seconds' must be present",
                    name
                ),
            ));
        }

        let weight = optional_number(fields.get("weight"), "weight", scope)?;
        let notes = optional_string(fields.get("notes"), "notes", scope)?
            .map(|s| truncate_soft(&s, self.limits.notes));
        let help = optional_string(fields.get("help"), "help", scope)?
            .map(|s| truncate_soft(&s, self.limits.notes));
        let extra = collect_extras(&fields, &self.limits, scope)?;

        tracing::trace!(exercise = %name, ?reps, ?work_time_in_seconds, "exercise parsed");

        Ok(Exercise {
            name,
            reps,
            work_time_in_seconds,
            weight,
            notes,
            help,
            extra,
        })
    }

    // ─── Job ─────────────────────────────────────────────────────────────────

    pub fn validate_job(&self, node: &Value) -> Result<Job, ValidationError> {
        let scope = Scope::Job;
        let fields = canonicalize(as_mapping(node, "job", scope)?, JOB_FIELDS);

        // 1. NAME
        let name = self.require_name(&fields, scope)?;

        // 2. MODE
        let mode = match fields.get("MODE").filter(|v| !v.is_null()) {
            None => return Err(missing("MODE", scope)),
            Some(Value::String(raw)) => resolve(raw)?,
            Some(other) => {
                return Err(ValidationError::new(
                    ErrorKind::WrongType,
                    scope,
                    "MODE",
                    format!("field 'MODE' must be a string, got {}", type_name(other)),
                ));
            }
        };
        let rule = rule_for(mode);

        // 3. Common optional fields
        let description = self.optional_description(&fields, scope)?;
        let rounds = optional_positive(fields.get("Rounds"), "Rounds", scope)?;
        let work_time_in_seconds =
            optional_non_negative(fields.get("work_time_in_seconds"), "work_time_in_seconds", scope)?;
        let work_time_in_minutes =
            optional_positive(fields.get("work_time_in_minutes"), "work_time_in_minutes", scope)?;
        let rest_time_in_seconds =
            optional_non_negative(fields.get("rest_time_in_seconds"), "rest_time_in_seconds", scope)?;
        let rest_between_exercises_in_seconds = optional_non_negative(
            fields.get("Rest_between_exercises_in_seconds"),
            "Rest_between_exercises_in_seconds",
            scope,
        )?;
        let rest_between_rounds_in_seconds = optional_non_negative(
            fields.get("Rest_between_rounds_in_seconds"),
            "Rest_between_rounds_in_seconds",
            scope,
        )?;
        let cadence = match optional_string(fields.get("cadence"), "cadence", scope)? {
            Some(c) => {
                Some(enforce_strict_len(c.trim(), self.limits.cadence, "cadence", scope)?.to_string())
            }
            None => None,
        };
        let eccentric_neg = optional_bool(fields.get("Eccentric (NEG)"));
        let isometric_hold = optional_bool(fields.get("isometric (HOLD)"));
        if eccentric_neg && isometric_hold {
            return Err(ValidationError::new(
                ErrorKind::MutuallyExclusiveFlags,
                scope,
                "",
                "Eccentric (NEG) and Isometric (HOLD) cannot both be true",
            ));
        }

        // 4. Exercises
        let exercises = optional_list(fields.get("EXERCISES"), "EXERCISES", scope)?
            .map(|items| {
                self.validate_children(
                    items,
                    |item| self.validate_exercise(item),
                    |idx, err| {
                        rule.exercise_violation(idx, err).wrap(
                            scope,
                            &format!("EXERCISES/{}", idx),
                            format_args!("invalid exercise at index {}", idx),
                        )
                    },
                )
            })
            .transpose()?;

        // 5–6. Mode rule
        let mut draft = JobDraft {
            rounds,
            work_time_in_seconds,
            work_time_in_minutes,
            rest_time_in_seconds,
            exercises,
        };
        rule.apply(&mut draft)?;
        rule.check_invariants(&draft)?;

        // 7. Extras
        let extra = collect_extras(&fields, &self.limits, scope)?;

        let exercises = draft.exercises.unwrap_or_default();
        tracing::debug!(
            job = %name,
            mode = %mode,
            rounds = ?draft.rounds,
            exercises = exercises.len(),
            "job parsed"
        );

        Ok(Job {
            name,
            mode,
            description,
            rounds: draft.rounds,
            work_time_in_seconds: draft.work_time_in_seconds,
            work_time_in_minutes: draft.work_time_in_minutes,
            rest_time_in_seconds: draft.rest_time_in_seconds,
            rest_between_exercises_in_seconds,
            rest_between_rounds_in_seconds,
            cadence,
            eccentric_neg,
            isometric_hold,
            exercises,
            extra,
        })
    }

    // ─── Stage ───────────────────────────────────────────────────────────────

    pub fn validate_stage(&self, node: &Value) -> Result<Stage, ValidationError> {
        let scope = Scope::Stage;
        let fields = canonicalize(as_mapping(node, "stage", scope)?, STAGE_FIELDS);

        let name = self.require_name(&fields, scope)?;
        let items = require_non_empty_list(fields.get("JOBS"), "JOBS", scope)?;
        let jobs = self.validate_children(items, |item| self.validate_job(item), |idx, err| {
            err.wrap(
                scope,
                &format!("JOBS/{}", idx),
                format_args!("Stage '{}' has invalid job at index {}", name, idx),
            )
        })?;
        let description = self.optional_description(&fields, scope)?;
        let extra = collect_extras(&fields, &self.limits, scope)?;

        tracing::debug!(stage = %name, jobs = jobs.len(), "stage parsed");

        Ok(Stage {
            name,
            description,
            jobs,
            extra,
        })
    }

    // ─── Workout ─────────────────────────────────────────────────────────────

    pub fn validate_workout(&self, document: &Value) -> Result<Workout, ValidationError> {
        let scope = Scope::Workout;
        let fields = canonicalize(as_mapping(document, "workout", scope)?, WORKOUT_FIELDS);

        let name = self.require_name(&fields, scope)?;
        let items = require_non_empty_list(fields.get("STAGES"), "STAGES", scope)?;
        let stages = self.validate_children(items, |item| self.validate_stage(item), |idx, err| {
            err.wrap(
                scope,
                &format!("STAGES/{}", idx),
                format_args!("Workout '{}' has invalid stage at index {}", name, idx),
            )
        })?;
        let description = self.optional_description(&fields, scope)?;
        let extra = collect_extras(&fields, &self.limits, scope)?;

        tracing::debug!(workout = %name, stages = stages.len(), "workout parsed");

        Ok(Workout {
            name,
            description,
            stages,
            extra,
        })
    }

    // ─── Shared steps ────────────────────────────────────────────────────────

    fn require_name(&self, fields: &NodeFields<'_>, scope: Scope) -> Result<String, ValidationError> {
        let name = require_non_empty_string(fields.get("NAME"), "NAME", scope)?;
        enforce_strict_len(&name, self.limits.name, "NAME", scope)?;
        Ok(name)
    }

    fn optional_description(
        &self,
        fields: &NodeFields<'_>,
        scope: Scope,
    ) -> Result<Option<String>, ValidationError> {
        Ok(optional_string(fields.get("description"), "description", scope)?
            .map(|s| truncate_soft(&s, self.limits.description)))
    }

    /// Validate `items` in order, stopping at the first failure.
    fn validate_children<T>(
        &self,
        items: &[Value],
        validate: impl Fn(&Value) -> Result<T, ValidationError>,
        wrap: impl Fn(usize, ValidationError) -> ValidationError,
    ) -> Result<Vec<T>, ValidationError> {
        items
            .iter()
            .enumerate()
            .map(|(idx, item)| validate(item).map_err(|err| wrap(idx, err)))
            .collect()
    }
}

fn as_mapping<'a>(
    node: &'a Value,
    what: &str,
    scope: Scope,
) -> Result<&'a Map<String, Value>, ValidationError> {
    node.as_object().ok_or_else(|| {
        ValidationError::new(
            ErrorKind::WrongType,
            scope,
            "",
            format!("{} must be a mapping, got {}", what, type_name(node)),
        )
    })
}
