//! [`Workout`] → document tree / YAML.
//!
//! The emitted document uses canonical key casing, carries every materialized
//! default, and appends extra fields after the recognized ones. Validating it
//! again yields a model equal to the one it came from.

use serde_json::{Map, Value, json};

use crate::error::SerializeError;
use crate::types::*;

/// Convert a validated workout back into a generic document tree.
pub fn to_document(workout: &Workout) -> Value {
    let mut map = Map::new();
    map.insert("NAME".into(), json!(workout.name));
    insert_opt(&mut map, "description", workout.description.as_ref().map(|d| json!(d)));
    map.insert(
        "STAGES".into(),
        Value::Array(workout.stages.iter().map(stage_document).collect()),
    );
    append_extras(&mut map, &workout.extra);
    Value::Object(map)
}

/// Serialize a workout to YAML via [`to_document`].
pub fn to_yaml(workout: &Workout) -> Result<String, SerializeError> {
    serde_saphyr::to_string(&to_document(workout)).map_err(|e| SerializeError {
        message: format!("failed to serialize to YAML: {}", e),
    })
}

fn stage_document(stage: &Stage) -> Value {
    let mut map = Map::new();
    map.insert("NAME".into(), json!(stage.name));
    insert_opt(&mut map, "description", stage.description.as_ref().map(|d| json!(d)));
    map.insert(
        "JOBS".into(),
        Value::Array(stage.jobs.iter().map(job_document).collect()),
    );
    append_extras(&mut map, &stage.extra);
    Value::Object(map)
}

fn job_document(job: &Job) -> Value {
    let mut map = Map::new();
    map.insert("NAME".into(), json!(job.name));
    map.insert("MODE".into(), json!(job.mode.as_str()));
    insert_opt(&mut map, "description", job.description.as_ref().map(|d| json!(d)));
    insert_opt(&mut map, "Rounds", job.rounds.map(|v| json!(v)));
    insert_opt(&mut map, "work_time_in_seconds", job.work_time_in_seconds.map(|v| json!(v)));
    insert_opt(&mut map, "work_time_in_minutes", job.work_time_in_minutes.map(|v| json!(v)));
    insert_opt(&mut map, "rest_time_in_seconds", job.rest_time_in_seconds.map(|v| json!(v)));
    insert_opt(
        &mut map,
        "Rest_between_exercises_in_seconds",
        job.rest_between_exercises_in_seconds.map(|v| json!(v)),
    );
    insert_opt(
        &mut map,
        "Rest_between_rounds_in_seconds",
        job.rest_between_rounds_in_seconds.map(|v| json!(v)),
    );
    insert_opt(&mut map, "cadence", job.cadence.as_ref().map(|c| json!(c)));
    map.insert("Eccentric (NEG)".into(), json!(job.eccentric_neg));
    map.insert("isometric (HOLD)".into(), json!(job.isometric_hold));
    if !job.exercises.is_empty() {
        map.insert(
            "EXERCISES".into(),
            Value::Array(job.exercises.iter().map(exercise_document).collect()),
        );
    }
    append_extras(&mut map, &job.extra);
    Value::Object(map)
}

fn exercise_document(exercise: &Exercise) -> Value {
    let mut map = Map::new();
    map.insert("NAME".into(), json!(exercise.name));
    insert_opt(&mut map, "reps", exercise.reps.map(|v| json!(v)));
    insert_opt(
        &mut map,
        "work_time_in_seconds",
        exercise.work_time_in_seconds.map(|v| json!(v)),
    );
    insert_opt(&mut map, "weight", exercise.weight.map(|v| json!(v)));
    insert_opt(&mut map, "notes", exercise.notes.as_ref().map(|n| json!(n)));
    insert_opt(&mut map, "help", exercise.help.as_ref().map(|h| json!(h)));
    append_extras(&mut map, &exercise.extra);
    Value::Object(map)
}

fn insert_opt(map: &mut Map<String, Value>, key: &str, value: Option<Value>) {
    if let Some(v) = value {
        map.insert(key.to_string(), v);
    }
}

fn append_extras(map: &mut Map<String, Value>, extra: &Extras) {
    for (k, v) in extra {
        map.insert(k.clone(), v.clone());
    }
}
