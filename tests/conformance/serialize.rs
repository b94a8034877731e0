use super::common::yaml;
use serde_json::json;
use workout_spec::serialize::{to_document, to_yaml};
use workout_spec::{load, validate};

const SOURCE: &str = r#"
name: Monday
description: Full body
stages:
  - name: Main
    jobs:
      - name: Intervals
        mode: tabata
        cadence: " 2-0-2 "
        eccentric_neg: "yes"
        exercises:
          - name: Burpees
            reps: 10
            weight: 12.5
            note: chest to floor
            video: https://example.com/burpee
      - name: Density
        mode: EDT
        Rounds: 3
        work_time_in_minutes: 15
        exercises:
          - name: Chin-ups
            reps: 5
    focus: conditioning
"#;

#[test]
fn document_uses_canonical_keys_and_materialized_defaults() {
    let workout = validate(&yaml(SOURCE)).unwrap();
    let doc = to_document(&workout);

    let job = &doc["STAGES"][0]["JOBS"][0];
    assert_eq!(job["MODE"], "TABATA");
    assert_eq!(job["Rounds"], 8);
    assert_eq!(job["work_time_in_seconds"], 20);
    assert_eq!(job["rest_time_in_seconds"], 10);
    assert_eq!(job["cadence"], "2-0-2");
    assert_eq!(job["Eccentric (NEG)"], true);
    assert_eq!(job["isometric (HOLD)"], false);
    assert_eq!(job["EXERCISES"][0]["notes"], "chest to floor");

    let edt = &doc["STAGES"][0]["JOBS"][1];
    assert!(edt.get("Rounds").is_none());
}

#[test]
fn extras_follow_recognized_keys() {
    let workout = validate(&yaml(SOURCE)).unwrap();
    let doc = to_document(&workout);

    let exercise = doc["STAGES"][0]["JOBS"][0]["EXERCISES"][0].as_object().unwrap();
    let keys: Vec<&str> = exercise.keys().map(String::as_str).collect();
    assert_eq!(keys, ["NAME", "reps", "weight", "notes", "video"]);

    let stage = doc["STAGES"][0].as_object().unwrap();
    assert_eq!(stage.keys().last().map(String::as_str), Some("focus"));
}

#[test]
fn revalidating_the_document_is_idempotent() {
    let first = validate(&yaml(SOURCE)).unwrap();
    let second = validate(&to_document(&first)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn yaml_round_trip() {
    let first = load(SOURCE).unwrap();
    let text = to_yaml(&first).unwrap();
    let second = load(&text).unwrap();
    assert_eq!(first, second);
}

#[test]
fn model_serde_shape() {
    let workout = load(SOURCE).unwrap();
    let value = serde_json::to_value(&workout.stages[0].jobs[0]).unwrap();
    assert_eq!(value["mode"], json!("TABATA"));
    assert_eq!(value["rounds"], json!(8));
}
