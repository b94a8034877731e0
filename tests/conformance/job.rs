use super::common::{custom_job, expect_kind};
use serde_json::json;
use workout_spec::validate::validate_job;
use workout_spec::{ErrorKind, ModeId, Scope};

#[test]
fn mode_is_required() {
    let err = expect_kind(
        validate_job(&json!({"NAME": "J", "Rounds": 2})),
        ErrorKind::MissingField,
    );
    assert_eq!(err.path, "MODE");
    assert_eq!(err.message, "missing required field 'MODE'");
}

#[test]
fn name_checked_before_mode() {
    let err = expect_kind(
        validate_job(&json!({"MODE": "nonsense"})),
        ErrorKind::MissingField,
    );
    assert_eq!(err.path, "NAME");
}

#[test]
fn mode_must_be_a_string() {
    let err = expect_kind(
        validate_job(&json!({"NAME": "J", "MODE": 42})),
        ErrorKind::WrongType,
    );
    assert_eq!(err.path, "MODE");
}

#[test]
fn unsupported_mode_echoes_raw_value() {
    let err = expect_kind(
        validate_job(&json!({"NAME": "J", "MODE": "Zumba"})),
        ErrorKind::UnsupportedMode,
    );
    assert_eq!(err.message, "unsupported MODE 'Zumba'");
    assert_eq!(err.path, "MODE");
    assert_eq!(err.scope, Scope::Job);
}

#[test]
fn mode_is_resolved_case_insensitively() {
    let mut node = custom_job("J");
    node["MODE"] = json!("Custom");
    assert_eq!(validate_job(&node).unwrap().mode, ModeId::CustomSets);
}

#[test]
fn rounds_must_be_a_positive_integer() {
    let mut node = custom_job("J");
    node["Rounds"] = json!(0);
    let err = expect_kind(validate_job(&node), ErrorKind::WrongType);
    assert_eq!(err.path, "Rounds");

    node["Rounds"] = json!("3");
    expect_kind(validate_job(&node), ErrorKind::WrongType);
}

#[test]
fn common_fields_are_coerced() {
    let job = validate_job(&json!({
        "NAME": "Strength",
        "MODE": "custom_sets",
        "rounds": 4,
        "description": "Main lifts",
        "rest_time_in_seconds": 90,
        "rest_between_exercises_in_seconds": 30,
        "Rest_between_rounds_in_seconds": 120,
        "Cadence": "  3-1-1-0 ",
        "EXERCISES": [{"NAME": "Bench", "reps": 8, "weight": 60}]
    }))
    .unwrap();

    assert_eq!(job.rounds, Some(4));
    assert_eq!(job.description.as_deref(), Some("Main lifts"));
    assert_eq!(job.rest_time_in_seconds, Some(90));
    assert_eq!(job.rest_between_exercises_in_seconds, Some(30));
    assert_eq!(job.rest_between_rounds_in_seconds, Some(120));
    assert_eq!(job.cadence.as_deref(), Some("3-1-1-0"));
    assert!(!job.eccentric_neg);
    assert!(!job.isometric_hold);
    assert!(job.extra.is_empty());
}

#[test]
fn negative_rest_rejected() {
    let mut node = custom_job("J");
    node["rest_time_in_seconds"] = json!(-5);
    let err = expect_kind(validate_job(&node), ErrorKind::WrongType);
    assert_eq!(err.path, "rest_time_in_seconds");
}

#[test]
fn cadence_length_is_strict() {
    let mut node = custom_job("J");
    node["cadence"] = json!("1".repeat(21));
    let err = expect_kind(validate_job(&node), ErrorKind::FieldTooLong);
    assert_eq!(err.path, "cadence");

    node["cadence"] = json!(3011);
    expect_kind(validate_job(&node), ErrorKind::WrongType);
}

#[test]
fn flags_accept_truthy_strings() {
    for truthy in [json!(true), json!("yes"), json!("YES"), json!("1"), json!("True")] {
        let mut node = custom_job("J");
        node["Eccentric (NEG)"] = truthy.clone();
        let job = validate_job(&node).unwrap();
        assert!(job.eccentric_neg, "{} should be truthy", truthy);
    }
    for falsy in [json!(false), json!("no"), json!("0"), json!(1), json!(null), json!("")] {
        let mut node = custom_job("J");
        node["isometric (HOLD)"] = falsy.clone();
        let job = validate_job(&node).unwrap();
        assert!(!job.isometric_hold, "{} should be falsy", falsy);
    }
}

#[test]
fn flag_aliases() {
    let mut node = custom_job("J");
    node["isometric_hold"] = json!(true);
    let job = validate_job(&node).unwrap();
    assert!(job.isometric_hold);

    node["eccentric_neg"] = json!("yes");
    let err = expect_kind(validate_job(&node), ErrorKind::MutuallyExclusiveFlags);
    assert_eq!(
        err.message,
        "Eccentric (NEG) and Isometric (HOLD) cannot both be true"
    );
}

#[test]
fn invalid_exercise_is_wrapped_with_index() {
    let node = json!({
        "NAME": "J",
        "MODE": "custom_sets",
        "Rounds": 2,
        "EXERCISES": [
            {"NAME": "Good", "reps": 5},
            {"NAME": "Bad", "reps": "x"}
        ]
    });
    let err = expect_kind(validate_job(&node), ErrorKind::WrongType);
    assert_eq!(err.scope, Scope::Job);
    assert_eq!(err.path, "EXERCISES/1/reps");
    assert_eq!(
        err.message,
        "invalid exercise at index 1: field 'reps' must be an integer, got string"
    );

    let root = err.root_cause();
    assert_eq!(root.scope, Scope::Exercise);
    assert_eq!(root.path, "reps");
}

#[test]
fn exercises_must_be_a_list() {
    let mut node = custom_job("J");
    node["EXERCISES"] = json!({"NAME": "Squat"});
    let err = expect_kind(validate_job(&node), ErrorKind::WrongType);
    assert_eq!(err.path, "EXERCISES");
}

#[test]
fn exercises_key_is_case_tolerant() {
    let job = validate_job(&json!({
        "NAME": "J",
        "MODE": "custom_sets",
        "Rounds": 1,
        "Exercises": [{"NAME": "Squat", "reps": 5}]
    }))
    .unwrap();
    assert_eq!(job.exercises.len(), 1);
}

#[test]
fn first_spelling_wins() {
    let job = validate_job(&json!({
        "NAME": "J",
        "MODE": "custom_sets",
        "Rounds": 2,
        "rounds": 9,
        "EXERCISES": [{"NAME": "Squat", "reps": 5}]
    }))
    .unwrap();
    assert_eq!(job.rounds, Some(2));
    assert!(job.extra.is_empty());
}

#[test]
fn extras_and_description_policy() {
    let mut node = custom_job("J");
    node["description"] = json!("d".repeat(320));
    node["equipment"] = json!("barbell");
    let job = validate_job(&node).unwrap();
    assert_eq!(job.description.as_deref().map(str::len), Some(300));
    assert_eq!(job.extra["equipment"], json!("barbell"));
}

#[test]
fn rule_is_reachable_from_job() {
    let job = validate_job(&custom_job("J")).unwrap();
    assert_eq!(job.rule().label, "CUSTOM");
}
