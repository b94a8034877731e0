use super::common::{custom_job, expect_kind};
use serde_json::json;
use workout_spec::config::{MAX_DESCRIPTION_LEN, MAX_NAME_LEN};
use workout_spec::{ErrorKind, InlineValidator, Limits, Pipeline};

#[test]
fn defaults() {
    let limits = Limits::default();
    assert_eq!(limits.name, MAX_NAME_LEN);
    assert_eq!(limits.description, MAX_DESCRIPTION_LEN);
    assert_eq!(
        (limits.cadence, limits.notes, limits.extra_key, limits.extra_value),
        (20, 200, 30, 100)
    );
}

#[test]
fn partial_yaml_overrides() {
    let limits = Limits::from_yaml("name: 60\nnotes: 50\n").unwrap();
    assert_eq!(limits.name, 60);
    assert_eq!(limits.notes, 50);
    assert_eq!(limits.cadence, 20);

    assert_eq!(Limits::from_yaml("").unwrap(), Limits::default());
    assert!(Limits::from_yaml("name: lots\n").is_err());
}

#[test]
fn custom_limits_reach_every_layer() {
    let validator = InlineValidator::with_limits(Limits {
        name: 5,
        notes: 3,
        ..Limits::default()
    });
    assert_eq!(validator.limits().name, 5);

    let err = expect_kind(
        validator.validate(&json!({
            "NAME": "W",
            "STAGES": [{"NAME": "S", "JOBS": [custom_job("Squats")]}]
        })),
        ErrorKind::FieldTooLong,
    );
    assert_eq!(err.path, "STAGES/0/JOBS/0/NAME");
    assert!(err.message.ends_with("field 'NAME' exceeds max length 5 characters"));

    let exercise = validator
        .validate_exercise(&json!({"NAME": "Row", "reps": 5, "notes": "slowly"}))
        .unwrap();
    assert_eq!(exercise.notes.as_deref(), Some("slo"));
}
