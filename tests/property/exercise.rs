use proptest::prelude::*;
use serde_json::{Map, Value, json};
use workout_spec::ErrorKind;
use workout_spec::validate::validate_exercise;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    // Valid iff at least one of reps / work time is present, whatever its sign.
    #[test]
    fn reps_or_work_time(
        reps in prop::option::of(-1000i64..1000),
        work in prop::option::of(-3600i64..3600),
    ) {
        let mut node = Map::new();
        node.insert("NAME".into(), json!("Move"));
        if let Some(r) = reps {
            node.insert("reps".into(), json!(r));
        }
        if let Some(w) = work {
            node.insert("work_time_in_seconds".into(), json!(w));
        }
        let result = validate_exercise(&Value::Object(node));
        if reps.is_some() || work.is_some() {
            let ex = result.unwrap();
            prop_assert_eq!(ex.reps, reps);
            prop_assert_eq!(ex.work_time_in_seconds, work);
        } else {
            prop_assert_eq!(result.unwrap_err().kind, ErrorKind::ExerciseInvariantViolation);
        }
    }

    // Non-integer counts are rejected even when they look like integers.
    #[test]
    fn string_counts_rejected(reps in 0u32..1000) {
        let err = validate_exercise(&json!({"NAME": "Move", "reps": reps.to_string()})).unwrap_err();
        prop_assert_eq!(err.kind, ErrorKind::WrongType);
    }
}
