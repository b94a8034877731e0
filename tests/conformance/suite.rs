use std::path::PathBuf;
use workout_spec::{ErrorKind, load};

fn fixtures_dir() -> PathBuf {
    std::env::var("WORKOUT_SPEC_FIXTURES")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures"))
}

/// A single validation case from the suite.
#[derive(Debug, serde::Deserialize)]
struct TestCase {
    id: String,
    name: String,
    input: String,
    expected: Expected,
}

#[derive(Debug, serde::Deserialize)]
struct Expected {
    valid: bool,
    #[serde(default)]
    kind: Option<ErrorKind>,
    #[serde(default)]
    path: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

#[test]
fn validate_suite() {
    let suite_path = fixtures_dir().join("validate/suite.yaml");
    let content = std::fs::read_to_string(&suite_path).unwrap();
    let cases: Vec<TestCase> = serde_saphyr::from_str(&content).unwrap();
    assert!(!cases.is_empty(), "empty suite: {:?}", suite_path);

    let mut failures = Vec::new();
    for case in &cases {
        let label = format!("{} ({})", case.id, case.name);
        match (load(&case.input), case.expected.valid) {
            (Ok(_), true) => {}
            (Ok(_), false) => failures.push(format!("{}: expected failure, got Ok", label)),
            (Err(err), true) => failures.push(format!("{}: expected Ok, got {}", label, err)),
            (Err(err), false) => {
                let Some(err) = err.as_validation() else {
                    failures.push(format!("{}: not a validation error: {}", label, err));
                    continue;
                };
                if let Some(kind) = case.expected.kind
                    && kind != err.kind
                {
                    failures.push(format!("{}: kind {:?} != {:?}", label, err.kind, kind));
                }
                if let Some(path) = &case.expected.path
                    && *path != err.path
                {
                    failures.push(format!("{}: path {:?} != {:?}", label, err.path, path));
                }
                if let Some(message) = &case.expected.message
                    && *message != err.message
                {
                    failures.push(format!("{}: message {:?} != {:?}", label, err.message, message));
                }
            }
        }
    }

    assert!(
        failures.is_empty(),
        "{} of {} cases failed:\n{}",
        failures.len(),
        cases.len(),
        failures.join("\n")
    );
}
