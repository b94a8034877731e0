use std::io::Write;

use workout_spec::parse::parse;
use workout_spec::{ErrorKind, LoadError, ParseErrorKind, load, load_file};

const MINIMAL: &str = r#"
NAME: Monday
STAGES:
  - NAME: Main
    JOBS:
      - NAME: Finisher
        MODE: amrap
        work_time_in_minutes: 10
"#;

#[test]
fn parses_mapping_root() {
    let value = parse(MINIMAL).unwrap();
    assert_eq!(value["NAME"], "Monday");
    assert_eq!(value["STAGES"][0]["JOBS"][0]["work_time_in_minutes"], 10);
}

#[test]
fn empty_input() {
    let err = parse("  \n ").unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::Syntax);
    assert_eq!(err.message, "empty input");
}

#[test]
fn non_mapping_root() {
    let err = parse("- one\n- two\n").unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::TypeMismatch);
}

#[test]
fn multiple_documents_rejected() {
    let err = parse("---\nNAME: a\n---\nNAME: b\n").unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::Syntax);
    assert_eq!(err.line, Some(3));
    assert_eq!(err.to_string(), "3:1: multi-document YAML is not supported");
}

#[test]
fn invalid_yaml() {
    assert!(parse("NAME: [unclosed\n").is_err());
}

#[test]
fn load_composes_parse_and_validate() {
    let workout = load(MINIMAL).unwrap();
    assert_eq!(workout.stages[0].jobs[0].work_time_in_minutes, Some(10));

    assert!(matches!(load(""), Err(LoadError::Parse(_))));

    let err = load("NAME: W\nSTAGES: []\n").unwrap_err();
    let validation = err.as_validation().expect("validation failure");
    assert_eq!(validation.kind, ErrorKind::EmptyCollection);
    assert!(err.to_string().starts_with("Validation error: "));
}

#[test]
fn load_file_reads_from_disk() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(MINIMAL.as_bytes()).unwrap();
    let workout = load_file(file.path()).unwrap();
    assert_eq!(workout.name, "Monday");
}

#[test]
fn load_file_missing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.yaml");
    let err = load_file(&path).unwrap_err();
    match err {
        LoadError::Io { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("expected Io error, got {:?}", other),
    }
}

#[test]
fn load_failures_are_io_parse_or_validation() {
    let dir = tempfile::tempdir().unwrap();
    let failures = [
        load_file(dir.path().join("absent.yaml")).unwrap_err(),
        load("").unwrap_err(),
        load("NAME: Monday\nSTAGES: []\n").unwrap_err(),
    ];
    let labels: Vec<&str> = failures
        .iter()
        .map(|err| match err {
            LoadError::Io { .. } => "io",
            LoadError::Parse(_) => "parse",
            LoadError::Validation(_) => "validation",
        })
        .collect();
    assert_eq!(labels, ["io", "parse", "validation"]);
}
