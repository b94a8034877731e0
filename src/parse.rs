use crate::error::{ParseError, ParseErrorKind};
use serde_json::Value;

/// Parse YAML text into an unvalidated document tree.
///
/// Performs YAML deserialization only: the result is a generic mapping /
/// sequence / scalar tree ready for either validation pipeline.
pub fn parse(input: &str) -> Result<Value, ParseError> {
    if input.trim().is_empty() {
        return Err(ParseError {
            kind: ParseErrorKind::Syntax,
            message: "empty input".to_string(),
            line: None,
            column: None,
        });
    }

    check_multi_document(input)?;

    let value: Value = serde_saphyr::from_str(input).map_err(|e| ParseError {
        kind: classify_saphyr_error(&e.to_string()),
        message: e.to_string(),
        line: None,
        column: None,
    })?;

    if !value.is_object() {
        return Err(ParseError {
            kind: ParseErrorKind::TypeMismatch,
            message: "workout document root must be a YAML mapping".to_string(),
            line: None,
            column: None,
        });
    }

    Ok(value)
}

/// Reject more than one YAML document in a single input.
/// Only `---` at column 0 counts, so block scalars are not misread.
fn check_multi_document(input: &str) -> Result<(), ParseError> {
    let mut doc_count = 0;
    for (line_num, line) in input.lines().enumerate() {
        if line.starts_with("---") && line[3..].trim().is_empty() {
            doc_count += 1;
            if doc_count > 1 {
                return Err(ParseError {
                    kind: ParseErrorKind::Syntax,
                    message: "multi-document YAML is not supported".to_string(),
                    line: Some(line_num + 1),
                    column: Some(1),
                });
            }
        }
    }
    Ok(())
}

fn classify_saphyr_error(msg: &str) -> ParseErrorKind {
    let lower = msg.to_lowercase();
    if lower.contains("invalid type") || lower.contains("expected") {
        ParseErrorKind::TypeMismatch
    } else {
        ParseErrorKind::Syntax
    }
}
