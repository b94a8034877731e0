//! Scalar coercion helpers.
//!
//! Pure functions shared by both pipelines. Each takes the (possibly absent)
//! value bound to a field, the canonical field name used in messages, and the
//! [`Scope`] of the node being validated. Errors carry the field name as their
//! node-relative path. A YAML `null` counts as absent everywhere.

use crate::error::{ErrorKind, Scope, ValidationError};
use serde_json::Value;

/// Case-insensitive truthy strings accepted by [`optional_bool`].
pub const TRUTHY: &[&str] = &["true", "yes", "1"];

fn present(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !v.is_null())
}

/// Require a string with non-whitespace content; returns it trimmed.
///
/// Absent, `null` and blank strings are all reported as [`ErrorKind::MissingField`].
pub fn require_non_empty_string(
    value: Option<&Value>,
    field: &str,
    scope: Scope,
) -> Result<String, ValidationError> {
    match present(value) {
        None => Err(missing(field, scope)),
        Some(Value::String(s)) if s.trim().is_empty() => Err(missing(field, scope)),
        Some(Value::String(s)) => Ok(s.trim().to_string()),
        Some(other) => Err(ValidationError::new(
            ErrorKind::WrongType,
            scope,
            field,
            format!(
                "field '{}' must be a non-empty string, got {}",
                field,
                type_name(other)
            ),
        )),
    }
}

/// Optional string, returned verbatim.
pub fn optional_string(
    value: Option<&Value>,
    field: &str,
    scope: Scope,
) -> Result<Option<String>, ValidationError> {
    match present(value) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(ValidationError::new(
            ErrorKind::WrongType,
            scope,
            field,
            format!("field '{}' must be a string, got {}", field, type_name(other)),
        )),
    }
}

/// Optional integer. Integer-looking strings (`"10"`) and floats are rejected.
pub fn optional_int(
    value: Option<&Value>,
    field: &str,
    scope: Scope,
) -> Result<Option<i64>, ValidationError> {
    match present(value) {
        None => Ok(None),
        Some(Value::Number(n)) if n.is_i64() || n.is_u64() => match n.as_i64() {
            Some(i) => Ok(Some(i)),
            None => Err(not_an_integer(field, scope, "out of range")),
        },
        Some(other) => Err(not_an_integer(field, scope, type_name(other))),
    }
}

/// Optional integer that must be `>= 0`.
pub fn optional_non_negative(
    value: Option<&Value>,
    field: &str,
    scope: Scope,
) -> Result<Option<u64>, ValidationError> {
    match optional_int(value, field, scope)? {
        None => Ok(None),
        Some(i) if i >= 0 => Ok(Some(i as u64)),
        Some(i) => Err(ValidationError::new(
            ErrorKind::WrongType,
            scope,
            field,
            format!("field '{}' must be a non-negative integer, got {}", field, i),
        )),
    }
}

/// Optional integer that must be `> 0`.
pub fn optional_positive(
    value: Option<&Value>,
    field: &str,
    scope: Scope,
) -> Result<Option<u64>, ValidationError> {
    match optional_int(value, field, scope)? {
        None => Ok(None),
        Some(i) if i > 0 => Ok(Some(i as u64)),
        Some(i) => Err(ValidationError::new(
            ErrorKind::WrongType,
            scope,
            field,
            format!("field '{}' must be a positive integer, got {}", field, i),
        )),
    }
}

/// Optional non-negative number (integer or float).
pub fn optional_number(
    value: Option<&Value>,
    field: &str,
    scope: Scope,
) -> Result<Option<f64>, ValidationError> {
    match present(value) {
        None => Ok(None),
        Some(Value::Number(n)) => match n.as_f64() {
            Some(f) if f >= 0.0 => Ok(Some(f)),
            _ => Err(ValidationError::new(
                ErrorKind::WrongType,
                scope,
                field,
                format!("field '{}' must be a non-negative number, got {}", field, n),
            )),
        },
        Some(other) => Err(ValidationError::new(
            ErrorKind::WrongType,
            scope,
            field,
            format!("field '{}' must be a number, got {}", field, type_name(other)),
        )),
    }
}

/// Loose boolean: a native bool, or a string matched case-insensitively
/// against [`TRUTHY`]. Anything else is `false`. Never fails.
pub fn optional_bool(value: Option<&Value>) -> bool {
    match present(value) {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => {
            let s = s.trim();
            TRUTHY.iter().any(|t| t.eq_ignore_ascii_case(s))
        }
        _ => false,
    }
}

/// The first `max_len` characters of `value`.
pub fn truncate_soft(value: &str, max_len: usize) -> String {
    match value.char_indices().nth(max_len) {
        Some((byte_idx, _)) => {
            tracing::trace!(max_len, "soft-truncating string");
            value[..byte_idx].to_string()
        }
        None => value.to_string(),
    }
}

/// Reject `value` if it is longer than `max_len` characters.
pub fn enforce_strict_len<'a>(
    value: &'a str,
    max_len: usize,
    field: &str,
    scope: Scope,
) -> Result<&'a str, ValidationError> {
    if value.chars().count() > max_len {
        return Err(ValidationError::new(
            ErrorKind::FieldTooLong,
            scope,
            field,
            format!("field '{}' exceeds max length {} characters", field, max_len),
        ));
    }
    Ok(value)
}

/// Require a list; absent, `null` and empty lists are [`ErrorKind::EmptyCollection`].
pub fn require_non_empty_list<'a>(
    value: Option<&'a Value>,
    field: &str,
    scope: Scope,
) -> Result<&'a [Value], ValidationError> {
    let items = optional_list(value, field, scope)?.ok_or_else(|| {
        ValidationError::new(
            ErrorKind::EmptyCollection,
            scope,
            field,
            format!("missing required field '{}'", field),
        )
    })?;
    if items.is_empty() {
        return Err(empty_list(field, scope));
    }
    Ok(items)
}

/// Optional list; a non-list value is [`ErrorKind::WrongType`].
pub fn optional_list<'a>(
    value: Option<&'a Value>,
    field: &str,
    scope: Scope,
) -> Result<Option<&'a [Value]>, ValidationError> {
    match present(value) {
        None => Ok(None),
        Some(Value::Array(items)) => Ok(Some(items.as_slice())),
        Some(other) => Err(ValidationError::new(
            ErrorKind::WrongType,
            scope,
            field,
            format!("field '{}' must be a list, got {}", field, type_name(other)),
        )),
    }
}

pub(crate) fn empty_list(field: &str, scope: Scope) -> ValidationError {
    ValidationError::new(
        ErrorKind::EmptyCollection,
        scope,
        field,
        format!("field '{}' must contain at least one item", field),
    )
}

pub(crate) fn missing(field: &str, scope: Scope) -> ValidationError {
    ValidationError::new(
        ErrorKind::MissingField,
        scope,
        field,
        format!("missing required field '{}'", field),
    )
}

fn not_an_integer(field: &str, scope: Scope, got: &str) -> ValidationError {
    ValidationError::new(
        ErrorKind::WrongType,
        scope,
        field,
        format!("field '{}' must be an integer, got {}", field, got),
    )
}

/// Short YAML-ish type name for messages.
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "mapping",
    }
}
