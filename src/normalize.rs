//! Key canonicalization and extra-field collection.
//!
//! Each node is scanned once: recognized keys (canonical name or alias,
//! ASCII case ignored) are bound to their canonical name; everything else is
//! kept, in document order, as an extra field. Validators then read fields by
//! canonical name only. The input node is never modified.

use serde_json::{Map, Value};

use crate::config::Limits;
use crate::error::{ErrorKind, Scope, ValidationError};
use crate::primitives::truncate_soft;
use crate::types::Extras;

/// A recognized key of one node kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldSpec {
    pub canonical: &'static str,
    pub aliases: &'static [&'static str],
}

impl FieldSpec {
    const fn new(canonical: &'static str) -> Self {
        FieldSpec {
            canonical,
            aliases: &[],
        }
    }

    const fn with_aliases(canonical: &'static str, aliases: &'static [&'static str]) -> Self {
        FieldSpec { canonical, aliases }
    }

    fn matches(&self, key: &str) -> bool {
        self.canonical.eq_ignore_ascii_case(key)
            || self.aliases.iter().any(|a| a.eq_ignore_ascii_case(key))
    }
}

pub static EXERCISE_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("NAME"),
    FieldSpec::new("reps"),
    FieldSpec::new("work_time_in_seconds"),
    FieldSpec::new("weight"),
    FieldSpec::with_aliases("notes", &["note", "description"]),
    FieldSpec::new("help"),
];

pub static JOB_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("NAME"),
    FieldSpec::new("MODE"),
    FieldSpec::new("description"),
    FieldSpec::new("Rounds"),
    FieldSpec::new("work_time_in_seconds"),
    FieldSpec::new("work_time_in_minutes"),
    FieldSpec::new("rest_time_in_seconds"),
    FieldSpec::new("Rest_between_exercises_in_seconds"),
    FieldSpec::new("Rest_between_rounds_in_seconds"),
    FieldSpec::new("cadence"),
    FieldSpec::with_aliases("Eccentric (NEG)", &["eccentric_neg"]),
    FieldSpec::with_aliases("isometric (HOLD)", &["isometric_hold"]),
    FieldSpec::new("EXERCISES"),
];

pub static STAGE_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("NAME"),
    FieldSpec::new("description"),
    FieldSpec::new("JOBS"),
];

pub static WORKOUT_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("NAME"),
    FieldSpec::new("description"),
    FieldSpec::new("STAGES"),
];

/// The fields of one node, split into recognized and extra.
#[derive(Debug, Default)]
pub struct NodeFields<'a> {
    known: Vec<(&'static str, &'a Value)>,
    extra: Vec<(&'a str, &'a Value)>,
}

impl<'a> NodeFields<'a> {
    /// Value bound to a canonical field name.
    pub fn get(&self, canonical: &str) -> Option<&'a Value> {
        self.known
            .iter()
            .find(|(name, _)| *name == canonical)
            .map(|(_, v)| *v)
    }

    /// Unrecognized keys, in document order.
    pub fn extra(&self) -> &[(&'a str, &'a Value)] {
        &self.extra
    }
}

/// Bind the keys of `node` to the canonical names in `fields`.
///
/// When several spellings of the same field are present, the first one in
/// document order wins and the rest are ignored.
pub fn canonicalize<'a>(node: &'a Map<String, Value>, fields: &'static [FieldSpec]) -> NodeFields<'a> {
    let mut out = NodeFields::default();
    for (key, value) in node {
        match fields.iter().find(|f| f.matches(key)) {
            Some(spec) => {
                if out.get(spec.canonical).is_some() {
                    tracing::debug!(key = %key, canonical = spec.canonical, "ignoring duplicate spelling");
                    continue;
                }
                out.known.push((spec.canonical, value));
            }
            None => out.extra.push((key.as_str(), value)),
        }
    }
    out
}

/// Apply the strict-key / soft-value policy to extra fields.
///
/// Only string values are truncated; other values pass through unchanged.
pub fn collect_extras(
    fields: &NodeFields<'_>,
    limits: &Limits,
    scope: Scope,
) -> Result<Extras, ValidationError> {
    let mut extras = Extras::new();
    for (key, value) in fields.extra() {
        if key.chars().count() > limits.extra_key {
            return Err(ValidationError::new(
                ErrorKind::FieldTooLong,
                scope,
                *key,
                format!(
                    "extra field name '{}' exceeds max length {}",
                    key, limits.extra_key
                ),
            ));
        }
        let value = match value {
            Value::String(s) => Value::String(truncate_soft(s, limits.extra_value)),
            other => (*other).clone(),
        };
        extras.insert((*key).to_string(), value);
    }
    Ok(extras)
}

/// A copy of a workout document with every recognized key rewritten to its
/// canonical spelling, at every level. Extra fields, `MODE` values and
/// non-mapping nodes are copied unchanged.
pub fn canonical_keys(document: &Value) -> Value {
    rekey(document, WORKOUT_FIELDS)
}

fn rekey(node: &Value, fields: &'static [FieldSpec]) -> Value {
    let Some(map) = node.as_object() else {
        return node.clone();
    };
    let bound = canonicalize(map, fields);
    let mut out = Map::new();
    for (canonical, value) in &bound.known {
        let value = match child_fields(canonical) {
            Some(child) => match value {
                Value::Array(items) => Value::Array(items.iter().map(|v| rekey(v, child)).collect()),
                other => (*other).clone(),
            },
            None => (*value).clone(),
        };
        out.insert((*canonical).to_string(), value);
    }
    for (key, value) in bound.extra() {
        out.insert((*key).to_string(), (*value).clone());
    }
    Value::Object(out)
}

fn child_fields(canonical: &str) -> Option<&'static [FieldSpec]> {
    match canonical {
        "STAGES" => Some(STAGE_FIELDS),
        "JOBS" => Some(JOB_FIELDS),
        "EXERCISES" => Some(EXERCISE_FIELDS),
        _ => None,
    }
}
