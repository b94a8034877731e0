use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// What went wrong, independent of where.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// A required field is absent.
    MissingField,
    /// A field is present but not of (or not coercible to) its expected type.
    WrongType,
    /// A strictly-capped field exceeds its maximum length.
    FieldTooLong,
    /// A required non-empty list is absent or empty.
    EmptyCollection,
    /// An exercise declares neither `reps` nor `work_time_in_seconds`.
    ExerciseInvariantViolation,
    /// A `MODE` value outside the synonym table.
    UnsupportedMode,
    /// A mode-specific rule failed.
    ModeInvariantViolation,
    /// `eccentric_neg` and `isometric_hold` are both true.
    MutuallyExclusiveFlags,
    /// The external schema engine reported a violation.
    SchemaConformance,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::MissingField => "missing_field",
            ErrorKind::WrongType => "wrong_type",
            ErrorKind::FieldTooLong => "field_too_long",
            ErrorKind::EmptyCollection => "empty_collection",
            ErrorKind::ExerciseInvariantViolation => "exercise_invariant_violation",
            ErrorKind::UnsupportedMode => "unsupported_mode",
            ErrorKind::ModeInvariantViolation => "mode_invariant_violation",
            ErrorKind::MutuallyExclusiveFlags => "mutually_exclusive_flags",
            ErrorKind::SchemaConformance => "schema_conformance",
        };
        f.write_str(s)
    }
}

/// Document level at which an error message was produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    Workout,
    Stage,
    Job,
    Exercise,
}

/// Produced by the validators when a node violates a rule.
///
/// Parent layers never swallow a child failure: they wrap it, keeping the
/// child's [`ErrorKind`] and prefixing positional context to the message.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    pub kind: ErrorKind,
    pub scope: Scope,
    /// `/`-joined pointer from the validated root; empty at the root itself.
    pub path: String,
    pub message: String,
    #[source]
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub cause: Option<Box<ValidationError>>,
}

impl ValidationError {
    pub fn new(
        kind: ErrorKind,
        scope: Scope,
        path: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        ValidationError {
            kind,
            scope,
            path: path.into(),
            message: message.into(),
            cause: None,
        }
    }

    /// Wrap this error with parent context.
    ///
    /// `segment` is the parent-relative location of the child (e.g. `JOBS/2`)
    /// and `prefix` the text placed before the child's message.
    pub fn wrap(self, scope: Scope, segment: &str, prefix: impl fmt::Display) -> Self {
        ValidationError {
            kind: self.kind,
            scope,
            path: join_path(segment, &self.path),
            message: format!("{}: {}", prefix, self.message),
            cause: Some(Box::new(self)),
        }
    }

    /// The innermost error in the wrapping chain.
    pub fn root_cause(&self) -> &ValidationError {
        let mut current = self;
        while let Some(inner) = &current.cause {
            current = inner;
        }
        current
    }
}

pub(crate) fn join_path(parent: &str, child: &str) -> String {
    match (parent.is_empty(), child.is_empty()) {
        (true, _) => child.to_string(),
        (false, true) => parent.to_string(),
        (false, false) => format!("{}/{}", parent, child),
    }
}

/// Error kind for parse failures.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseErrorKind {
    Syntax,
    TypeMismatch,
}

/// Produced by `parse` when the input text is not a usable YAML mapping.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let (Some(line), Some(col)) = (self.line, self.column) {
            write!(f, "{}:{}: {}", line, col, self.message)
        } else {
            write!(f, "{}", self.message)
        }
    }
}

impl std::error::Error for ParseError {}

/// A schema file could not be read, parsed or compiled.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("schema {file}: {message}")]
pub struct SchemaLoadError {
    pub file: String,
    pub message: String,
}

/// Serialization error.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct SerializeError {
    pub message: String,
}

/// Combined error type for the `load*` entry points.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("cannot read workout file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl LoadError {
    /// The validation failure, if this is one.
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            LoadError::Validation(e) => Some(e),
            _ => None,
        }
    }
}
