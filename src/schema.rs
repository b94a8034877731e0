//! Schema-backed validation pipeline.
//!
//! Documents are checked against a top-level Draft-7 schema and each job
//! against the schema of its resolved mode; the earliest failure in document
//! order is reported. Schemas are written against canonical key spellings;
//! checking runs on a key-canonicalized copy so a document is never rejected
//! for a casing the inline validator accepts.
//! Once the schemas pass, the typed model is built by [`InlineValidator`],
//! which makes acceptance identical across both pipelines.

use std::fmt;
use std::path::Path;

use jsonschema::Validator;
use serde_json::Value;

use crate::config::Limits;
use crate::enums::ModeId;
use crate::error::{ErrorKind, SchemaLoadError, Scope, ValidationError};
use crate::normalize::canonical_keys;
use crate::registry::{resolve, rule_for};
use crate::types::Workout;
use crate::validate::{InlineValidator, Pipeline};

/// File name of the top-level schema under a schema root.
pub const WORKOUT_SCHEMA_FILE: &str = "workout.schema.json";

const BUILTIN: [(&str, &str); 7] = [
    (WORKOUT_SCHEMA_FILE, include_str!("../schemas/workout.schema.json")),
    ("job.custom_sets.schema.json", include_str!("../schemas/job.custom_sets.schema.json")),
    ("job.tabata.schema.json", include_str!("../schemas/job.tabata.schema.json")),
    ("job.emom.schema.json", include_str!("../schemas/job.emom.schema.json")),
    ("job.amrap.schema.json", include_str!("../schemas/job.amrap.schema.json")),
    ("job.for_time.schema.json", include_str!("../schemas/job.for_time.schema.json")),
    ("job.edt.schema.json", include_str!("../schemas/job.edt.schema.json")),
];

struct CompiledSchema {
    file: &'static str,
    validator: Validator,
}

/// The top-level schema plus one compiled schema per mode.
pub struct SchemaSet {
    workout: CompiledSchema,
    /// Indexed by [`ModeId::index`].
    jobs: Vec<CompiledSchema>,
}

impl fmt::Debug for SchemaSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaSet")
            .field("workout", &self.workout.file)
            .field("jobs", &self.jobs.iter().map(|s| s.file).collect::<Vec<_>>())
            .finish()
    }
}

impl SchemaSet {
    /// The schemas shipped with the crate.
    pub fn builtin() -> Result<SchemaSet, SchemaLoadError> {
        Self::assemble(|file| {
            BUILTIN
                .iter()
                .find(|(name, _)| *name == file)
                .map(|(_, text)| (*text).to_string())
                .ok_or_else(|| SchemaLoadError {
                    file: file.to_string(),
                    message: "no built-in schema".to_string(),
                })
        })
    }

    /// Load every schema from `dir`, using the fixed file name of each mode.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<SchemaSet, SchemaLoadError> {
        let dir = dir.as_ref();
        Self::assemble(|file| {
            std::fs::read_to_string(dir.join(file)).map_err(|e| SchemaLoadError {
                file: file.to_string(),
                message: e.to_string(),
            })
        })
    }

    fn assemble(
        mut read: impl FnMut(&'static str) -> Result<String, SchemaLoadError>,
    ) -> Result<SchemaSet, SchemaLoadError> {
        let mut compile = |file: &'static str| -> Result<CompiledSchema, SchemaLoadError> {
            let text = read(file)?;
            let schema: Value = serde_json::from_str(&text).map_err(|e| SchemaLoadError {
                file: file.to_string(),
                message: format!("invalid JSON: {}", e),
            })?;
            let validator = jsonschema::validator_for(&schema).map_err(|e| SchemaLoadError {
                file: file.to_string(),
                message: e.to_string(),
            })?;
            tracing::debug!(file, "compiled schema");
            Ok(CompiledSchema { file, validator })
        };

        let workout = compile(WORKOUT_SCHEMA_FILE)?;
        let jobs = ModeId::ALL
            .iter()
            .map(|mode| compile(rule_for(*mode).schema_file))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(SchemaSet { workout, jobs })
    }

    fn job(&self, mode: ModeId) -> &CompiledSchema {
        &self.jobs[mode.index()]
    }
}

/// Schema-first pipeline. See the module docs.
#[derive(Debug)]
pub struct SchemaValidator {
    schemas: SchemaSet,
    engine: InlineValidator,
}

impl SchemaValidator {
    pub fn new(schemas: SchemaSet, limits: Limits) -> Self {
        SchemaValidator {
            schemas,
            engine: InlineValidator::with_limits(limits),
        }
    }

    /// Built-in schemas with default limits.
    pub fn builtin() -> Result<Self, SchemaLoadError> {
        Ok(Self::new(SchemaSet::builtin()?, Limits::default()))
    }

    pub fn schemas(&self) -> &SchemaSet {
        &self.schemas
    }

    /// Run the schema checks only.
    ///
    /// Reports the violation earliest in document order, with the schema file
    /// name and the `/`-joined path of the offending node. A job failure in
    /// an early stage wins over a structural fault further down.
    pub fn check(&self, document: &Value) -> Result<(), ValidationError> {
        let canonical = canonical_keys(document);
        let top = first_violation(&self.schemas.workout, &canonical).map(|(path, message)| {
            conformance(
                Scope::Workout,
                path.clone(),
                format!("{}: at {}: {}", self.schemas.workout.file, display_path(&path), message),
            )
        });

        let job = self.first_job_violation(&canonical);
        match (top, job) {
            (Some(top), Some(job)) if path_order(&job.path) < path_order(&top.path) => Err(job),
            (Some(err), _) | (None, Some(err)) => Err(err),
            (None, None) => Ok(()),
        }
    }

    /// The first failing job in document order.
    fn first_job_violation(&self, canonical: &Value) -> Option<ValidationError> {
        let stages = canonical
            .get("STAGES")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();
        for (s, stage) in stages.iter().enumerate() {
            let jobs = stage
                .get("JOBS")
                .and_then(Value::as_array)
                .map(Vec::as_slice)
                .unwrap_or_default();
            for (j, job) in jobs.iter().enumerate() {
                if let Err(err) = self.check_job(s, j, job) {
                    return Some(err);
                }
            }
        }
        None
    }

    fn check_job(&self, s: usize, j: usize, job: &Value) -> Result<(), ValidationError> {
        let base = format!("STAGES/{}/JOBS/{}", s, j);
        let Some(raw) = job.get("MODE").and_then(Value::as_str) else {
            return Ok(());
        };
        let mode = resolve(raw)
            .map_err(|err| err.wrap(Scope::Job, &base, format_args!("stage {}, job {}", s, j)))?;
        let schema = self.schemas.job(mode);
        tracing::trace!(stage = s, job = j, file = schema.file, "checking job schema");

        if let Some((path, message)) = first_violation(schema, job) {
            let full = crate::error::join_path(&base, &path);
            return Err(conformance(
                Scope::Job,
                full.clone(),
                format!(
                    "stage {}, job {}, mode='{}': {}: at {}: {}",
                    s,
                    j,
                    raw,
                    schema.file,
                    display_path(&full),
                    message
                ),
            ));
        }
        Ok(())
    }
}

impl Pipeline for SchemaValidator {
    fn validate(&self, document: &Value) -> Result<Workout, ValidationError> {
        self.check(document)?;
        self.engine.validate_workout(document)
    }
}

/// The violation with the smallest instance path, if any.
fn first_violation(schema: &CompiledSchema, instance: &Value) -> Option<(String, String)> {
    schema
        .validator
        .iter_errors(instance)
        .map(|e| {
            let pointer = e.instance_path.to_string();
            (pointer.trim_start_matches('/').to_string(), e.to_string())
        })
        .min_by(|(a, _), (b, _)| path_order(a).cmp(&path_order(b)))
}

#[derive(PartialEq, Eq, PartialOrd, Ord)]
enum Segment<'a> {
    Index(usize),
    Key(&'a str),
}

fn path_order(path: &str) -> Vec<Segment<'_>> {
    path.split('/')
        .filter(|s| !s.is_empty())
        .map(|s| s.parse().map(Segment::Index).unwrap_or(Segment::Key(s)))
        .collect()
}

fn display_path(path: &str) -> &str {
    if path.is_empty() { "<root>" } else { path }
}

fn conformance(scope: Scope, path: String, message: String) -> ValidationError {
    ValidationError::new(ErrorKind::SchemaConformance, scope, path, message)
}
