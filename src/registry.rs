//! The mode registry: every supported mode's [`ModeRule`] as a compile-time
//! constant, plus synonym resolution of raw `MODE` strings.
//!
//! Adding a mode means adding a [`ModeId`] variant, one rule constant below and
//! one schema file; the traversal code does not change.

use crate::enums::ModeId;
use crate::error::{ErrorKind, Scope, ValidationError};
use crate::rules::{Invariant, JobField, ModeDefaults, ModeRule, RoundsPolicy};

pub static CUSTOM_SETS: ModeRule = ModeRule {
    id: ModeId::CustomSets,
    label: "CUSTOM",
    synonyms: &["custom_sets", "custom"],
    schema_file: "job.custom_sets.schema.json",
    description: "Custom sets: chained blocks of exercises (supersets, giant sets) repeated for \
                  the declared rounds, with optional cadence, contraction and rest control.",
    required: &[JobField::Rounds, JobField::Exercises],
    defaults: ModeDefaults::NONE,
    rounds: RoundsPolicy::Keep,
    min_exercises: 1,
    invariants: &[],
};

pub static TABATA: ModeRule = ModeRule {
    id: ModeId::Tabata,
    label: "TABATA",
    synonyms: &["tabata"],
    schema_file: "job.tabata.schema.json",
    description: "Tabata: short high-intensity intervals, classically 20s on / 10s off for \
                  several rounds.",
    required: &[JobField::Exercises],
    defaults: ModeDefaults {
        rounds: Some(8),
        work_time_in_seconds: Some(20),
        rest_time_in_seconds: Some(10),
    },
    rounds: RoundsPolicy::Keep,
    min_exercises: 1,
    invariants: &[Invariant::PositiveReps],
};

pub static EMOM: ModeRule = ModeRule {
    id: ModeId::Emom,
    label: "EMOM",
    synonyms: &["emom"],
    schema_file: "job.emom.schema.json",
    description: "EMOM: every minute on the minute. Start the work at the top of each minute \
                  and rest for the remainder.",
    required: &[JobField::Rounds],
    defaults: ModeDefaults {
        rounds: None,
        work_time_in_seconds: Some(60),
        rest_time_in_seconds: None,
    },
    rounds: RoundsPolicy::Keep,
    min_exercises: 0,
    invariants: &[],
};

pub static AMRAP: ModeRule = ModeRule {
    id: ModeId::Amrap,
    label: "AMRAP",
    synonyms: &["amrap"],
    schema_file: "job.amrap.schema.json",
    description: "AMRAP: as many rounds or reps as possible within a fixed time window.",
    required: &[JobField::WorkTimeInMinutes],
    defaults: ModeDefaults::NONE,
    rounds: RoundsPolicy::Keep,
    min_exercises: 0,
    invariants: &[],
};

pub static FOR_TIME: ModeRule = ModeRule {
    id: ModeId::ForTime,
    label: "FT",
    synonyms: &["for_time"],
    schema_file: "job.for_time.schema.json",
    description: "For time: complete all prescribed reps as fast as possible; total time is \
                  the score.",
    required: &[JobField::Exercises],
    defaults: ModeDefaults {
        rounds: Some(1),
        work_time_in_seconds: None,
        rest_time_in_seconds: None,
    },
    rounds: RoundsPolicy::Keep,
    min_exercises: 1,
    invariants: &[Invariant::RepsDeclared],
};

pub static EDT: ModeRule = ModeRule {
    id: ModeId::Edt,
    label: "EDT",
    synonyms: &["edt"],
    schema_file: "job.edt.schema.json",
    description: "EDT: escalating density training. Work in fixed time blocks, accumulating \
                  as much volume as possible on one or two exercises.",
    required: &[],
    defaults: ModeDefaults::NONE,
    rounds: RoundsPolicy::Suppress,
    min_exercises: 1,
    invariants: &[
        Invariant::RequiresWorkTimeInMinutes,
        Invariant::NoExerciseWorkTime,
    ],
};

/// All rules, in [`ModeId::ALL`] order.
pub static MODE_REGISTRY: &[&ModeRule] = &[&CUSTOM_SETS, &TABATA, &EMOM, &AMRAP, &FOR_TIME, &EDT];

/// The rule for a canonical mode. Total over [`ModeId`].
pub fn rule_for(id: ModeId) -> &'static ModeRule {
    match id {
        ModeId::CustomSets => &CUSTOM_SETS,
        ModeId::Tabata => &TABATA,
        ModeId::Emom => &EMOM,
        ModeId::Amrap => &AMRAP,
        ModeId::ForTime => &FOR_TIME,
        ModeId::Edt => &EDT,
    }
}

/// Look up a rule by any synonym, ignoring ASCII case and surrounding whitespace.
pub fn lookup(raw: &str) -> Option<&'static ModeRule> {
    let needle = raw.trim();
    MODE_REGISTRY
        .iter()
        .copied()
        .find(|rule| rule.synonyms.iter().any(|s| s.eq_ignore_ascii_case(needle)))
}

/// Resolve a raw `MODE` string to its canonical id.
///
/// The error message echoes `raw` verbatim, original case included.
pub fn resolve(raw: &str) -> Result<ModeId, ValidationError> {
    lookup(raw).map(|rule| rule.id).ok_or_else(|| {
        ValidationError::new(
            ErrorKind::UnsupportedMode,
            Scope::Job,
            "MODE",
            format!("unsupported MODE '{}'", raw),
        )
    })
}
