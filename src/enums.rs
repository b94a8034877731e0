//! Closed enumerations used throughout the workout type system.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical training mode of a job.
///
/// Every raw `MODE` string resolves to exactly one of these through
/// [`crate::registry::resolve`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ModeId {
    CustomSets,
    Tabata,
    Emom,
    Amrap,
    ForTime,
    Edt,
}

impl ModeId {
    pub const ALL: [ModeId; 6] = [
        ModeId::CustomSets,
        ModeId::Tabata,
        ModeId::Emom,
        ModeId::Amrap,
        ModeId::ForTime,
        ModeId::Edt,
    ];

    /// Position in [`ModeId::ALL`].
    pub fn index(self) -> usize {
        match self {
            ModeId::CustomSets => 0,
            ModeId::Tabata => 1,
            ModeId::Emom => 2,
            ModeId::Amrap => 3,
            ModeId::ForTime => 4,
            ModeId::Edt => 5,
        }
    }

    /// Canonical identifier, as written back by the serializer.
    pub fn as_str(self) -> &'static str {
        match self {
            ModeId::CustomSets => "CUSTOM_SETS",
            ModeId::Tabata => "TABATA",
            ModeId::Emom => "EMOM",
            ModeId::Amrap => "AMRAP",
            ModeId::ForTime => "FOR_TIME",
            ModeId::Edt => "EDT",
        }
    }
}

impl fmt::Display for ModeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
