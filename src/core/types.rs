// src/core/types.rs
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a progression. Unique within its parent unit only.
pub type ProgressionId = u32;

/// One learning-progression unit inside a subject/term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progression {
    pub id: ProgressionId,
    pub description: String,
    /// Topic strings in catalog order. May be empty.
    pub topics: Vec<String>,
}

/// One subject taught in one term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurricularUnit {
    pub subject_name: String,
    /// 1-based term ("semestre").
    pub term: u32,
    pub progressions: Vec<Progression>,
}

impl CurricularUnit {
    pub fn progression(&self, id: ProgressionId) -> Option<&Progression> {
        self.progressions.iter().find(|p| p.id == id)
    }
}

/// The full, validated catalog the engine reads from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub units: Vec<CurricularUnit>,
}

impl Catalog {
    pub fn new(units: Vec<CurricularUnit>) -> Self {
        Self { units }
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

/// Coarse tier describing how strongly two progressions' topics overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AffinityLevel {
    Alta,
    Media,
    Baja,
}

impl AffinityLevel {
    /// Fixed ordering used by the ranking step: alta(3) > media(2) > baja(1).
    pub fn rank(self) -> u8 {
        match self {
            AffinityLevel::Alta => 3,
            AffinityLevel::Media => 2,
            AffinityLevel::Baja => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AffinityLevel::Alta => "alta",
            AffinityLevel::Media => "media",
            AffinityLevel::Baja => "baja",
        }
    }
}

impl fmt::Display for AffinityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A cross-subject linkage proposal. Recomputed on every query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub subject: String,
    pub term: u32,
    pub progression_id: ProgressionId,
    pub progression_description: String,
    /// Matched labels in discovery order: either a source topic, or a
    /// `"source ↔ candidate"` composite for synonym matches.
    pub common_topics: Vec<String>,
    pub affinity: AffinityLevel,
    pub justification: String,
}

impl Suggestion {
    pub fn match_count(&self) -> usize {
        self.common_topics.len()
    }
}

/// How far the source lookup got.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceResolution {
    Resolved,
    SubjectNotFound,
    ProgressionNotFound,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffinityReport {
    pub source_subject: String,
    pub source_term: u32,
    /// Description of the resolved progression, or a placeholder.
    pub source_progression: String,
    pub source_topics: Vec<String>,
    pub suggestions: Vec<Suggestion>,
    pub resolution: SourceResolution,
}

pub const SUBJECT_NOT_FOUND: &str = "No encontrada";
pub const PROGRESSION_NOT_FOUND: &str = "Progresión no encontrada";

impl SourceResolution {
    /// Text shown in place of the source progression. `None` once resolved.
    pub fn placeholder(self) -> Option<&'static str> {
        match self {
            SourceResolution::Resolved => None,
            SourceResolution::SubjectNotFound => Some(SUBJECT_NOT_FOUND),
            SourceResolution::ProgressionNotFound => Some(PROGRESSION_NOT_FOUND),
        }
    }
}

impl AffinityReport {
    pub(crate) fn subject_not_found(subject: &str, term: u32) -> Self {
        Self::empty(subject, term, SourceResolution::SubjectNotFound)
    }

    pub(crate) fn progression_not_found(subject: &str, term: u32) -> Self {
        Self::empty(subject, term, SourceResolution::ProgressionNotFound)
    }

    fn empty(subject: &str, term: u32, resolution: SourceResolution) -> Self {
        Self {
            source_subject: subject.to_string(),
            source_term: term,
            source_progression: resolution.placeholder().unwrap_or_default().to_string(),
            source_topics: Vec::new(),
            suggestions: Vec::new(),
            resolution,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.resolution == SourceResolution::Resolved
    }
}
