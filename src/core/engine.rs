use crate::config::{MatcherConfig, MAX_SUGGESTIONS};
use crate::core::matcher::{common_topics, score_affinity};
use crate::core::narrative::justify;
use crate::core::synonyms::SynonymTable;
use crate::core::types::{
    AffinityReport, Catalog, CurricularUnit, ProgressionId, SourceResolution, Suggestion,
};
use crate::error::CatalogError;
use crate::persistence::{load_snapshot, CatalogSnapshot};
use std::cmp::Reverse;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Finds cross-subject linkages for a progression over an immutable catalog.
///
/// Cheap to clone; every clone shares the same catalog and synonym table, so
/// one engine can serve concurrent queries and several catalog versions can
/// live side by side.
#[derive(Debug, Clone)]
pub struct AffinityEngine {
    catalog: Arc<Catalog>,
    synonyms: Arc<SynonymTable>,
    config: MatcherConfig,
}

impl AffinityEngine {
    pub fn new(catalog: Catalog, synonyms: SynonymTable) -> Self {
        Self::with_config(catalog, synonyms, MatcherConfig::default())
    }

    pub fn with_config(catalog: Catalog, synonyms: SynonymTable, config: MatcherConfig) -> Self {
        Self {
            catalog: Arc::new(catalog),
            synonyms: Arc::new(synonyms),
            config,
        }
    }

    pub fn from_snapshot(snapshot: CatalogSnapshot, config: MatcherConfig) -> Self {
        Self::with_config(snapshot.catalog, snapshot.synonyms, config)
    }

    pub fn from_snapshot_file(path: &Path, config: MatcherConfig) -> Result<Self, CatalogError> {
        Ok(Self::from_snapshot(load_snapshot(path)?, config))
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn synonyms(&self) -> &SynonymTable {
        &self.synonyms
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// First unit, in catalog order, taught in `term` whose lower-cased name
    /// contains the lower-cased fragment.
    pub fn resolve_unit(&self, subject_fragment: &str, term: u32) -> Option<&CurricularUnit> {
        let needle = subject_fragment.to_lowercase();
        self.catalog
            .units
            .iter()
            .find(|u| u.term == term && u.subject_name.to_lowercase().contains(&needle))
    }

    pub fn find_affinities(
        &self,
        subject_fragment: &str,
        term: u32,
        progression_id: ProgressionId,
    ) -> AffinityReport {
        let Some(source_unit) = self.resolve_unit(subject_fragment, term) else {
            debug!(subject = subject_fragment, term, "source subject not found");
            return AffinityReport::subject_not_found(subject_fragment, term);
        };

        let Some(source) = source_unit.progression(progression_id) else {
            debug!(subject = %source_unit.subject_name, term, progression_id, "source progression not found");
            return AffinityReport::progression_not_found(subject_fragment, term);
        };

        let mut suggestions: Vec<Suggestion> = Vec::new();
        for unit in self
            .catalog
            .units
            .iter()
            .filter(|u| u.subject_name != source_unit.subject_name)
        {
            for candidate in &unit.progressions {
                let common = common_topics(&source.topics, &candidate.topics, &self.synonyms);
                if common.is_empty() {
                    continue;
                }
                let affinity = score_affinity(common.len(), source.topics.len());
                let justification = justify(
                    &source_unit.subject_name,
                    &unit.subject_name,
                    &common,
                    &self.config.justification,
                );
                suggestions.push(Suggestion {
                    subject: unit.subject_name.clone(),
                    term: unit.term,
                    progression_id: candidate.id,
                    progression_description: candidate.description.clone(),
                    common_topics: common,
                    affinity,
                    justification,
                });
            }
        }

        debug!(
            subject = %source_unit.subject_name,
            term,
            progression_id,
            candidates = suggestions.len(),
            "ranked affinity candidates"
        );

        // Stable: ties keep catalog order.
        suggestions.sort_by_key(|s| (Reverse(s.affinity.rank()), Reverse(s.match_count())));
        suggestions.truncate(self.config.max_suggestions.min(MAX_SUGGESTIONS));

        AffinityReport {
            source_subject: source_unit.subject_name.clone(),
            source_term: term,
            source_progression: source.description.clone(),
            source_topics: source.topics.clone(),
            suggestions,
            resolution: SourceResolution::Resolved,
        }
    }

    /// Names of every unit taught in `term`, in catalog order.
    pub fn same_term_subjects(&self, term: u32) -> Vec<String> {
        self.catalog
            .units
            .iter()
            .filter(|u| u.term == term)
            .map(|u| u.subject_name.clone())
            .collect()
    }
}
