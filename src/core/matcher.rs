// File: src/core/matcher.rs
use crate::core::synonyms::SynonymTable;
use crate::core::types::AffinityLevel;

/// True when either string contains the other. Both must already be folded.
fn overlaps(a: &str, b: &str) -> bool {
    a.contains(b) || b.contains(a)
}

/// Finds the topics two progressions share, directly or through the synonym
/// table, in discovery order (outer loop over `source`).
///
/// A direct match records `t1` itself. Otherwise, if any topic related to
/// `t1` overlaps `t2`, the composite `"t1 ↔ t2"` is recorded. Each label is
/// kept once. A pair that matches directly never reaches the synonym branch.
/// Complexity: O(|source| * |candidate| * |related|).
pub fn common_topics(source: &[String], candidate: &[String], synonyms: &SynonymTable) -> Vec<String> {
    let mut common: Vec<String> = Vec::new();
    let folded_candidate: Vec<String> = candidate.iter().map(|t| t.to_lowercase()).collect();

    for t1 in source {
        let t1_lower = t1.to_lowercase();
        let related: Vec<String> = synonyms.related(t1).iter().map(|r| r.to_lowercase()).collect();

        for (t2, t2_lower) in candidate.iter().zip(&folded_candidate) {
            if overlaps(&t1_lower, t2_lower) {
                if !common.iter().any(|c| c == t1) {
                    common.push(t1.clone());
                }
                continue;
            }

            if related.iter().any(|r| overlaps(r, t2_lower)) {
                let composite = format!("{t1} ↔ {t2}");
                if !common.contains(&composite) {
                    common.push(composite);
                }
            }
        }
    }
    common
}

/// Maps a match count onto the three affinity tiers.
pub fn score_affinity(match_count: usize, source_topic_count: usize) -> AffinityLevel {
    let ratio = match_count as f64 / source_topic_count.max(1) as f64;
    if ratio >= 0.5 || match_count >= 2 {
        AffinityLevel::Alta
    } else if ratio >= 0.25 || match_count >= 1 {
        AffinityLevel::Media
    } else {
        AffinityLevel::Baja
    }
}
