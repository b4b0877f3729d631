// File: src/core/narrative.rs
use crate::config::JustificationStyle;
use crate::core::engine::AffinityEngine;
use crate::core::types::AffinityReport;

pub const NO_SUGGESTIONS: &str =
    "No se encontraron sugerencias de transversalidad automáticas para esta progresión.";

const DESCRIPTION_PREVIEW_CHARS: usize = 60;
const SUMMARY_SUGGESTIONS: usize = 2;

/// Builds the pedagogical justification for linking two subjects. Only the
/// first two matched topics are quoted.
pub fn justify(source: &str, target: &str, topics: &[String], style: &JustificationStyle) -> String {
    let quoted = topics
        .iter()
        .take(2)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(&style.conjunction);

    fill_template(&style.template, &[("{source}", source), ("{target}", target), ("{topics}", quoted.as_str())])
}

/// Substitutes placeholders in a single left-to-right pass, so text coming
/// from a substituted value is never expanded again.
fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        match values.iter().find(|(key, _)| tail.starts_with(key)) {
            Some((key, value)) => {
                out.push_str(value);
                rest = &tail[key.len()..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Markdown overview of the linkages of a whole unit, one section per
/// progression that has suggestions. `None` when the unit does not resolve.
pub fn transversality_report(engine: &AffinityEngine, subject_fragment: &str, term: u32) -> Option<String> {
    let unit = engine.resolve_unit(subject_fragment, term)?;
    let config = engine.config();

    let mut out = format!("# Análisis de Transversalidad: {} (Semestre {})\n\n", unit.subject_name, term);

    for progression in unit.progressions.iter().take(config.report_progressions) {
        let analysis = engine.find_affinities(subject_fragment, term, progression.id);
        if analysis.suggestions.is_empty() {
            continue;
        }

        let preview: String = progression.description.chars().take(DESCRIPTION_PREVIEW_CHARS).collect();
        out.push_str(&format!("## Progresión {}: {}...\n\n", progression.id, preview));
        out.push_str(&format!("**Temáticas:** {}\n\n", progression.topics.join(", ")));
        out.push_str("**Vinculaciones sugeridas:**\n");
        for s in analysis.suggestions.iter().take(config.report_suggestions) {
            out.push_str(&format!("- **{}** (Sem. {}): {}\n", s.subject, s.term, s.common_topics.join(", ")));
        }
        out.push('\n');
    }

    Some(out)
}

/// Short plain-text digest of a report: the two strongest linkages and the
/// justification of the first one.
pub fn linkage_summary(report: &AffinityReport) -> String {
    if report.suggestions.is_empty() {
        return NO_SUGGESTIONS.to_string();
    }

    let top = &report.suggestions[..report.suggestions.len().min(SUMMARY_SUGGESTIONS)];
    let mut out = String::from("Esta planeación se vincula con:\n");
    for s in top {
        out.push_str(&format!("- {} (Sem. {}): {}\n", s.subject, s.term, s.common_topics.join(", ")));
    }
    out.push_str(&top[0].justification);
    out
}
