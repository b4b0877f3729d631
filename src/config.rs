// File: src/config.rs
use crate::error::CatalogError;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Wording of the generated justification sentence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JustificationStyle {
    /// Sentence with `{source}`, `{target}` and `{topics}` placeholders.
    pub template: String,
    /// Joins the first two matched topics.
    pub conjunction: String,
}

impl Default for JustificationStyle {
    fn default() -> Self {
        Self {
            template: "La vinculación entre {source} y {target} permite abordar de manera integral \
                       {topics}, fortaleciendo el aprendizaje significativo a través de la \
                       interdisciplinariedad."
                .to_string(),
            conjunction: " y ".to_string(),
        }
    }
}

/// Hard ceiling on the ranked suggestion list, whatever the config says.
pub const MAX_SUGGESTIONS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherConfig {
    /// Cap on the ranked suggestion list, between 1 and [`MAX_SUGGESTIONS`].
    pub max_suggestions: usize,
    /// Progressions covered by the Markdown report.
    pub report_progressions: usize,
    /// Suggestions listed per progression in the Markdown report.
    pub report_suggestions: usize,
    pub justification: JustificationStyle,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            max_suggestions: MAX_SUGGESTIONS,
            report_progressions: 5,
            report_suggestions: 3,
            justification: JustificationStyle::default(),
        }
    }
}

impl MatcherConfig {
    /// Reads a JSON config file. Missing fields take their defaults.
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let reader = BufReader::new(File::open(path)?);
        let config: MatcherConfig = serde_json::from_reader(reader)?;
        if !(1..=MAX_SUGGESTIONS).contains(&config.max_suggestions) {
            return Err(CatalogError::Config(format!(
                "max_suggestions must be between 1 and {MAX_SUGGESTIONS}, got {}",
                config.max_suggestions
            )));
        }
        Ok(config)
    }

    /// Loads the file when a path is given, defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self, CatalogError> {
        match path {
            Some(p) => Self::from_path(p),
            None => Ok(Self::default()),
        }
    }
}

/// Parses a boolean-ish environment flag, falling back to `default` when the
/// variable is unset or unrecognised.
pub fn env_bool(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .and_then(|v| parse_bool(&v))
        .unwrap_or(default)
}

fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "1" | "true" | "TRUE" | "yes" | "YES" => Some(true),
        "0" | "false" | "FALSE" | "no" | "NO" => Some(false),
        _ => None,
    }
}
