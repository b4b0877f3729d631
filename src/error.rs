use thiserror::Error;

/// Failures at the edges of the crate: reading catalogs, synonym tables,
/// config files and snapshots. Matching itself never fails.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Snapshot error: {0}")]
    Snapshot(#[from] Box<bincode::ErrorKind>),

    #[error("catalog entry {index} is missing '{field}'")]
    MissingField { index: usize, field: &'static str },

    #[error("catalog entry {index} has invalid term {term} (terms are 1-based)")]
    InvalidTerm { index: usize, term: i64 },

    #[error("catalog entry {index}, progression {position} has invalid id {id}")]
    InvalidProgressionId { index: usize, position: usize, id: i64 },

    #[error("Config error: {0}")]
    Config(String),
}
