// File: src/persistence.rs
use crate::core::synonyms::SynonymTable;
use crate::core::types::Catalog;
use crate::error::CatalogError;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::info;

/// A validated catalog and its synonym table, compiled for fast start-up.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CatalogSnapshot {
    pub catalog: Catalog,
    pub synonyms: SynonymTable,
}

/// Writes the snapshot atomically: a temp file in the target directory is
/// filled and then renamed over `path`.
pub fn save_snapshot(snapshot: &CatalogSnapshot, path: &Path) -> Result<(), CatalogError> {
    let parent_dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent_dir)?;

    let temp_file = NamedTempFile::new_in(parent_dir)?;
    {
        let mut writer = BufWriter::new(temp_file.as_file());
        bincode::serialize_into(&mut writer, snapshot)?;
        writer.flush()?;
    }

    temp_file.persist(path).map_err(|e| CatalogError::Io(e.error))?;
    info!(path = %path.display(), units = snapshot.catalog.len(), "wrote catalog snapshot");
    Ok(())
}

pub fn load_snapshot(path: &Path) -> Result<CatalogSnapshot, CatalogError> {
    let reader = BufReader::new(File::open(path)?);
    let snapshot: CatalogSnapshot = bincode::deserialize_from(reader)?;
    info!(path = %path.display(), units = snapshot.catalog.len(), "loaded catalog snapshot");
    Ok(snapshot)
}
