// File: src/catalog.rs
//! Ingestion boundary. The catalog arrives as loosely shaped JSON
//! (`programas_sep.json`); everything past this module works on the typed,
//! validated [`Catalog`].
use crate::core::synonyms::SynonymTable;
use crate::core::types::{Catalog, CurricularUnit, Progression, ProgressionId};
use crate::error::CatalogError;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, info, warn};

#[derive(Deserialize)]
struct RawProgram {
    materia: Option<String>,
    semestre: Option<i64>,
    progresiones: Option<Vec<RawProgression>>,
}

#[derive(Deserialize)]
struct RawProgression {
    id: Option<i64>,
    descripcion: Option<String>,
    tematicas: Option<Vec<String>>,
}

/// Parses and validates a catalog from any JSON reader.
pub fn catalog_from_reader<R: Read>(reader: R) -> Result<Catalog, CatalogError> {
    let raw: Vec<RawProgram> = serde_json::from_reader(reader)?;
    let units = raw
        .into_iter()
        .enumerate()
        .map(|(index, program)| validate_program(index, program))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Catalog::new(units))
}

pub fn catalog_from_path(path: &Path) -> Result<Catalog, CatalogError> {
    let catalog = catalog_from_reader(BufReader::new(File::open(path)?))?;
    info!(path = %path.display(), units = catalog.len(), "loaded curriculum catalog");
    Ok(catalog)
}

/// Reads a `{ "topic": ["related", ...] }` object.
pub fn synonyms_from_reader<R: Read>(reader: R) -> Result<SynonymTable, CatalogError> {
    let map: HashMap<String, Vec<String>> = serde_json::from_reader(reader)?;
    Ok(SynonymTable::from_pairs(map))
}

pub fn synonyms_from_path(path: &Path) -> Result<SynonymTable, CatalogError> {
    let table = synonyms_from_reader(BufReader::new(File::open(path)?))?;
    info!(path = %path.display(), entries = table.len(), "loaded synonym table");
    Ok(table)
}

fn validate_program(index: usize, program: RawProgram) -> Result<CurricularUnit, CatalogError> {
    let subject_name = program
        .materia
        .filter(|m| !m.trim().is_empty())
        .ok_or(CatalogError::MissingField { index, field: "materia" })?;

    let raw_term = program
        .semestre
        .ok_or(CatalogError::MissingField { index, field: "semestre" })?;
    let term = u32::try_from(raw_term)
        .ok()
        .filter(|t| *t >= 1)
        .ok_or(CatalogError::InvalidTerm { index, term: raw_term })?;

    let progressions = match program.progresiones {
        Some(list) => list
            .into_iter()
            .enumerate()
            .map(|(position, p)| validate_progression(index, position, &subject_name, p))
            .collect::<Result<Vec<_>, _>>()?,
        None => {
            warn!(index, subject = %subject_name, "entry has no progressions; treating as empty");
            Vec::new()
        }
    };

    Ok(CurricularUnit { subject_name, term, progressions })
}

fn validate_progression(
    index: usize,
    position: usize,
    subject: &str,
    raw: RawProgression,
) -> Result<Progression, CatalogError> {
    let raw_id = raw
        .id
        .ok_or(CatalogError::MissingField { index, field: "progresiones.id" })?;
    let id = ProgressionId::try_from(raw_id)
        .map_err(|_| CatalogError::InvalidProgressionId { index, position, id: raw_id })?;

    let topics = raw.tematicas.unwrap_or_else(|| {
        debug!(index, subject, progression = id, "progression has no topics");
        Vec::new()
    });

    Ok(Progression {
        id,
        description: raw.descripcion.unwrap_or_default(),
        topics,
    })
}
