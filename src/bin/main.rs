use affinity_core::catalog::{catalog_from_path, synonyms_from_path};
use affinity_core::config::{env_bool, MatcherConfig};
use affinity_core::core::narrative::transversality_report;
use affinity_core::core::synonyms::SynonymTable;
use affinity_core::core::types::{AffinityLevel, AffinityReport, SourceResolution};
use affinity_core::persistence::{load_snapshot, save_snapshot, CatalogSnapshot};
use affinity_core::{AffinityEngine, CatalogError};
use clap::{Parser, Subcommand};
use crossterm::style::Stylize;
use std::io::{stdout, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "affinity_engine", version, about = "Cross-subject linkage suggestions for MCCEMS programs")]
struct Cli {
    /// Catalog as SEP program JSON, or a compiled `.bin` snapshot.
    #[arg(long, env = "EDUPLAN_CATALOG", default_value = "data/programas_sep.json")]
    catalog: PathBuf,

    /// Synonym table JSON. The built-in table is used when absent.
    #[arg(long, env = "EDUPLAN_SYNONYMS")]
    synonyms: Option<PathBuf>,

    /// Matcher configuration JSON.
    #[arg(long, env = "EDUPLAN_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Rank linkages for one progression.
    Affinities {
        subject: String,
        term: u32,
        progression: u32,
        #[arg(long)]
        json: bool,
    },
    /// List the subjects taught in a term.
    SameTerm { term: u32 },
    /// Markdown report for a whole subject.
    Report { subject: String, term: u32 },
    /// Compile the catalog and synonym table into a snapshot.
    Compile { output: PathBuf },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if env_bool("EDUPLAN_LOG_JSON", false) {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CatalogError> {
    let config = MatcherConfig::load(cli.config.as_deref())?;
    let snapshot = load_sources(&cli.catalog, cli.synonyms.as_deref())?;

    if let Command::Compile { output } = &cli.command {
        return save_snapshot(&snapshot, output);
    }

    let engine = AffinityEngine::from_snapshot(snapshot, config);
    let mut out = stdout().lock();

    match cli.command {
        Command::Affinities { subject, term, progression, json } => {
            let report = engine.find_affinities(&subject, term, progression);
            if json {
                serde_json::to_writer_pretty(&mut out, &report)?;
                writeln!(out)?;
            } else {
                print_report(&mut out, &report)?;
            }
        }
        Command::SameTerm { term } => {
            for name in engine.same_term_subjects(term) {
                writeln!(out, "{name}")?;
            }
        }
        Command::Report { subject, term } => match transversality_report(&engine, &subject, term) {
            Some(markdown) => write!(out, "{markdown}")?,
            None => writeln!(out, "Programa no encontrado")?,
        },
        Command::Compile { .. } => {}
    }
    out.flush()?;
    Ok(())
}

fn load_sources(catalog: &Path, synonyms: Option<&Path>) -> Result<CatalogSnapshot, CatalogError> {
    if catalog.extension().is_some_and(|ext| ext == "bin") {
        let mut snapshot = load_snapshot(catalog)?;
        if let Some(path) = synonyms {
            warn!(path = %path.display(), "overriding the snapshot's synonym table");
            snapshot.synonyms = synonyms_from_path(path)?;
        }
        return Ok(snapshot);
    }

    let synonyms = match synonyms {
        Some(path) => synonyms_from_path(path)?,
        None => SynonymTable::default(),
    };
    Ok(CatalogSnapshot { catalog: catalog_from_path(catalog)?, synonyms })
}

fn print_report(out: &mut impl Write, report: &AffinityReport) -> std::io::Result<()> {
    match report.resolution {
        SourceResolution::SubjectNotFound => {
            return writeln!(out, "Materia no encontrada: {} (Semestre {})", report.source_subject, report.source_term);
        }
        SourceResolution::ProgressionNotFound => {
            return writeln!(out, "{}: {} (Semestre {})", report.source_progression, report.source_subject, report.source_term);
        }
        SourceResolution::Resolved => {}
    }

    writeln!(out, "{} (Semestre {})", report.source_subject.as_str().bold(), report.source_term)?;
    writeln!(out, "Progresión: {}", report.source_progression)?;
    writeln!(out, "Temáticas: {}\n", report.source_topics.join(", "))?;

    if report.suggestions.is_empty() {
        return writeln!(out, "{}", affinity_core::core::narrative::NO_SUGGESTIONS);
    }

    for (i, s) in report.suggestions.iter().enumerate() {
        let level = match s.affinity {
            AffinityLevel::Alta => s.affinity.as_str().green().bold(),
            AffinityLevel::Media => s.affinity.as_str().yellow(),
            AffinityLevel::Baja => s.affinity.as_str().dark_grey(),
        };
        writeln!(out, "{}. [{}] {} (Sem. {}), progresión {}", i + 1, level, s.subject, s.term, s.progression_id)?;
        writeln!(out, "   {}", s.common_topics.join(", "))?;
        writeln!(out, "   {}", s.justification)?;
    }
    Ok(())
}
