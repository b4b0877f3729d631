use affinity_core::catalog::{catalog_from_reader, synonyms_from_reader};
use affinity_core::config::MatcherConfig;
use affinity_core::core::synonyms::SynonymTable;
use affinity_core::core::types::{AffinityLevel, SourceResolution};
use affinity_core::persistence::{save_snapshot, CatalogSnapshot};
use affinity_core::AffinityEngine;
use serde_json::json;
use std::thread;

fn sep_catalog() -> serde_json::Value {
    json!([
        {
            "materia": "Cultura Digital II", "semestre": 2,
            "progresiones": [
                { "id": 1, "descripcion": "Hojas de cálculo", "tematicas": ["Hojas de cálculo", "Herramientas digitales"] },
                { "id": 2, "descripcion": "Ciudadanía", "tematicas": ["Ciudadanía Digital", "Ética"] },
                { "id": 3, "descripcion": "Vacía" }
            ]
        },
        {
            "materia": "Matemáticas II", "semestre": 2,
            "progresiones": [
                { "id": 1, "descripcion": "Datos", "tematicas": ["Estadística básica", "Gráficos estadísticos"] },
                { "id": 2, "descripcion": "Probabilidad", "tematicas": ["Probabilidad"] }
            ]
        },
        {
            "materia": "Lengua y Comunicación II", "semestre": 2,
            "progresiones": [
                { "id": 1, "descripcion": "Textos", "tematicas": ["Presentaciones", "Procesadores de texto"] }
            ]
        },
        {
            "materia": "Ciencias Sociales II", "semestre": 2,
            "progresiones": [
                { "id": 1, "descripcion": "Participación", "tematicas": ["Participación ciudadana", "Derechos digitales"] },
                { "id": 2, "descripcion": "Ética", "tematicas": ["Ética y responsabilidad"] }
            ]
        },
        {
            "materia": "Cultura Digital I", "semestre": 1,
            "progresiones": [
                { "id": 1, "descripcion": "Herramientas", "tematicas": ["Herramientas digitales"] }
            ]
        },
        { "materia": "Inglés II", "semestre": 2 }
    ])
}

fn engine() -> AffinityEngine {
    let catalog = catalog_from_reader(sep_catalog().to_string().as_bytes()).unwrap();
    AffinityEngine::new(catalog, SynonymTable::default())
}

#[test]
fn spreadsheet_progression_links_across_subjects() {
    let report = engine().find_affinities("cultura digital", 2, 1);
    assert_eq!(report.resolution, SourceResolution::Resolved);
    assert_eq!(report.source_subject, "Cultura Digital II");

    let subjects: Vec<&str> = report.suggestions.iter().map(|s| s.subject.as_str()).collect();
    // Cultura Digital I is a different subject name, so it is a candidate.
    assert!(subjects.contains(&"Cultura Digital I"));
    assert!(subjects.contains(&"Matemáticas II"));
    assert!(subjects.contains(&"Lengua y Comunicación II"));
    assert!(!subjects.contains(&"Cultura Digital II"));

    let math = report.suggestions.iter().find(|s| s.subject == "Matemáticas II").unwrap();
    assert_eq!(
        math.common_topics,
        [
            "Hojas de cálculo ↔ Estadística básica",
            "Hojas de cálculo ↔ Gráficos estadísticos",
        ]
    );
    assert_eq!(math.affinity, AffinityLevel::Alta);
    assert!(math.justification.contains(
        "Hojas de cálculo ↔ Estadística básica y Hojas de cálculo ↔ Gráficos estadísticos"
    ));
}

#[test]
fn results_are_sorted_and_capped() {
    let engine = engine();
    for (subject, term, id) in [("cultura", 2, 1), ("cultura", 2, 2), ("matemáticas", 2, 1), ("sociales", 2, 1)] {
        let report = engine.find_affinities(subject, term, id);
        assert!(report.suggestions.len() <= 5);
        for pair in report.suggestions.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            let ka = (a.affinity.rank(), a.match_count());
            let kb = (b.affinity.rank(), b.match_count());
            assert!(ka >= kb, "{ka:?} before {kb:?}");
        }
    }
}

#[test]
fn unresolved_queries_degrade_to_empty_reports() {
    let engine = engine();
    for (subject, term, id) in [("Biología", 2, 1), ("Cultura Digital II", 5, 1), ("Cultura", 2, 42)] {
        let report = engine.find_affinities(subject, term, id);
        assert!(report.suggestions.is_empty());
        assert!(report.source_topics.is_empty());
        assert_ne!(report.resolution, SourceResolution::Resolved);
    }
    assert_eq!(engine.find_affinities("Cultura", 2, 42).resolution, SourceResolution::ProgressionNotFound);
}

#[test]
fn empty_topics_produce_no_suggestions() {
    let report = engine().find_affinities("Cultura Digital II", 2, 3);
    assert!(report.is_resolved());
    assert!(report.suggestions.is_empty());
}

#[test]
fn same_term_lists_in_catalog_order() {
    assert_eq!(
        engine().same_term_subjects(2),
        [
            "Cultura Digital II",
            "Matemáticas II",
            "Lengua y Comunicación II",
            "Ciencias Sociales II",
            "Inglés II",
        ]
    );
}

#[test]
fn custom_synonym_table_replaces_builtin() {
    let catalog = catalog_from_reader(sep_catalog().to_string().as_bytes()).unwrap();
    let synonyms = synonyms_from_reader(r#"{ "Hojas de cálculo": ["Probabilidad"] }"#.as_bytes()).unwrap();
    let report = AffinityEngine::new(catalog, synonyms).find_affinities("cultura digital", 2, 1);

    let math: Vec<_> = report.suggestions.iter().filter(|s| s.subject == "Matemáticas II").collect();
    assert_eq!(math.len(), 1);
    assert_eq!(math[0].progression_id, 2);
    assert_eq!(math[0].common_topics, ["Hojas de cálculo ↔ Probabilidad"]);
}

#[test]
fn snapshot_engine_answers_like_the_json_engine() {
    let catalog = catalog_from_reader(sep_catalog().to_string().as_bytes()).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("programas.bin");
    save_snapshot(&CatalogSnapshot { catalog, synonyms: SynonymTable::default() }, &path).unwrap();

    let from_disk = AffinityEngine::from_snapshot_file(&path, MatcherConfig::default()).unwrap();
    assert_eq!(
        from_disk.find_affinities("cultura", 2, 2),
        engine().find_affinities("cultura", 2, 2)
    );
}

#[test]
fn engine_is_shared_across_threads() {
    let engine = engine();
    let expected = engine.find_affinities("cultura", 2, 1);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let engine = engine.clone();
            thread::spawn(move || engine.find_affinities("cultura", 2, 1))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}
