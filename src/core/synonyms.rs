// File: src/core/synonyms.rs
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Maps a canonical topic to topics that relate to it even when they share
/// no words. Asymmetric: only the key side is looked up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SynonymTable {
    related: HashMap<String, Vec<String>>,
}

const BUILTIN: &[(&str, &[&str])] = &[
    // Comunicación y lenguaje
    ("Procesadores de texto", &["Composición de textos", "Corrección de textos", "Herramientas digitales"]),
    ("Herramientas digitales", &["Procesadores de texto", "Hojas de cálculo", "Presentaciones"]),
    ("Expresión oral", &["Debate", "Persuasión", "Argumentación"]),
    ("Comprensión lectora", &["Fuentes de información", "Búsqueda de información"]),
    // Matemáticas y análisis
    ("Estadística básica", &["Recolección de datos", "Gráficos estadísticos", "Toma de decisiones"]),
    ("Hojas de cálculo", &["Estadística básica", "Gráficos estadísticos", "Análisis de datos"]),
    ("Resolución de problemas", &["Algoritmos", "Toma de decisiones", "Lógica"]),
    // Ciencias
    ("Impacto ambiental", &["Química verde", "Recursos naturales", "Desarrollo sostenible"]),
    ("Salud digital", &["Ciudadanía Digital", "Bienestar social"]),
    // Ciudadanía y ética
    ("Ciudadanía Digital", &["Ciudadanía", "Derechos digitales", "Participación"]),
    ("Ética", &["Responsabilidad", "Libertad", "Virtudes"]),
    ("Participación", &["Ciudadanía", "Democracia", "Comunidad"]),
    // Pensamiento crítico
    ("Argumentación", &["Lógica", "Falacias", "Debate", "Persuasión"]),
    ("Fuentes de información", &["Búsqueda de información", "Fuentes confiables", "Validez"]),
];

impl SynonymTable {
    pub fn empty() -> Self {
        Self { related: HashMap::new() }
    }

    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, Vec<V>)>,
    {
        let related = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into_iter().map(Into::into).collect()))
            .collect();
        Self { related }
    }

    /// Exact, case-sensitive lookup. Unknown topics relate to nothing.
    pub fn related(&self, topic: &str) -> &[String] {
        self.related.get(topic).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.related.len()
    }

    pub fn is_empty(&self) -> bool {
        self.related.is_empty()
    }
}

impl Default for SynonymTable {
    fn default() -> Self {
        Self::from_pairs(BUILTIN.iter().map(|(k, v)| (*k, v.to_vec())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_table_is_keyed_exactly() {
        let table = SynonymTable::default();
        assert_eq!(table.len(), 14);
        assert_eq!(
            table.related("Hojas de cálculo"),
            ["Estadística básica", "Gráficos estadísticos", "Análisis de datos"]
        );
        assert!(table.related("hojas de cálculo").is_empty());
    }

    #[test]
    fn lookup_is_one_directional() {
        let table = SynonymTable::from_pairs([("Ética", vec!["Virtudes"])]);
        assert_eq!(table.related("Ética"), ["Virtudes"]);
        assert!(table.related("Virtudes").is_empty());
    }
}
