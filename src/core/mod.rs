pub mod engine;
pub mod matcher;
pub mod narrative;
pub mod synonyms;
pub mod types;
