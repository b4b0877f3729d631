// src/lib.rs

pub mod catalog;
pub mod config;
pub mod core;
pub mod error;
pub mod persistence;
pub use crate::core::engine::AffinityEngine;
pub use crate::error::CatalogError;
