//! Shared types, error model, and configuration for seqdoc.
//!
//! This crate is the foundation depended on by all other seqdoc crates.
//! It provides:
//! - [`SeqDocError`] — the unified error type
//! - Domain types ([`ModuleAnnotation`], [`AnnotationIndex`], [`TheoremRef`])
//! - Configuration ([`AppConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, BatchConfig, CatalogueConfig, DocsConfig, ProducerConfig, init_config, load_config,
    load_config_from,
};
pub use error::{Result, SeqDocError};
pub use types::{AnnotationIndex, DeclMap, ModuleAnnotation, TheoremRef, TheoremSet};
