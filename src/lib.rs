//! mirrorset — balanced attack/normal HTTP request datasets.
//!
//! Ingests heterogeneous request logs (scanner exports, normal-traffic
//! exports, curated category text) and produces one class-balanced,
//! stratified train/validation split for a binary request classifier. This
//! crate re-exports the pipeline layers so that integration tests and the
//! binary can import them directly.
//!
//! # Architecture
//!
//! ```text
//! sources ──► standardize ──► pools ──► mirror sample ──► split ──► persist
//!                 ▲
//!        parser + normalizer
//! ```
//!
//! Runs are single-threaded and reproducible: the same inputs and seed give
//! byte-identical tables.

pub mod pipeline;

pub use mirrorset_core::{
    balance, config, golden, normalizer, parser, split, standardize, Error, Field, FieldAccess, Label,
    RequestFields, SourceKind, StandardRecord, COLUMNS,
};
pub use mirrorset_sources as sources;
