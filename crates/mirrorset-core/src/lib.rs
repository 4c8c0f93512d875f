//! mirrorset-core — request standardization and dataset balancing.
//!
//! This crate exposes the pipeline layers as public modules, plus the shared
//! types used across all layers. It performs no file I/O beyond loading
//! configuration; reading sources and persisting tables live in
//! `mirrorset-sources`.
//!
//! # Architecture
//!
//! ```text
//! raw payload ──► parser ──┐
//!                          ├──► standardize ──► balance (pools ► sample ► split)
//! source rows ─────────────┘                        ▲
//!                                         golden ───┘
//! normalizer: canonical text form for downstream feature extraction
//! ```
//!
//! Everything is single-threaded and deterministic for a given seed.

pub mod balance;
pub mod config;
pub mod error;
pub mod golden;
pub mod normalizer;
pub mod parser;
pub mod split;
pub mod standardize;
pub mod types;

pub use error::{Error, Result};
pub use types::{Field, FieldAccess, Label, RequestFields, SourceKind, StandardRecord, COLUMNS};
