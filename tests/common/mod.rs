//! Shared test utilities for mirrorset integration harnesses.
//!
//! Import everything you need via `mod common; use common::*;` at the top of
//! each harness file. Everything here is deterministic; on-disk fixtures are
//! written into a fresh `tempfile::TempDir` per test.

pub mod assertions;
pub mod builders;
pub mod fixtures;

pub use assertions::*;
pub use builders::*;
pub use fixtures::*;
