//! mirrorset-sources — source adapters and table persistence for mirrorset.
//!
//! Each adapter reads one kind of input from disk and hands back
//! [`StandardRecord`]s with its label already applied:
//!
//! | Adapter | Input | Missing file |
//! |---------|-------|--------------|
//! | [`TableSource`] | delimited export (scanner or normal traffic) | fatal |
//! | [`CategorySource`] | `<n>. <category>: <example>` text | zero records |
//!
//! [`persist::persist_split`] writes the resulting train/val tables.

pub mod category;
pub mod error;
pub mod persist;
pub mod table;

pub use category::{text_lines, CategorySource};
pub use error::{Result, SourceError};
pub use persist::{persist_split, persist_table, SplitPaths};
pub use table::{tabular_load, TableSource};

use mirrorset_core::{Label, SourceKind, StandardRecord};

/// Implemented by each source adapter. An adapter owns its location, its
/// column mapping and the label it assigns.
pub trait RecordSource {
    fn kind(&self) -> SourceKind;

    fn label(&self) -> Label;

    /// Read the whole source into memory and standardize it.
    fn load(&self) -> Result<Vec<StandardRecord>>;
}
