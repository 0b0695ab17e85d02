//! Whole-table persistence.
//!
//! # Responsibilities
//! - Load the complete customer → raw-fields table from one JSON file
//! - Overwrite the file with the complete table after a mutation
//!
//! # Design Decisions
//! - A missing, unreadable, or malformed file loads as an empty table and
//!   is rebuilt on the next save; load never fails the caller
//! - Saves go through a sibling temp file plus rename so a crash mid-write
//!   cannot leave a truncated store
//! - No cross-process locking; last writer wins

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use thiserror::Error;

/// The full persisted mapping of customer id → raw stored fields.
///
/// Stored maps may carry unknown legacy keys; they are tolerated here and
/// dropped the next time the record passes through coercion.
pub type ConfigTable = BTreeMap<String, Map<String, Value>>;

/// Errors from persisting the table. Load failures are recovered locally
/// and never reach callers.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Writing the store file failed.
    #[error("store write error: {0}")]
    Io(#[from] std::io::Error),

    /// Serializing the table failed.
    #[error("store serialize error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// File-backed store for the complete config table.
#[derive(Debug, Clone)]
pub struct RecordStore {
    path: PathBuf,
}

impl RecordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read the persisted table.
    ///
    /// Absent, unreadable, or malformed storage yields an empty table.
    pub fn load(&self) -> ConfigTable {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return ConfigTable::new(),
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Config store unreadable, treating as empty"
                );
                return ConfigTable::new();
            }
        };

        match serde_json::from_str(&content) {
            Ok(table) => table,
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Config store malformed, treating as empty"
                );
                ConfigTable::new()
            }
        }
    }

    /// Serialize and overwrite the persisted table.
    pub fn save(&self, table: &ConfigTable) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(table)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
