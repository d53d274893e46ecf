//! Ingestion of the record dump produced by the external `.flp` parser.
//!
//! The dump is the handoff point between the parser collaborator and the
//! aggregation engine: one JSON document carrying the scanned directory and
//! every parsed project in discovery order.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::RecordError;
use crate::models::ProjectRecord;

/// One project record paired with the identifier used in the report
/// (the project's file name).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamedRecord {
    pub name: String,
    #[serde(flatten)]
    pub record: ProjectRecord,
}

/// The full handoff from the external parser.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordSet {
    pub scanned_directory: String,
    pub projects: Vec<NamedRecord>,
}

impl RecordSet {
    /// Loads a record dump from disk.
    ///
    /// A dump the parser could not finish writing aborts the run; no
    /// partial report is produced.
    pub fn from_path(path: &Path) -> Result<Self, RecordError> {
        let data = fs::read_to_string(path).map_err(|source| RecordError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&data).map_err(|source| RecordError::Malformed {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}
