//! Plan data model.

use super::media::EpisodeKey;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Operation kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    /// Plain rename to the canonical episode name.
    Rename,
    /// Rename carrying a duplicate-resolution version suffix.
    Version,
    /// No filesystem change; the file is already at its target name.
    Skip,
}

/// The atomic unit of planned work. Immutable once created;
/// consumed only by execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Operation {
    pub kind: OperationKind,
    /// Full path of the file to act on. Always present; an empty source
    /// path is a defect surfaced by validation, never papered over.
    pub source: PathBuf,
    /// Target filename (no directory component).
    pub target_name: String,
    /// Directory the target filename lives in.
    pub target_folder: PathBuf,
    /// Episode slot this operation serves, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub episode: Option<EpisodeKey>,
}

impl Operation {
    /// Full destination path.
    pub fn target_path(&self) -> PathBuf {
        self.target_folder.join(&self.target_name)
    }

    /// Whether execution should touch the filesystem for this operation.
    pub fn is_mutation(&self) -> bool {
        matches!(self.kind, OperationKind::Rename | OperationKind::Version)
    }
}

/// Outcome of plan validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Validation {
    pub is_valid: bool,
    pub issues: Vec<String>,
}

/// A file excluded from the plan, with the reason it was excluded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnmatchedItem {
    pub path: PathBuf,
    pub reason: String,
}

/// Plan file structure. Built once per run; execution reads it only.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Plan {
    /// Unique plan ID.
    pub id: String,
    /// Creation timestamp (RFC 3339).
    pub created_at: String,
    /// Series this plan was built for.
    pub series_name: String,
    /// Ordered operations: renames first, then version resolutions.
    pub operations: Vec<Operation>,
    /// Files already correct; never become operations.
    pub skip_count: usize,
    /// Special-content files left untouched.
    pub special_count: usize,
    /// Files excluded from the plan, with reasons.
    pub unmatched: Vec<UnmatchedItem>,
    /// Validation outcome recorded at build time.
    pub validation: Validation,
}

impl Plan {
    /// Operations that will actually touch the filesystem.
    pub fn mutations(&self) -> impl Iterator<Item = &Operation> {
        self.operations.iter().filter(|op| op.is_mutation())
    }
}

/// Aggregate result of executing a plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExecutionReport {
    /// False when the batch aborted before mutation (folder creation
    /// failure or invalid plan).
    pub success: bool,
    pub success_count: usize,
    pub error_count: usize,
    /// Operations skipped because the destination already existed.
    pub skipped_existing: usize,
    pub folder_create_count: usize,
    /// Whether this was a dry run.
    pub dry_run: bool,
}
