// pathfinder-common/src/report.rs
//! Data produced by a search path scan.
use std::path::PathBuf;

use serde::Serialize;

/// A search path directory that contains the target binary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QualifyingDirectory {
    pub path: String,
    /// The entry is a symlink whose real location has the marker next to it.
    pub is_managed_link: bool,
    /// Position among qualifying directories, starting at 0.
    pub original_index: usize,
}

/// Ordered scan result and the positioning verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanReport {
    pub entries: Vec<QualifyingDirectory>,
    pub verdict: bool,
    /// Number of unique directories that were probed.
    pub searched: usize,
}

impl ScanReport {
    /// Numbers the qualifying directories in order and derives the verdict.
    pub fn from_ordered(qualifying: Vec<QualifyingDirectory>, searched: usize) -> Self {
        let entries: Vec<QualifyingDirectory> = qualifying
            .into_iter()
            .enumerate()
            .map(|(index, dir)| QualifyingDirectory {
                original_index: index,
                ..dir
            })
            .collect();
        let verdict = entries.first().is_some_and(|first| first.is_managed_link);
        Self {
            entries,
            verdict,
            searched,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// State of the version manager's symlink location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SymlinkHealth {
    /// Nothing exists there yet; created on first activation.
    Missing,
    /// A real file or directory occupies the location.
    NotASymlink,
    PointsToFile { target: PathBuf },
    Valid { target: PathBuf },
    Unreadable { reason: String },
}

impl SymlinkHealth {
    pub fn is_problem(&self) -> bool {
        !matches!(self, SymlinkHealth::Missing | SymlinkHealth::Valid { .. })
    }
}
