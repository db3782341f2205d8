//! Load report types: per-file outcomes and batch aggregation.

use std::path::PathBuf;

use crate::error::LoadError;

/// Result of loading one input document.
#[derive(Debug)]
pub enum FileStatus {
    /// The document was parsed and merged.
    Loaded {
        /// Number of triples the document contained.
        triples: usize,
    },
    /// The document was skipped.
    Failed(LoadError),
}

/// The outcome of one file in a batch.
#[derive(Debug)]
pub struct FileOutcome {
    /// Path of the input document.
    pub path: PathBuf,
    /// Whether it was merged or skipped.
    pub status: FileStatus,
}

impl FileOutcome {
    /// Creates a successful outcome.
    pub fn loaded(path: PathBuf, triples: usize) -> Self {
        Self {
            path,
            status: FileStatus::Loaded { triples },
        }
    }

    /// Creates a failed outcome.
    pub fn failed(path: PathBuf, error: LoadError) -> Self {
        Self {
            path,
            status: FileStatus::Failed(error),
        }
    }

    /// Returns true if this file was skipped.
    pub fn is_failure(&self) -> bool {
        matches!(self.status, FileStatus::Failed(_))
    }

    /// The error, if this file was skipped.
    pub fn error(&self) -> Option<&LoadError> {
        match &self.status {
            FileStatus::Failed(error) => Some(error),
            FileStatus::Loaded { .. } => None,
        }
    }
}

/// Aggregated outcomes for a batch of input documents, in load order.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// One outcome per input path.
    pub outcomes: Vec<FileOutcome>,
}

impl LoadReport {
    /// Creates an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an outcome.
    pub fn push(&mut self, outcome: FileOutcome) {
        self.outcomes.push(outcome);
    }

    /// Outcomes of the files that were skipped.
    pub fn failures(&self) -> impl Iterator<Item = &FileOutcome> {
        self.outcomes.iter().filter(|o| o.is_failure())
    }

    /// Number of skipped files.
    pub fn failure_count(&self) -> usize {
        self.failures().count()
    }

    /// Number of merged files.
    pub fn loaded_count(&self) -> usize {
        self.outcomes.len() - self.failure_count()
    }

    /// Total triples parsed across merged files, before set union.
    pub fn parsed_triples(&self) -> usize {
        self.outcomes
            .iter()
            .map(|o| match o.status {
                FileStatus::Loaded { triples } => triples,
                FileStatus::Failed(_) => 0,
            })
            .sum()
    }

    /// Returns true if every file was merged.
    pub fn all_loaded(&self) -> bool {
        self.failure_count() == 0
    }
}
