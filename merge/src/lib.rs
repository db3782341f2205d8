//! NIDM document merging.
//!
//! Locates the Turtle documents a NIDM pipeline leaves in a study output
//! directory, merges them into one graph, and removes the duplicate
//! `prov:qualifiedAssociation` records that repeated generation introduces.
//!
//! | Stage | Module |
//! |-------|--------|
//! | Discovery (`nidm.ttl`, `nidm/sub-*.ttl`) | [`locator`] |
//! | Parsing and set-union merge | [`loader`] |
//! | Duplicate association removal | [`resolver`] |
//!
//! # Entry Point
//!
//! ```no_run
//! use nidm_merge::{find_nidm_files, merge_files, remove_duplicate_associations};
//! use nidm_graph::serializer::turtle::to_turtle;
//! use std::path::Path;
//!
//! let files = find_nidm_files(Path::new("derivatives"));
//! let (mut store, report) = merge_files(&files);
//! assert!(report.all_loaded());
//! remove_duplicate_associations(&mut store);
//! std::fs::write("nidm_merge.ttl", to_turtle(&store)).expect("write output");
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod error;
pub mod loader;
pub mod locator;
pub mod report;
pub mod resolver;

use std::path::PathBuf;

use nidm_graph::MemoryStore;

pub use error::LoadError;
pub use loader::GraphLoader;
pub use locator::find_nidm_files;
pub use report::{FileOutcome, FileStatus, LoadReport};
pub use resolver::{remove_duplicate_associations, Resolution};

/// Parses every path into one fresh store.
///
/// Files that fail to load are recorded in the report and skipped.
#[must_use]
pub fn merge_files(paths: &[PathBuf]) -> (MemoryStore, LoadReport) {
    let mut loader = GraphLoader::new();
    let report = loader.load_all(paths);
    (loader.into_store(), report)
}
