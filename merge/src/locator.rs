//! Input discovery.
//!
//! Two naming conventions are recognized anywhere below the root:
//! - `nidm.ttl` — written by the main NIDM conversion tools
//! - `nidm/sub-*.ttl` — per-subject documents written by the FreeSurfer BIDS app
//!
//! Symbolic links are not followed. Directory entries that cannot be read are
//! skipped.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

/// File name produced by the main NIDM conversion tools.
pub const NIDM_FILE_NAME: &str = "nidm.ttl";

/// Returns every NIDM Turtle document below `root`, deduplicated and sorted.
///
/// An empty result is not an error; the caller decides whether it is fatal.
#[must_use]
pub fn find_nidm_files(root: &Path) -> Vec<PathBuf> {
    let found: BTreeSet<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| is_nidm_document(e) || is_subject_document(e))
        .map(DirEntry::into_path)
        .collect();
    found.into_iter().collect()
}

fn is_nidm_document(entry: &DirEntry) -> bool {
    entry.file_name() == NIDM_FILE_NAME
}

/// Matches `nidm/sub-*.ttl` where the `nidm` directory lies below the root.
fn is_subject_document(entry: &DirEntry) -> bool {
    if entry.depth() < 2 {
        return false;
    }
    let in_nidm_dir = entry
        .path()
        .parent()
        .and_then(Path::file_name)
        .map(|n| n == "nidm")
        .unwrap_or(false);
    let name = entry.file_name().to_string_lossy();
    in_nidm_dir && name.starts_with("sub-") && name.ends_with(".ttl")
}
