//! Candidate Collector: platform-specific directory
//! enumeration strategies sharing a common emission/filtering shape.

pub mod linux;
pub mod windows;

use std::path::{Path, PathBuf};

use crate::config;
use crate::finder::inspector;

/// Result of a directory-walk step, replacing the source's
/// exceptions-as-control-flow for "skip this directory".
pub enum WalkStep {
    Emit(PathBuf),
    Skip,
}

/// Lists a directory's subdirectories, filtering out banned names and
/// capping the number of entries considered. Access errors are logged and treated
/// as an empty listing.
pub fn list_subdirs(dir: &Path, max_items: usize) -> Vec<(String, PathBuf)> {
    let entries = match std::fs::read_dir(dir) {
        Ok(e) => e,
        Err(e) => {
            log::warn!("collector: cannot read directory {}: {e}", dir.display());
            return Vec::new();
        }
    };

    entries
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().map(|t| t.is_dir()).unwrap_or(false))
        .take(max_items)
        .filter_map(|e| {
            let name = e.file_name().to_string_lossy().into_owned();
            if config::is_banned_folder_name(&name) {
                None
            } else {
                Some((name, e.path()))
            }
        })
        .collect()
}

/// A directory is a "potential save directory" by name/content heuristics
/// alone (used by the Linux strong-recursion policy).
pub fn is_potential_save_dir(name: &str, path: &Path) -> bool {
    if config::is_common_save_subdir(name) {
        return true;
    }
    inspector::inspect(path).has_save_evidence
}

/// Determines whether `child` is the largest (by claimed size on disk) save
/// directory among siblings, or just whether it exists -- used by the
/// install-dir walk's depth bound. Kept free of recursion so both
/// platform variants can share it.
pub fn relative_depth(root: &Path, path: &Path) -> u32 {
    path.strip_prefix(root)
        .map(|rel| rel.components().count() as u32)
        .unwrap_or(0)
}
