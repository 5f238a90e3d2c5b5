//! Gopher64 adapter.

use std::path::{Path, PathBuf};

use super::{enumerate_save_files, EmulatorKind, Profile, ProfileFinder};

const EXTENSIONS: &[&str] = &["srm", "eep", "mpk"];

#[derive(Debug, Default)]
pub struct Gopher64Finder;

impl ProfileFinder for Gopher64Finder {
    fn find_profiles(&self, executable_hint: Option<&Path>) -> Option<Vec<Profile>> {
        let roots = candidate_roots(executable_hint);
        if roots.iter().all(|r| !r.is_dir()) {
            return None;
        }
        Some(enumerate_save_files(&roots, EXTENSIONS, EmulatorKind::Gopher64))
    }
}

fn candidate_roots(executable_hint: Option<&Path>) -> Vec<PathBuf> {
    let mut roots = Vec::new();
    if let Some(exe) = executable_hint {
        if let Some(parent) = exe.parent() {
            roots.push(parent.join("saves"));
        }
    }
    if let Some(home) = dirs::home_dir() {
        roots.push(home.join(".local").join("share").join("gopher64").join("saves"));
        roots.push(home.join(".config").join("gopher64").join("saves"));
    }
    if let Ok(appdata) = std::env::var("APPDATA") {
        roots.push(PathBuf::from(appdata).join("gopher64").join("saves"));
    }
    roots
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn enumerates_srm_and_mpk_files() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("Ocarina of Time (USA).srm"), b"x").unwrap();
        std::fs::write(dir.path().join("Ocarina of Time (USA).mpk"), b"x").unwrap();

        let profiles = enumerate_save_files(&[dir.path().to_path_buf()], EXTENSIONS, EmulatorKind::Gopher64);
        assert_eq!(profiles.len(), 2);
    }
}
