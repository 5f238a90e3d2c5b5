//! SameBoy adapter.

use std::path::{Path, PathBuf};

use super::{enumerate_save_files, EmulatorKind, Profile, ProfileFinder};

const EXTENSIONS: &[&str] = &["sav"];

#[derive(Debug, Default)]
pub struct SameBoyFinder;

impl ProfileFinder for SameBoyFinder {
    fn find_profiles(&self, executable_hint: Option<&Path>) -> Option<Vec<Profile>> {
        let roots = candidate_roots(executable_hint);
        if roots.iter().all(|r| !r.is_dir()) {
            return None;
        }
        Some(enumerate_save_files(&roots, EXTENSIONS, EmulatorKind::SameBoy))
    }
}

fn candidate_roots(executable_hint: Option<&Path>) -> Vec<PathBuf> {
    let mut roots = Vec::new();
    if let Some(exe) = executable_hint {
        if let Some(parent) = exe.parent() {
            roots.push(parent.to_path_buf());
        }
    }
    if let Some(home) = dirs::home_dir() {
        roots.push(home.join(".config").join("SameBoy"));
        roots.push(home.join("Library").join("Application Support").join("SameBoy"));
    }
    if let Ok(appdata) = std::env::var("APPDATA") {
        roots.push(PathBuf::from(appdata).join("SameBoy"));
    }
    roots
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn enumerates_sav_files() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("Tetris (World) (Rev 1).sav"), b"x").unwrap();

        let profiles = enumerate_save_files(&[dir.path().to_path_buf()], EXTENSIONS, EmulatorKind::SameBoy);
        assert_eq!(profiles.len(), 1);
        assert_eq!(profiles[0].name, "Tetris");
    }
}
