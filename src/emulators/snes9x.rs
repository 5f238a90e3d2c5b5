//! SNES9x adapter.

use std::path::{Path, PathBuf};

use super::{enumerate_save_files, EmulatorKind, Profile, ProfileFinder};

const EXTENSIONS: &[&str] = &["srm"];

#[derive(Debug, Default)]
pub struct Snes9xFinder;

impl ProfileFinder for Snes9xFinder {
    fn find_profiles(&self, executable_hint: Option<&Path>) -> Option<Vec<Profile>> {
        let roots = candidate_roots(executable_hint);
        if roots.iter().all(|r| !r.is_dir()) {
            return None;
        }
        Some(enumerate_save_files(&roots, EXTENSIONS, EmulatorKind::Snes9x))
    }
}

fn candidate_roots(executable_hint: Option<&Path>) -> Vec<PathBuf> {
    let mut roots = Vec::new();
    if let Some(exe) = executable_hint {
        if let Some(parent) = exe.parent() {
            roots.push(parent.join("Saves"));
        }
    }
    if let Some(home) = dirs::home_dir() {
        roots.push(home.join(".config").join("snes9x").join("Saves"));
        roots.push(home.join(".local").join("share").join("snes9x").join("Saves"));
    }
    if let Ok(appdata) = std::env::var("APPDATA") {
        roots.push(PathBuf::from(appdata).join("SNES9x").join("Saves"));
    }
    roots
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn enumerates_srm_files() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("Chrono Trigger (USA).srm"), b"x").unwrap();

        let profiles = enumerate_save_files(&[dir.path().to_path_buf()], EXTENSIONS, EmulatorKind::Snes9x);
        assert_eq!(profiles.len(), 1);
        assert_eq!(profiles[0].name, "Chrono Trigger");
    }
}
