//! Flycast adapter.

use std::path::{Path, PathBuf};

use super::{enumerate_save_files, EmulatorKind, Profile, ProfileFinder};

const EXTENSIONS: &[&str] = &["bin", "dci"];

#[derive(Debug, Default)]
pub struct FlycastFinder;

impl ProfileFinder for FlycastFinder {
    fn find_profiles(&self, executable_hint: Option<&Path>) -> Option<Vec<Profile>> {
        let roots = candidate_roots(executable_hint);
        if roots.iter().all(|r| !r.is_dir()) {
            return None;
        }
        Some(enumerate_save_files(&roots, EXTENSIONS, EmulatorKind::Flycast))
    }
}

fn candidate_roots(executable_hint: Option<&Path>) -> Vec<PathBuf> {
    let mut roots = Vec::new();
    if let Some(exe) = executable_hint {
        if let Some(parent) = exe.parent() {
            roots.push(parent.join("data").join("vmu"));
        }
    }
    if let Some(home) = dirs::home_dir() {
        roots.push(home.join(".config").join("flycast").join("data").join("vmu"));
        roots.push(home.join(".local").join("share").join("flycast").join("data").join("vmu"));
    }
    if let Ok(appdata) = std::env::var("APPDATA") {
        roots.push(PathBuf::from(appdata).join("Flycast").join("data").join("vmu"));
    }
    roots
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn enumerates_vmu_images() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("vmu_save_A1.bin"), b"x").unwrap();

        let profiles = enumerate_save_files(&[dir.path().to_path_buf()], EXTENSIONS, EmulatorKind::Flycast);
        assert_eq!(profiles.len(), 1);
    }
}
