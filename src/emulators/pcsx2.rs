//! PCSX2 adapter.

use std::path::{Path, PathBuf};

use super::{enumerate_save_files, EmulatorKind, Profile, ProfileFinder};

const EXTENSIONS: &[&str] = &["ps2"];

#[derive(Debug, Default)]
pub struct Pcsx2Finder;

impl ProfileFinder for Pcsx2Finder {
    fn find_profiles(&self, executable_hint: Option<&Path>) -> Option<Vec<Profile>> {
        let roots = candidate_roots(executable_hint);
        if roots.iter().all(|r| !r.is_dir()) {
            return None;
        }
        Some(enumerate_save_files(&roots, EXTENSIONS, EmulatorKind::Pcsx2))
    }
}

fn candidate_roots(executable_hint: Option<&Path>) -> Vec<PathBuf> {
    let mut roots = Vec::new();
    if let Some(exe) = executable_hint {
        if let Some(parent) = exe.parent() {
            roots.push(parent.join("memcards"));
        }
    }
    if let Some(home) = dirs::home_dir() {
        roots.push(home.join(".config").join("PCSX2").join("memcards"));
        roots.push(home.join("Documents").join("PCSX2").join("memcards"));
    }
    if let Ok(appdata) = std::env::var("APPDATA") {
        roots.push(PathBuf::from(appdata).join("PCSX2").join("memcards"));
    }
    roots
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn enumerates_memcard_images() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("Mcd001.ps2"), b"x").unwrap();

        let profiles = enumerate_save_files(&[dir.path().to_path_buf()], EXTENSIONS, EmulatorKind::Pcsx2);
        assert_eq!(profiles.len(), 1);
    }
}
