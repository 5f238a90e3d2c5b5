//! DeSmuME adapter.

use std::path::{Path, PathBuf};

use super::{enumerate_save_files, EmulatorKind, Profile, ProfileFinder};

const EXTENSIONS: &[&str] = &["dsv"];

#[derive(Debug, Default)]
pub struct DeSmumeFinder;

impl ProfileFinder for DeSmumeFinder {
    fn find_profiles(&self, executable_hint: Option<&Path>) -> Option<Vec<Profile>> {
        let roots = candidate_roots(executable_hint);
        if roots.iter().all(|r| !r.is_dir()) {
            return None;
        }
        Some(enumerate_save_files(&roots, EXTENSIONS, EmulatorKind::DeSmuME))
    }
}

fn candidate_roots(executable_hint: Option<&Path>) -> Vec<PathBuf> {
    let mut roots = Vec::new();
    if let Some(exe) = executable_hint {
        if let Some(parent) = exe.parent() {
            roots.push(parent.join("Battery"));
            roots.push(parent.join("saves"));
        }
    }
    if let Some(home) = dirs::home_dir() {
        roots.push(home.join(".config").join("desmume").join("Battery"));
        roots.push(home.join(".local").join("share").join("desmume").join("Battery"));
    }
    if let Ok(appdata) = std::env::var("APPDATA") {
        roots.push(PathBuf::from(appdata).join("DeSmuME").join("Battery"));
    }
    roots
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn enumerates_dsv_files_in_portable_dir() {
        let dir = TempDir::new().unwrap();
        let battery = dir.path().join("Battery");
        std::fs::create_dir_all(&battery).unwrap();
        std::fs::write(battery.join("Pokemon White (USA).dsv"), b"data").unwrap();

        let profiles = enumerate_save_files(&[battery], EXTENSIONS, EmulatorKind::DeSmuME);
        assert_eq!(profiles.len(), 1);
        assert_eq!(profiles[0].name, "Pokemon White");
    }
}
