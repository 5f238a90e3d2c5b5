//! mGBA adapter. Unlike its siblings, mGBA also reads
//! `config.ini` overrides for the save directory.

use std::path::{Path, PathBuf};

use super::formats::config_ini;
use super::{enumerate_save_files, EmulatorKind, Profile, ProfileFinder};

const EXTENSIONS: &[&str] = &["sav"];

#[derive(Debug, Default)]
pub struct MGbaFinder;

impl MGbaFinder {
    fn config_overrides(&self, executable_hint: Option<&Path>) -> Option<config_ini::MgbaOverrides> {
        let config_path = config_dir(executable_hint)?.join("config.ini");
        let contents = std::fs::read_to_string(config_path).ok()?;
        Some(config_ini::read_mgba_overrides(&contents))
    }
}

impl ProfileFinder for MGbaFinder {
    fn find_profiles(&self, executable_hint: Option<&Path>) -> Option<Vec<Profile>> {
        let mut roots = candidate_roots(executable_hint);

        if let Some(overrides) = self.config_overrides(executable_hint) {
            if let Some(save_dir) = overrides.save_dir {
                roots.insert(0, save_dir);
            }
            if let Some(last_dir) = overrides.last_directory {
                roots.push(last_dir);
            }
        }

        if roots.iter().all(|r| !r.is_dir()) {
            return None;
        }
        Some(enumerate_save_files(&roots, EXTENSIONS, EmulatorKind::MGba))
    }
}

fn config_dir(executable_hint: Option<&Path>) -> Option<PathBuf> {
    if let Some(exe) = executable_hint {
        if let Some(parent) = exe.parent() {
            if parent.join("config.ini").is_file() {
                return Some(parent.to_path_buf());
            }
        }
    }
    dirs::config_dir().map(|d| d.join("mgba"))
}

fn candidate_roots(executable_hint: Option<&Path>) -> Vec<PathBuf> {
    let mut roots = Vec::new();
    if let Some(exe) = executable_hint {
        if let Some(parent) = exe.parent() {
            roots.push(parent.to_path_buf());
            roots.push(parent.join("saves"));
        }
    }
    if let Some(home) = dirs::home_dir() {
        roots.push(home.join(".config").join("mgba"));
        roots.push(home.join(".local").join("share").join("mgba").join("saves"));
    }
    if let Ok(appdata) = std::env::var("APPDATA") {
        roots.push(PathBuf::from(appdata).join("mGBA"));
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
        std::fs::write(dir.path().join("Pokemon Emerald (USA, Europe).sav"), b"x").unwrap();

        let profiles = enumerate_save_files(&[dir.path().to_path_buf()], EXTENSIONS, EmulatorKind::MGba);
        assert_eq!(profiles.len(), 1);
        assert_eq!(profiles[0].name, "Pokemon Emerald");
    }

    #[test]
    fn config_override_is_picked_up_when_present() {
        let config_dir = TempDir::new().unwrap();
        let save_dir = TempDir::new().unwrap();
        std::fs::write(
            config_dir.path().join("config.ini"),
            format!("[ports.qt]\nsavedir={}\n", save_dir.path().display()),
        )
        .unwrap();

        let exe = config_dir.path().join("mgba.exe");
        let finder = MGbaFinder;
        let overrides = finder.config_overrides(Some(&exe)).unwrap();
        assert_eq!(overrides.save_dir, Some(save_dir.path().to_path_buf()));
    }
}
