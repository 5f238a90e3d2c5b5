//! Xenia adapter.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::{sort_profiles_by_name, EmulatorKind, Profile, ProfileFinder};

const BUNDLED_TITLE_MAP: &str = include_str!("assets/xenia_title_map.json");
const ZERO_PACKAGE: &str = "0000000000000000";
const METADATA_FOLDERS: &[&str] = &["headers", "marketplace"];

#[derive(Debug, Default)]
pub struct XeniaFinder;

impl XeniaFinder {
    fn title_names(&self) -> HashMap<String, String> {
        serde_json::from_str(BUNDLED_TITLE_MAP).unwrap_or_else(|e| {
            log::warn!("xenia: cannot parse bundled title map: {e}");
            HashMap::new()
        })
    }

    fn data_root(&self, executable_hint: Option<&Path>) -> Option<PathBuf> {
        candidate_roots(executable_hint).into_iter().find(|p| p.is_dir())
    }
}

impl ProfileFinder for XeniaFinder {
    fn find_profiles(&self, executable_hint: Option<&Path>) -> Option<Vec<Profile>> {
        let data_root = self.data_root(executable_hint)?;
        let content_root = data_root.join("content");
        if !content_root.is_dir() {
            return Some(Vec::new());
        }

        let titles = self.title_names();
        let mut profiles = Vec::new();

        let Ok(package_entries) = std::fs::read_dir(&content_root) else {
            return Some(Vec::new());
        };
        for package_entry in package_entries.filter_map(|e| e.ok()) {
            if !package_entry.file_type().map(|t| t.is_dir()).unwrap_or(false) {
                continue;
            }
            let package = package_entry.file_name().to_string_lossy().into_owned();
            if package == ZERO_PACKAGE {
                continue;
            }

            let Ok(title_entries) = std::fs::read_dir(package_entry.path()) else {
                continue;
            };
            for title_entry in title_entries.filter_map(|e| e.ok()) {
                if !title_entry.file_type().map(|t| t.is_dir()).unwrap_or(false) {
                    continue;
                }
                let title_id = title_entry.file_name().to_string_lossy().to_ascii_uppercase();
                if METADATA_FOLDERS.iter().any(|f| f.eq_ignore_ascii_case(&title_id)) {
                    continue;
                }

                let name = titles
                    .get(&title_id)
                    .cloned()
                    .unwrap_or_else(|| format!("Unknown title ({title_id})"));
                let save_dir = title_entry.path();
                profiles.push(
                    Profile::new(title_id, name, vec![save_dir.clone()], EmulatorKind::Xenia)
                        .with_save_dir(save_dir),
                );
            }
        }
        Some(sort_profiles_by_name(profiles))
    }
}

fn candidate_roots(executable_hint: Option<&Path>) -> Vec<PathBuf> {
    let mut roots = Vec::new();
    if let Some(exe) = executable_hint {
        if let Some(parent) = exe.parent() {
            roots.push(parent.to_path_buf());
        }
    }
    if let Ok(appdata) = std::env::var("APPDATA") {
        roots.push(PathBuf::from(appdata).join("Xenia"));
    }
    if let Some(home) = dirs::home_dir() {
        roots.push(home.join(".config").join("xenia"));
    }
    roots
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_title_map_parses() {
        let finder = XeniaFinder;
        let titles = finder.title_names();
        assert_eq!(titles.get("4D5307D5").map(|s| s.as_str()), Some("Halo 3"));
    }
}
