//! Ryujinx adapter.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::formats::imkvdb;
use super::{sort_profiles_by_name, EmulatorKind, Profile, ProfileFinder};

#[derive(Debug, Deserialize)]
struct RyujinxMetadata {
    #[serde(default)]
    title_name: Option<String>,
}

#[derive(Debug, Default)]
pub struct RyujinxFinder;

impl RyujinxFinder {
    fn data_root(&self) -> Option<PathBuf> {
        candidate_roots().into_iter().find(|p| p.is_dir())
    }

    fn title_names(&self, data_root: &Path) -> HashMap<String, String> {
        let mut map = HashMap::new();
        let games_dir = data_root.join("games");
        let Ok(entries) = std::fs::read_dir(&games_dir) else {
            return map;
        };

        for entry in entries.filter_map(|e| e.ok()) {
            if !entry.file_type().map(|t| t.is_dir()).unwrap_or(false) {
                continue;
            }
            let title_id = entry.file_name().to_string_lossy().to_ascii_uppercase();
            let metadata_path = entry.path().join("gui").join("metadata.json");
            let Ok(contents) = std::fs::read_to_string(&metadata_path) else {
                continue;
            };
            match serde_json::from_str::<RyujinxMetadata>(&contents) {
                Ok(meta) => {
                    if let Some(name) = meta.title_name {
                        map.insert(title_id, name);
                    }
                }
                Err(e) => log::warn!("ryujinx: cannot parse {}: {e}", metadata_path.display()),
            }
        }
        map
    }

    fn save_id_to_title_id(&self, data_root: &Path) -> HashMap<String, String> {
        let index_path = data_root
            .join("bis")
            .join("system")
            .join("save")
            .join("8000000000000000")
            .join("0")
            .join("imkvdb.arc");
        let Ok(bytes) = std::fs::read(&index_path) else {
            return HashMap::new();
        };
        imkvdb::decode(&bytes)
    }
}

impl ProfileFinder for RyujinxFinder {
    fn find_profiles(&self, _executable_hint: Option<&Path>) -> Option<Vec<Profile>> {
        let data_root = self.data_root()?;

        let titles = self.title_names(&data_root);
        let save_index = self.save_id_to_title_id(&data_root);

        let saves_dir = data_root.join("bis").join("user").join("save");
        let Ok(entries) = std::fs::read_dir(&saves_dir) else {
            return Some(Vec::new());
        };

        let mut profiles = Vec::new();
        for entry in entries.filter_map(|e| e.ok()) {
            if !entry.file_type().map(|t| t.is_dir()).unwrap_or(false) {
                continue;
            }
            let save_data_id = entry.file_name().to_string_lossy().to_ascii_uppercase();
            let title_id = save_index.get(&save_data_id);
            let name = title_id
                .and_then(|tid| titles.get(tid))
                .cloned()
                .unwrap_or_else(|| format!("Unknown title ({save_data_id})"));

            let save_dir = entry.path();
            profiles.push(
                Profile::new(save_data_id, name, vec![save_dir.clone()], EmulatorKind::Ryujinx)
                    .with_save_dir(save_dir),
            );
        }
        Some(sort_profiles_by_name(profiles))
    }
}

fn candidate_roots() -> Vec<PathBuf> {
    let mut roots = Vec::new();
    if let Ok(appdata) = std::env::var("APPDATA") {
        roots.push(PathBuf::from(appdata).join("Ryujinx"));
    }
    if let Some(home) = dirs::home_dir() {
        roots.push(home.join(".config").join("Ryujinx"));
        roots.push(
            home.join(".var")
                .join("app")
                .join("org.ryujinx.Ryujinx")
                .join("config")
                .join("Ryujinx"),
        );
    }
    if let Some(support) = dirs::data_dir() {
        roots.push(support.join("Ryujinx"));
    }
    roots
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn finder_returns_empty_when_no_saves_dir() {
        let dir = TempDir::new().unwrap();
        let finder = RyujinxFinder;
        let saves = finder.save_id_to_title_id(dir.path());
        assert!(saves.is_empty());
    }

    #[test]
    fn title_names_reads_metadata_json() {
        let dir = TempDir::new().unwrap();
        let game_dir = dir.path().join("games").join("0100abcdef000000").join("gui");
        std::fs::create_dir_all(&game_dir).unwrap();
        std::fs::write(game_dir.join("metadata.json"), r#"{"title_name":"Example Game"}"#).unwrap();

        let finder = RyujinxFinder;
        let titles = finder.title_names(dir.path());
        assert_eq!(titles.get("0100ABCDEF000000"), Some(&"Example Game".to_string()));
    }
}
