//! Yuzu adapter.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::{sort_profiles_by_name, EmulatorKind, Profile, ProfileFinder};

const BUNDLED_TITLE_MAP: &str = include_str!("assets/switch_game_list.json");
const ZERO_USER_ID: &str = "00000000000000000000000000000000";

#[derive(Debug, Default)]
pub struct YuzuFinder;

impl YuzuFinder {
    fn data_root(&self) -> Option<PathBuf> {
        candidate_roots().into_iter().find(|p| p.is_dir())
    }

    fn title_names(&self) -> HashMap<String, String> {
        serde_json::from_str(BUNDLED_TITLE_MAP).unwrap_or_else(|e| {
            log::warn!("yuzu: cannot parse bundled title map: {e}");
            HashMap::new()
        })
    }
}

impl ProfileFinder for YuzuFinder {
    fn find_profiles(&self, _executable_hint: Option<&Path>) -> Option<Vec<Profile>> {
        let data_root = self.data_root()?;
        let titles = self.title_names();

        let save_root = data_root
            .join("nand")
            .join("user")
            .join("save")
            .join("0000000000000000");
        let Ok(user_entries) = std::fs::read_dir(&save_root) else {
            return Some(Vec::new());
        };

        let mut profiles = Vec::new();
        for user_entry in user_entries.filter_map(|e| e.ok()) {
            if !user_entry.file_type().map(|t| t.is_dir()).unwrap_or(false) {
                continue;
            }
            let user_id = user_entry.file_name().to_string_lossy().into_owned();
            if is_zero_user_id(&user_id) {
                continue;
            }

            let Ok(title_entries) = std::fs::read_dir(user_entry.path()) else {
                continue;
            };
            for title_entry in title_entries.filter_map(|e| e.ok()) {
                if !title_entry.file_type().map(|t| t.is_dir()).unwrap_or(false) {
                    continue;
                }
                let title_id = title_entry.file_name().to_string_lossy().to_ascii_uppercase();
                let name = titles
                    .get(&title_id)
                    .cloned()
                    .unwrap_or_else(|| format!("Unknown title ({title_id})"));
                let save_dir = title_entry.path();
                profiles.push(
                    Profile::new(title_id, name, vec![save_dir.clone()], EmulatorKind::Yuzu)
                        .with_save_dir(save_dir),
                );
            }
        }
        Some(sort_profiles_by_name(profiles))
    }
}

fn is_zero_user_id(user_id: &str) -> bool {
    user_id == ZERO_USER_ID
}

fn candidate_roots() -> Vec<PathBuf> {
    let mut roots = Vec::new();
    if let Ok(appdata) = std::env::var("APPDATA") {
        roots.push(PathBuf::from(appdata).join("yuzu"));
    }
    if let Some(home) = dirs::home_dir() {
        roots.push(home.join(".local").join("share").join("yuzu"));
        roots.push(
            home.join(".var")
                .join("app")
                .join("org.yuzu_emu.yuzu")
                .join("data")
                .join("yuzu"),
        );
    }
    roots
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_title_map_parses() {
        let finder = YuzuFinder;
        let titles = finder.title_names();
        assert!(!titles.is_empty());
        assert_eq!(
            titles.get("0100ABF008968000").map(|s| s.as_str()),
            Some("Super Mario Odyssey")
        );
    }

    #[test]
    fn zero_user_id_is_skipped() {
        assert_eq!(ZERO_USER_ID.len(), 32);
        assert!(is_zero_user_id(ZERO_USER_ID));
        assert!(!is_zero_user_id("0123456789ABCDEF0123456789ABCDEF"));
    }
}
