//! Vita3K adapter.

use std::path::{Path, PathBuf};

use regex::Regex;

use super::formats::sfo;
use super::{sort_profiles_by_name, EmulatorKind, Profile, ProfileFinder};

#[derive(Debug, Default)]
pub struct Vita3kFinder;

impl Vita3kFinder {
    fn data_root(&self) -> Option<PathBuf> {
        candidate_roots().into_iter().find(|p| p.is_dir())
    }
}

fn is_valid_title_id(title_id: &str) -> bool {
    let Ok(re) = Regex::new(r"^(PCS[A-Z]|NPS|VCV)[0-9A-Z]{5,6}$") else {
        return false;
    };
    re.is_match(title_id)
}

impl ProfileFinder for Vita3kFinder {
    fn find_profiles(&self, _executable_hint: Option<&Path>) -> Option<Vec<Profile>> {
        let data_root = self.data_root()?;
        let ux0 = data_root.join("ux0");
        if !ux0.is_dir() {
            return Some(Vec::new());
        }

        let app_root = ux0.join("app");
        let Ok(entries) = std::fs::read_dir(&app_root) else {
            return Some(Vec::new());
        };

        let mut profiles = Vec::new();
        for entry in entries.filter_map(|e| e.ok()) {
            if !entry.file_type().map(|t| t.is_dir()).unwrap_or(false) {
                continue;
            }
            let title_id = entry.file_name().to_string_lossy().into_owned();
            if !is_valid_title_id(&title_id) {
                continue;
            }

            let save_dir = ux0.join("user").join("00").join("savedata").join(&title_id);
            let param_sfo = entry.path().join("sce_sys").join("param.sfo");
            let fallback_sfo = save_dir.join("sce_sys").join("param.sfo");

            let sfo_path = if param_sfo.is_file() {
                Some(param_sfo)
            } else if fallback_sfo.is_file() {
                Some(fallback_sfo)
            } else {
                None
            };

            let title = sfo_path
                .and_then(|p| std::fs::read(&p).ok())
                .map(|bytes| sfo::decode(&bytes))
                .and_then(|summary| summary.title)
                .unwrap_or_else(|| format!("Unknown title ({title_id})"));

            if save_dir.is_dir() {
                profiles.push(
                    Profile::new(title_id, title, vec![save_dir.clone()], EmulatorKind::Vita3k)
                        .with_save_dir(save_dir),
                );
            }
        }
        Some(sort_profiles_by_name(profiles))
    }
}

fn candidate_roots() -> Vec<PathBuf> {
    let mut roots = Vec::new();
    if let Some(home) = dirs::home_dir() {
        roots.push(home.join(".config").join("Vita3K"));
        roots.push(home.join("Vita3K"));
    }
    if let Ok(appdata) = std::env::var("APPDATA") {
        roots.push(PathBuf::from(appdata).join("Vita3K"));
    }
    roots
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validates_known_title_id_shapes() {
        assert!(is_valid_title_id("PCSE00510"));
        assert!(is_valid_title_id("PCSB00169"));
        assert!(!is_valid_title_id("not-a-title-id"));
    }
}
