//! Minecraft adapter.

use std::path::{Path, PathBuf};

use super::{sort_profiles_by_name, EmulatorKind, Profile, ProfileFinder};

#[derive(Debug, Default)]
pub struct MinecraftFinder;

impl MinecraftFinder {
    fn data_root(&self) -> Option<PathBuf> {
        candidate_roots().into_iter().find(|p| p.is_dir())
    }
}

impl ProfileFinder for MinecraftFinder {
    fn find_profiles(&self, _executable_hint: Option<&Path>) -> Option<Vec<Profile>> {
        let data_root = self.data_root()?;
        let saves_root = data_root.join("saves");
        let Ok(entries) = std::fs::read_dir(&saves_root) else {
            return Some(Vec::new());
        };

        let mut profiles = Vec::new();
        for entry in entries.filter_map(|e| e.ok()) {
            if !entry.file_type().map(|t| t.is_dir()).unwrap_or(false) {
                continue;
            }
            let world_name = entry.file_name().to_string_lossy().into_owned();
            let save_dir = entry.path();
            profiles.push(
                Profile::new(world_name.clone(), world_name, vec![save_dir.clone()], EmulatorKind::Minecraft)
                    .with_save_dir(save_dir),
            );
        }
        Some(sort_profiles_by_name(profiles))
    }
}

fn candidate_roots() -> Vec<PathBuf> {
    let mut roots = Vec::new();
    if let Ok(appdata) = std::env::var("APPDATA") {
        roots.push(PathBuf::from(appdata).join(".minecraft"));
    }
    if let Some(home) = dirs::home_dir() {
        roots.push(home.join(".minecraft"));
        roots.push(
            home.join(".var")
                .join("app")
                .join("com.mojang.Minecraft")
                .join(".minecraft"),
        );
        roots.push(
            home.join("Library")
                .join("Application Support")
                .join("minecraft"),
        );
    }
    roots
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn enumerates_world_directories() {
        let dir = TempDir::new().unwrap();
        let saves = dir.path().join("saves");
        std::fs::create_dir_all(saves.join("My World")).unwrap();

        let entries: Vec<_> = std::fs::read_dir(&saves)
            .unwrap()
            .filter_map(|e| e.ok())
            .collect();
        assert_eq!(entries.len(), 1);
    }
}
