//! Emulator Profile Locators: one adapter
//! per supported emulator behind a uniform contract.

pub mod formats;

pub mod desmume;
pub mod flycast;
pub mod gopher64;
pub mod mgba;
pub mod minecraft;
pub mod pcsx2;
pub mod ryujinx;
pub mod sameboy;
pub mod snes9x;
pub mod vita3k;
pub mod xenia;
pub mod yuzu;

use std::path::{Path, PathBuf};

/// Closed set of supported emulators, replacing a runtime
/// dictionary-of-functions dispatch table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EmulatorKind {
    Ryujinx,
    Yuzu,
    Vita3k,
    DeSmuME,
    MGba,
    Snes9x,
    SameBoy,
    Gopher64,
    Xenia,
    Pcsx2,
    Flycast,
    Minecraft,
}

impl EmulatorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmulatorKind::Ryujinx => "ryujinx",
            EmulatorKind::Yuzu => "yuzu",
            EmulatorKind::Vita3k => "vita3k",
            EmulatorKind::DeSmuME => "desmume",
            EmulatorKind::MGba => "mgba",
            EmulatorKind::Snes9x => "snes9x",
            EmulatorKind::SameBoy => "sameboy",
            EmulatorKind::Gopher64 => "gopher64",
            EmulatorKind::Xenia => "xenia",
            EmulatorKind::Pcsx2 => "pcsx2",
            EmulatorKind::Flycast => "flycast",
            EmulatorKind::Minecraft => "minecraft",
        }
    }
}

/// One save slot/profile surfaced by an adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub id: String,
    pub name: String,
    pub paths: Vec<PathBuf>,
    pub emulator: EmulatorKind,
    pub save_dir: Option<PathBuf>,
}

impl Profile {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        paths: Vec<PathBuf>,
        emulator: EmulatorKind,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            paths,
            emulator,
            save_dir: None,
        }
    }

    pub fn with_save_dir(mut self, save_dir: PathBuf) -> Self {
        self.save_dir = Some(save_dir);
        self
    }
}

/// Sorts profiles by name, per the uniform adapter contract.
pub fn sort_profiles_by_name(mut profiles: Vec<Profile>) -> Vec<Profile> {
    profiles.sort_by(|a, b| a.name.cmp(&b.name));
    profiles
}

/// Uniform adapter contract: `None` means the data root
/// could not be located at all ("ask the user"); `Some(vec![])` means the
/// scanner ran successfully and found zero profiles.
pub trait ProfileFinder {
    fn find_profiles(&self, executable_hint: Option<&Path>) -> Option<Vec<Profile>>;
}

/// Matches a lowercased target path against each emulator's dispatch
/// keyword.
pub fn detect_emulator(target_path: &Path) -> Option<EmulatorKind> {
    let lowered = target_path.to_string_lossy().to_ascii_lowercase();
    crate::config::EMULATOR_KEYWORDS
        .iter()
        .find(|(keyword, _)| lowered.contains(keyword))
        .map(|(_, kind)| *kind)
}

/// Runs keyword detection then invokes the matched adapter.
pub fn detect_and_find_profiles(target_path: &Path) -> Option<(EmulatorKind, Option<Vec<Profile>>)> {
    let kind = detect_emulator(target_path)?;
    let hint = Some(target_path);
    let profiles = match kind {
        EmulatorKind::Ryujinx => ryujinx::RyujinxFinder::default().find_profiles(hint),
        EmulatorKind::Yuzu => yuzu::YuzuFinder::default().find_profiles(hint),
        EmulatorKind::Vita3k => vita3k::Vita3kFinder::default().find_profiles(hint),
        EmulatorKind::DeSmuME => desmume::DeSmumeFinder::default().find_profiles(hint),
        EmulatorKind::MGba => mgba::MGbaFinder::default().find_profiles(hint),
        EmulatorKind::Snes9x => snes9x::Snes9xFinder::default().find_profiles(hint),
        EmulatorKind::SameBoy => sameboy::SameBoyFinder::default().find_profiles(hint),
        EmulatorKind::Gopher64 => gopher64::Gopher64Finder::default().find_profiles(hint),
        EmulatorKind::Xenia => xenia::XeniaFinder::default().find_profiles(hint),
        EmulatorKind::Pcsx2 => pcsx2::Pcsx2Finder::default().find_profiles(hint),
        EmulatorKind::Flycast => flycast::FlycastFinder::default().find_profiles(hint),
        EmulatorKind::Minecraft => minecraft::MinecraftFinder::default().find_profiles(hint),
    };
    Some((kind, profiles))
}

/// Enumerates save files with one of `extensions` under each root,
/// deduplicating symlinks by canonical path and deriving a display name
/// from the file stem with region tags stripped. Shared by the single-save-file
/// emulator adapters; each yields one profile per discovered file.
pub fn enumerate_save_files(
    roots: &[PathBuf],
    extensions: &[&str],
    emulator: EmulatorKind,
) -> Vec<Profile> {
    let mut seen = std::collections::HashSet::new();
    let mut profiles = Vec::new();

    for root in roots {
        if !root.is_dir() {
            continue;
        }
        let entries = match std::fs::read_dir(root) {
            Ok(e) => e,
            Err(e) => {
                log::warn!("emulators: cannot read {}: {e}", root.display());
                continue;
            }
        };

        for entry in entries.filter_map(|e| e.ok()) {
            let path = entry.path();
            if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
                continue;
            }
            let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
                continue;
            };
            if !extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)) {
                continue;
            }

            let canonical = std::fs::canonicalize(&path).unwrap_or_else(|_| path.clone());
            if !seen.insert(canonical.clone()) {
                continue;
            }

            let stem = path.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
            let name = strip_region_tags(&stem);
            let id = stem.clone();
            let profile = Profile::new(id, name, vec![path.clone()], emulator)
                .with_save_dir(root.clone());
            profiles.push(profile);
        }
    }

    sort_profiles_by_name(profiles)
}

/// Strips trailing region/language parenthetical tags like `(USA)` or
/// `(En,Fr,De)` from a save-file stem.
pub fn strip_region_tags(stem: &str) -> String {
    let mut out = String::with_capacity(stem.len());
    let mut depth = 0u32;
    for ch in stem.chars() {
        match ch {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            _ if depth == 0 => out.push(ch),
            _ => {}
        }
    }
    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_matches_known_keyword() {
        let path = Path::new("/home/user/.config/Ryujinx/bis");
        assert_eq!(detect_emulator(path), Some(EmulatorKind::Ryujinx));
    }

    #[test]
    fn detect_returns_none_for_unknown_path() {
        let path = Path::new("/home/user/Documents/MyGame");
        assert_eq!(detect_emulator(path), None);
    }

    #[test]
    fn strip_region_tags_removes_trailing_parens() {
        assert_eq!(strip_region_tags("Chrono Trigger (USA) (En,Fr,De)"), "Chrono Trigger");
        assert_eq!(strip_region_tags("Pokemon Crystal"), "Pokemon Crystal");
    }
}
