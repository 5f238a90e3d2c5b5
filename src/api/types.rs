//! FRB-compatible type wrappers.
//!
//! Flutter Rust Bridge cannot directly handle `PathBuf`, trait objects, or
//! `HashMap` keys on its own terms. These thin wrappers use only primitive
//! types that FRB can serialize across the FFI boundary, each paired with a
//! `From` conversion to/from its domain counterpart.

// ── Save-path finder ──────────────────────────────────────────────────

/// A Steam game other than the one being searched for (FRB mirror of
/// `finder::SteamGameRef`, keyed explicitly since FRB structs can't
/// self-describe a `HashMap` key).
#[derive(Debug, Clone)]
pub struct FrbSteamGameRef {
    pub app_id: String,
    pub name: String,
    pub install_dir: Option<String>,
}

impl From<FrbSteamGameRef> for crate::finder::SteamGameRef {
    fn from(g: FrbSteamGameRef) -> Self {
        Self {
            name: g.name,
            install_dir: g.install_dir.map(std::path::PathBuf::from),
        }
    }
}

/// A ranked save-directory candidate (FRB mirror of `finder::ScoredPath`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrbScoredPath {
    pub path: String,
    pub score: i32,
}

impl From<crate::finder::ScoredPath> for FrbScoredPath {
    fn from(s: crate::finder::ScoredPath) -> Self {
        Self {
            path: s.path.to_string_lossy().into_owned(),
            score: s.score,
        }
    }
}

// ── Emulator profile locators ─────────────────────────────────────────

/// Mirror of `emulators::EmulatorKind` for FRB.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrbEmulatorKind {
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

impl From<crate::emulators::EmulatorKind> for FrbEmulatorKind {
    fn from(kind: crate::emulators::EmulatorKind) -> Self {
        use crate::emulators::EmulatorKind as K;
        match kind {
            K::Ryujinx => Self::Ryujinx,
            K::Yuzu => Self::Yuzu,
            K::Vita3k => Self::Vita3k,
            K::DeSmuME => Self::DeSmuME,
            K::MGba => Self::MGba,
            K::Snes9x => Self::Snes9x,
            K::SameBoy => Self::SameBoy,
            K::Gopher64 => Self::Gopher64,
            K::Xenia => Self::Xenia,
            K::Pcsx2 => Self::Pcsx2,
            K::Flycast => Self::Flycast,
            K::Minecraft => Self::Minecraft,
        }
    }
}

/// One save slot/profile surfaced by an emulator adapter (FRB mirror of
/// `emulators::Profile`).
#[derive(Debug, Clone)]
pub struct FrbProfile {
    pub id: String,
    pub name: String,
    pub paths: Vec<String>,
    pub emulator: FrbEmulatorKind,
    pub save_dir: Option<String>,
}

impl From<crate::emulators::Profile> for FrbProfile {
    fn from(p: crate::emulators::Profile) -> Self {
        Self {
            id: p.id,
            name: p.name,
            paths: p.paths.into_iter().map(|p| p.to_string_lossy().into_owned()).collect(),
            emulator: p.emulator.into(),
            save_dir: p.save_dir.map(|d| d.to_string_lossy().into_owned()),
        }
    }
}

/// Result of emulator keyword detection plus that adapter's run. `profiles
/// == None` is the "data root not found" sentinel.
#[derive(Debug, Clone)]
pub struct FrbEmulatorDetectionResult {
    pub emulator: FrbEmulatorKind,
    pub profiles: Option<Vec<FrbProfile>>,
}
