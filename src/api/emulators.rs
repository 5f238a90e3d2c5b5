//! Emulator profile-locator API exposed to Flutter via FRB.

use std::path::PathBuf;

use super::types::{FrbEmulatorDetectionResult, FrbProfile};
use crate::emulators;

/// Matches `target_path` against the configured emulator keywords and, on
/// a match, runs that emulator's adapter. Returns `None` when no emulator
/// keyword matches the path at all (distinct from "matched but the data
/// root could not be found", which the inner `Option` on the result
/// conveys -- see `FrbEmulatorDetectionResult`).
pub fn find_emulator_profiles(target_path: String) -> Option<FrbEmulatorDetectionResult> {
    let path = PathBuf::from(target_path);
    let (kind, profiles) = emulators::detect_and_find_profiles(&path)?;

    Some(FrbEmulatorDetectionResult {
        emulator: kind.into(),
        profiles: profiles.map(|ps| ps.into_iter().map(FrbProfile::from).collect()),
    })
}
