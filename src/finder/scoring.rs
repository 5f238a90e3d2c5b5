//! Scoring Function.
//!
//! Two variants, Windows and Linux, sharing the same additive/subtractive
//! shape but differing in weights to reflect each platform's distinct
//! candidate provenance tags (see `DESIGN.md`).

use std::path::Path;

use super::normalize::{matches_initial_sequence, token_set_ratio};
use super::query::Candidate;
use crate::config;

/// Default cap applied to candidates beneath `steam_userdata_root`
///.
pub const DEFAULT_STEAM_USERDATA_CAP: i32 = 1100;

/// Per-query data the scorer needs beyond a bare [`Candidate`].
pub struct ScoringContext<'a> {
    pub cleaned_game_name: &'a str,
    pub abbreviations_lower: &'a [String],
    pub significant_title_words: &'a [String],
    pub steam_userdata_root: Option<&'a Path>,
    pub steam_userdata_cap: i32,
}

fn basename(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn parent_basename(path: &Path) -> Option<String> {
    path.parent().map(basename)
}

fn is_under(path: &Path, root: &Path) -> bool {
    path.starts_with(root)
}

fn provenance_matches(candidate: &Candidate, needle: &str) -> bool {
    candidate.sources.iter().any(|s| s.contains(needle))
}

/// Windows-variant score.
pub fn score_windows(candidate: &Candidate, ctx: &ScoringContext) -> i32 {
    let mut score = base_score_windows(candidate, ctx);
    score += content_and_name_bonuses_windows(candidate, ctx);
    score += penalties_windows(candidate, ctx);

    if let Some(root) = ctx.steam_userdata_root {
        if is_under(&candidate.path, root) {
            score = score.min(ctx.steam_userdata_cap);
        }
    }

    score
}

fn base_score_windows(candidate: &Candidate, _ctx: &ScoringContext) -> i32 {
    let is_steam_remote = provenance_matches(candidate, "SteamUserdata/remote");
    let is_steam_base = provenance_matches(candidate, "SteamUserdata/base");
    let is_prime_location = provenance_matches(candidate, "PrimeLocation");
    let is_documents_not_mygames = provenance_matches(candidate, "Documents")
        && !provenance_matches(candidate, "MyGames");
    let is_install_dir_walk = provenance_matches(candidate, "InstallDirWalk");

    if is_steam_remote {
        1500
    } else if is_steam_base {
        if candidate.has_saves_hint {
            500
        } else {
            150
        }
    } else if is_prime_location && !provenance_matches(candidate, "Steam") {
        1000
    } else if is_documents_not_mygames {
        300
    } else if is_install_dir_walk {
        -500
    } else {
        100
    }
}

fn content_and_name_bonuses_windows(candidate: &Candidate, ctx: &ScoringContext) -> i32 {
    let mut bonus = 0;
    let name = basename(&candidate.path);
    let is_steam_base = provenance_matches(candidate, "SteamUserdata/base");

    if candidate.has_saves_hint && !is_steam_base {
        bonus += 600;
    }
    if config::is_common_save_subdir(&name) {
        bonus += 350;
    }

    let name_lower = name.to_ascii_lowercase();
    let abbrev_hit = ctx.abbreviations_lower.iter().any(|a| *a == name_lower);
    let initial_hit = matches_initial_sequence(&name, ctx.significant_title_words);
    let provenance_hit =
        provenance_matches(candidate, "Direct/") || provenance_matches(candidate, "GameNameLvl");
    if abbrev_hit || initial_hit || provenance_hit {
        bonus += 100;
    }

    if let Some(parent) = parent_basename(&candidate.path) {
        let parent_is_abbrev = ctx
            .abbreviations_lower
            .iter()
            .any(|a| *a == parent.to_ascii_lowercase());
        if parent_is_abbrev && config::is_common_save_subdir(&name) {
            bonus += 100;
        }
    }

    let cleaned_name = super::normalize::clean_for_comparison(&name);
    if cleaned_name == ctx.cleaned_game_name {
        bonus += 400;
    } else {
        let ratio = token_set_ratio(ctx.cleaned_game_name, &cleaned_name);
        if ratio > 85 {
            let excess = ratio.saturating_sub(85) as f64;
            bonus += ((excess / 15.0) * 300.0) as i32;
        }
    }

    bonus
}

fn penalties_windows(candidate: &Candidate, _ctx: &ScoringContext) -> i32 {
    let mut penalty = 0;
    let name = basename(&candidate.path);
    let name_lower = name.to_ascii_lowercase();
    let is_prime_location = provenance_matches(candidate, "PrimeLocation");
    let is_steam_remote = provenance_matches(candidate, "SteamUserdata/remote");
    let is_install_dir_walk = provenance_matches(candidate, "InstallDirWalk");
    let guards_pass = !candidate.has_saves_hint && !is_prime_location && !is_steam_remote;

    if name_lower == "data" && guards_pass {
        penalty -= 350;
    }
    if matches!(name_lower.as_str(), "settings" | "config" | "cache" | "logs") && guards_pass {
        penalty -= 150;
    }
    if name.chars().count() <= 3 && !config::is_common_save_subdir(&name) && !candidate.has_saves_hint
    {
        penalty -= 30;
    }
    if is_install_dir_walk
        && (!candidate.has_saves_hint || !config::is_common_save_subdir(&name))
    {
        penalty -= 300;
    }

    penalty
}

/// Linux-variant score, with weights redistributed for Steam/Proton
/// and XDG-style provenance tags instead of the Windows ones.
pub fn score_linux(candidate: &Candidate, ctx: &ScoringContext, depth_below_home: u32) -> i32 {
    let mut score = base_score_linux(candidate);
    score += content_and_name_bonuses_linux(candidate, ctx);
    score += penalties_linux(candidate, ctx, depth_below_home);

    if let Some(root) = ctx.steam_userdata_root {
        if is_under(&candidate.path, root) {
            score = score.min(ctx.steam_userdata_cap);
        }
    }

    score
}

fn base_score_linux(candidate: &Candidate) -> i32 {
    if provenance_matches(candidate, "XDG_CONFIG") {
        800
    } else if provenance_matches(candidate, "XDG_DATA") {
        700
    } else if provenance_matches(candidate, "ProtonPfx") {
        600
    } else if provenance_matches(candidate, "SteamUserdata") {
        500
    } else if provenance_matches(candidate, "Documents") {
        200
    } else if provenance_matches(candidate, "InstallDirWalk") {
        50
    } else {
        100
    }
}

fn content_and_name_bonuses_linux(candidate: &Candidate, ctx: &ScoringContext) -> i32 {
    let mut bonus = 0;
    let name = basename(&candidate.path);

    if candidate.has_saves_hint {
        bonus += 800;
    }
    if config::is_common_save_subdir(&name) {
        bonus += 600;
    }

    let name_lower = name.to_ascii_lowercase();
    let abbrev_hit = ctx.abbreviations_lower.iter().any(|a| *a == name_lower);
    let initial_hit = matches_initial_sequence(&name, ctx.significant_title_words);
    if abbrev_hit || initial_hit {
        bonus += 100;
    }

    let cleaned_name = super::normalize::clean_for_comparison(&name);
    if cleaned_name == ctx.cleaned_game_name {
        bonus += 400;
    } else {
        let ratio = token_set_ratio(ctx.cleaned_game_name, &cleaned_name);
        if ratio > 85 {
            let excess = ratio.saturating_sub(85) as f64;
            bonus += ((excess / 15.0) * 300.0) as i32;
        }
    }

    bonus
}

const GENERIC_BASENAMES_LINUX: &[&str] = &[
    "data", "config", "settings", "cache", "logs", "common", "default", "user", "users",
];

fn penalties_linux(candidate: &Candidate, _ctx: &ScoringContext, depth_below_home: u32) -> i32 {
    let mut penalty = 0;
    let name = basename(&candidate.path);
    let name_lower = name.to_ascii_lowercase();
    let is_common_subdir = config::is_common_save_subdir(&name);

    if GENERIC_BASENAMES_LINUX.contains(&name_lower.as_str())
        && !candidate.has_saves_hint
        && !is_common_subdir
    {
        penalty -= 200;
    }

    if depth_below_home > 4 {
        let over = (depth_below_home - 4) as i32;
        let mut linear_penalty = over * 20;
        if is_common_subdir || candidate.has_saves_hint {
            linear_penalty /= 2;
        }
        penalty -= linear_penalty;
    }

    penalty
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finder::query::Candidate;
    use std::path::PathBuf;

    fn ctx<'a>(
        cleaned: &'a str,
        abbrevs: &'a [String],
        sig_words: &'a [String],
    ) -> ScoringContext<'a> {
        ScoringContext {
            cleaned_game_name: cleaned,
            abbreviations_lower: abbrevs,
            significant_title_words: sig_words,
            steam_userdata_root: None,
            steam_userdata_cap: DEFAULT_STEAM_USERDATA_CAP,
        }
    }

    #[test]
    fn steam_remote_wins_over_documents_with_evidence() {
        let abbrevs = vec![];
        let sig_words = vec![];
        let c = ctx("my game", &abbrevs, &sig_words);

        let mut remote = Candidate::new(
            PathBuf::from("/userdata/123/456/remote"),
            "SteamUserdata/remote",
        );
        remote.has_saves_hint = true;

        let mut docs = Candidate::new(
            PathBuf::from("/home/user/Documents/My Games/MyGame"),
            "Documents/MyGames",
        );
        docs.has_saves_hint = true;

        let remote_score = score_windows(&remote, &c);
        let docs_score = score_windows(&docs, &c);
        assert!(remote_score > docs_score, "{remote_score} vs {docs_score}");
    }

    #[test]
    fn steam_userdata_cap_enforced() {
        let abbrevs = vec![];
        let sig_words = vec![];
        let mut c = ctx("my game", &abbrevs, &sig_words);
        let root = PathBuf::from("/userdata");
        c.steam_userdata_root = Some(&root);

        let mut remote = Candidate::new(PathBuf::from("/userdata/1/2/remote"), "SteamUserdata/remote");
        remote.has_saves_hint = true;
        remote.sources.insert("Direct/Saves".to_string());

        let score = score_windows(&remote, &c);
        assert!(score <= DEFAULT_STEAM_USERDATA_CAP);
    }

    #[test]
    fn install_dir_walk_penalized_without_evidence() {
        let abbrevs = vec![];
        let sig_words = vec![];
        let c = ctx("my game", &abbrevs, &sig_words);
        let cand = Candidate::new(PathBuf::from("/games/MyGame/Data"), "InstallDirWalk");
        let score = score_windows(&cand, &c);
        assert!(score < 0, "expected negative score, got {score}");
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use crate::finder::query::Candidate;
    use proptest::prelude::*;
    use std::path::PathBuf;

    proptest! {
        /// Invariant 9: any candidate beneath `steam_userdata_root` is capped
        /// regardless of which provenance tags and evidence flags fire.
        #[test]
        fn userdata_candidates_never_exceed_cap(
            provenance in prop::sample::select(vec![
                "SteamUserdata/remote",
                "SteamUserdata/base",
                "PrimeLocation",
                "Documents/MyGames",
                "InstallDirWalk",
            ]),
            has_saves_hint in any::<bool>(),
            basename in "[a-zA-Z0-9 ]{1,20}",
        ) {
            let abbrevs = vec![];
            let sig_words = vec![];
            let mut c = ctx("my game", &abbrevs, &sig_words);
            let root = PathBuf::from("/userdata");
            c.steam_userdata_root = Some(&root);

            let mut candidate = Candidate::new(
                PathBuf::from(format!("/userdata/1/2/{basename}")),
                provenance,
            );
            candidate.has_saves_hint = has_saves_hint;

            let score = score_windows(&candidate, &c);
            prop_assert!(score <= DEFAULT_STEAM_USERDATA_CAP);
        }
    }
}
