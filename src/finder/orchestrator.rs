//! Finder Orchestrator: drives the collector, content
//! inspector and scoring function, then dedupes and ranks candidates.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use super::collector::{linux, windows};
use super::inspector::inspect;
use super::normalize::{clean_for_comparison, token_set_ratio};
use super::query::{Candidate, Query, ScoredPath};
use super::scoring::{self, ScoringContext, DEFAULT_STEAM_USERDATA_CAP};
use super::QueryContext;

const REMOTECACHE_SENTINEL: &str = "remotecache.vdf";
const CROSS_CONTAMINATION_THRESHOLD: u32 = 95;

/// Runs the heuristic finder end-to-end. Always returns
/// (possibly empty); never panics on bad filesystem state.
pub fn find(query: &Query) -> Vec<ScoredPath> {
    if query.game_name.trim().is_empty() {
        return Vec::new();
    }
    if query.cancellation_token.is_cancelled() {
        return Vec::new();
    }

    let ctx = QueryContext::new(query);
    let mut candidates: HashMap<String, Candidate> = HashMap::new();

    let mut add_guess = |path: PathBuf, provenance: String| {
        add_guess_impl(&ctx, &mut candidates, path, provenance);
    };

    #[cfg(windows)]
    windows::collect(&ctx, &mut add_guess);
    #[cfg(not(windows))]
    linux::collect(&ctx, &mut add_guess);

    if ctx.is_cancelled() {
        return Vec::new();
    }

    rank(&ctx, candidates)
}

fn add_guess_impl(
    ctx: &QueryContext,
    candidates: &mut HashMap<String, Candidate>,
    path: PathBuf,
    provenance: String,
) {
    if ctx.is_cancelled() {
        return;
    }

    let Some(normalized) = normalize_path(&path) else {
        return;
    };
    if !normalized.is_dir() {
        return;
    }
    if is_filesystem_root(&normalized) {
        return;
    }
    if is_remotecache_only(&normalized) {
        return;
    }
    if is_cross_contamination(ctx, &normalized) {
        return;
    }

    let key = normalized.to_string_lossy().to_ascii_lowercase();
    let inspection = inspect(&normalized);

    candidates
        .entry(key)
        .and_modify(|c| c.merge(provenance.clone(), inspection.has_save_evidence))
        .or_insert_with(|| {
            let mut c = Candidate::new(normalized.clone(), provenance);
            c.has_saves_hint = inspection.has_save_evidence;
            c
        });
}

fn normalize_path(path: &Path) -> Option<PathBuf> {
    let s = path.to_string_lossy();
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(PathBuf::from(trimmed))
}

fn is_filesystem_root(path: &Path) -> bool {
    path.parent().is_none()
}

fn is_remotecache_only(path: &Path) -> bool {
    let Ok(mut entries) = std::fs::read_dir(path) else {
        return false;
    };
    let Some(Ok(first)) = entries.next() else {
        return false;
    };
    if entries.next().is_some() {
        return false;
    }
    first.file_name().to_string_lossy().eq_ignore_ascii_case(REMOTECACHE_SENTINEL)
        && first.file_type().map(|t| t.is_file()).unwrap_or(false)
}

fn is_cross_contamination(ctx: &QueryContext, path: &Path) -> bool {
    if ctx.query.other_installed_steam_games.is_empty() {
        return false;
    }
    let Some(basename) = path.file_name().map(|n| n.to_string_lossy().into_owned()) else {
        return false;
    };
    let cleaned_folder = clean_for_comparison(&basename);
    if cleaned_folder.is_empty() {
        return false;
    }
    // A candidate named after the target's own game is never contamination.
    // `other_installed_steam_games` may list the target itself under some
    // other app_id (or none, if the caller didn't supply one), so the
    // basename-vs-own-name check has to stand on its own, not just the
    // app_id exclusion below.
    if cleaned_folder == ctx.cleaned_game_name {
        return false;
    }

    let own_app_id = ctx.query.steam_app_id.as_deref();
    for (app_id, other) in &ctx.query.other_installed_steam_games {
        if Some(app_id.as_str()) == own_app_id {
            continue;
        }
        let cleaned_other = clean_for_comparison(&other.name);
        if cleaned_other == ctx.cleaned_game_name {
            continue;
        }
        if token_set_ratio(&cleaned_other, &cleaned_folder) > CROSS_CONTAMINATION_THRESHOLD {
            return true;
        }
    }
    false
}

fn rank(ctx: &QueryContext, candidates: HashMap<String, Candidate>) -> Vec<ScoredPath> {
    let steam_root = ctx.query.steam_userdata_root.as_deref();
    let scoring_ctx = ScoringContext {
        cleaned_game_name: &ctx.cleaned_game_name,
        abbreviations_lower: &ctx.abbreviations_lower,
        significant_title_words: &ctx.significant_title_words,
        steam_userdata_root: steam_root,
        steam_userdata_cap: DEFAULT_STEAM_USERDATA_CAP,
    };

    let values: Vec<Candidate> = candidates.into_values().collect();
    let mut scored: Vec<ScoredPath> = values
        .into_par_iter()
        .map(|candidate| {
            let score = score_candidate(&candidate, &scoring_ctx);
            ScoredPath {
                path: candidate.path,
                score,
            }
        })
        .collect();

    scored.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| a.path.to_string_lossy().to_ascii_lowercase().cmp(&b.path.to_string_lossy().to_ascii_lowercase()))
    });

    scored
}

fn score_candidate(candidate: &Candidate, ctx: &ScoringContext) -> i32 {
    #[cfg(windows)]
    {
        scoring::score_windows(candidate, ctx)
    }
    #[cfg(not(windows))]
    {
        let home = dirs::home_dir();
        let depth = home
            .as_deref()
            .map(|home| super::collector::relative_depth(home, &candidate.path))
            .unwrap_or(0);
        scoring::score_linux(candidate, ctx, depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finder::cancellation::CancellationToken;
    use std::collections::HashMap as Map;
    use tempfile::TempDir;

    fn base_query(game_name: &str) -> Query {
        Query {
            game_name: game_name.to_string(),
            install_dir: None,
            steam_app_id: None,
            steam_userdata_root: None,
            steam_user_id3: None,
            is_steam_game: false,
            other_installed_steam_games: Map::new(),
            cancellation_token: CancellationToken::new(),
        }
    }

    #[test]
    fn empty_game_name_returns_empty_list() {
        let query = base_query("");
        assert!(find(&query).is_empty());
    }

    #[test]
    fn cancellation_before_emission_returns_empty() {
        let mut query = base_query("Some Game");
        query.cancellation_token.cancel();
        assert!(find(&query).is_empty());
    }

    #[test]
    fn results_sorted_by_score_desc_then_path() {
        let dir = TempDir::new().unwrap();
        let mut candidates = Map::new();
        let a = Candidate::new(dir.path().join("a"), "Direct/Documents");
        let b = Candidate::new(dir.path().join("b"), "Direct/Documents");
        std::fs::create_dir_all(dir.path().join("a")).unwrap();
        std::fs::create_dir_all(dir.path().join("b")).unwrap();
        candidates.insert("a".into(), a);
        candidates.insert("b".into(), b);

        let query = base_query("Test");
        let ctx = QueryContext::new(&query);
        let ranked = rank(&ctx, candidates);
        assert_eq!(ranked.len(), 2);
        for window in ranked.windows(2) {
            assert!(
                window[0].score > window[1].score
                    || (window[0].score == window[1].score
                        && window[0].path.to_string_lossy().to_ascii_lowercase()
                            <= window[1].path.to_string_lossy().to_ascii_lowercase())
            );
        }
    }

    #[test]
    fn remotecache_only_directory_rejected() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("remotecache.vdf"), b"x").unwrap();
        assert!(is_remotecache_only(dir.path()));
    }

    #[test]
    fn cross_contamination_rejects_other_games_folder() {
        let mut query = base_query("Factorio");
        query.other_installed_steam_games.insert(
            "12345".to_string(),
            crate::finder::SteamGameRef {
                name: "Rocket League".to_string(),
                install_dir: None,
            },
        );
        let ctx = QueryContext::new(&query);
        let path = Path::new("/home/user/My Games/Rocket League");
        assert!(is_cross_contamination(&ctx, path));
    }

    #[test]
    fn cross_contamination_does_not_self_reject_without_steam_app_id() {
        let mut query = base_query("Factorio");
        query.other_installed_steam_games.insert(
            "67890".to_string(),
            crate::finder::SteamGameRef {
                name: "Factorio".to_string(),
                install_dir: None,
            },
        );
        let ctx = QueryContext::new(&query);
        let path = Path::new("/home/user/My Games/Factorio");
        assert!(!is_cross_contamination(&ctx, path));
    }

    #[test]
    fn directory_root_is_rejected() {
        assert!(is_filesystem_root(Path::new("/")));
    }
}
