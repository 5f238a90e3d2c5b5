//! Save-path finder API exposed to Flutter via FRB.
//!
//! A search is identified by a caller-supplied id, tracked in a module-level
//! `OnceLock<Mutex<..>>` registry, so a long-running scan can be cancelled
//! from Dart while FRB runs `find_save_paths` on its own worker thread.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

use flutter_rust_bridge::frb;

use super::types::{FrbScoredPath, FrbSteamGameRef};
use crate::finder::{CancellationToken, Query};

static ACTIVE_SEARCHES: OnceLock<Mutex<HashMap<String, CancellationToken>>> = OnceLock::new();

fn active_searches() -> &'static Mutex<HashMap<String, CancellationToken>> {
    ACTIVE_SEARCHES.get_or_init(|| Mutex::new(HashMap::new()))
}

/// Input to a save-path search. Plain strings/primitives only, per FRB's
/// FFI boundary constraints (see `api::types` module doc).
#[derive(Debug, Clone, Default)]
pub struct FrbSaveQuery {
    pub game_name: String,
    pub install_dir: Option<String>,
    pub steam_app_id: Option<String>,
    pub steam_userdata_root: Option<String>,
    pub steam_user_id3: Option<String>,
    pub is_steam_game: bool,
    pub other_installed_steam_games: Vec<FrbSteamGameRef>,
}

impl FrbSaveQuery {
    fn into_domain(self, cancellation_token: CancellationToken) -> Query {
        Query {
            game_name: self.game_name,
            install_dir: self.install_dir.map(PathBuf::from),
            steam_app_id: self.steam_app_id,
            steam_userdata_root: self.steam_userdata_root.map(PathBuf::from),
            steam_user_id3: self.steam_user_id3,
            is_steam_game: self.is_steam_game,
            other_installed_steam_games: self
                .other_installed_steam_games
                .into_iter()
                .map(|g| (g.app_id.clone(), g.into()))
                .collect(),
            cancellation_token,
        }
    }
}

/// Runs the heuristic save-path finder. `search_id` must be unique for
/// the lifetime of the search so `cancel_save_path_search` can find it;
/// the caller (Dart side) is responsible for generating it.
pub fn find_save_paths(search_id: String, query: FrbSaveQuery) -> Vec<FrbScoredPath> {
    let token = CancellationToken::new();
    active_searches()
        .lock()
        .unwrap_or_else(|poisoned| {
            log::warn!("active search registry lock poisoned; recovering");
            poisoned.into_inner()
        })
        .insert(search_id.clone(), token.clone());

    let domain_query = query.into_domain(token);
    let results = crate::finder::find(&domain_query);

    active_searches()
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .remove(&search_id);

    results.into_iter().map(FrbScoredPath::from).collect()
}

/// Cancels an in-flight search by id. Returns `false` if no search with
/// that id is currently running (it may have already finished).
#[frb(sync)]
pub fn cancel_save_path_search(search_id: String) -> bool {
    let guard = active_searches().lock().unwrap_or_else(|poisoned| {
        log::warn!("active search registry lock poisoned during cancel; recovering");
        poisoned.into_inner()
    });
    match guard.get(&search_id) {
        Some(token) => {
            token.cancel();
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_game_name_yields_empty_results() {
        let query = FrbSaveQuery::default();
        let results = find_save_paths("test-empty".to_string(), query);
        assert!(results.is_empty());
    }

    #[test]
    fn cancelling_unknown_search_returns_false() {
        assert!(!cancel_save_path_search("does-not-exist".to_string()));
    }
}
