//! Data model for the Finder.

use std::collections::{BTreeSet, HashMap};
use std::path::PathBuf;

use super::cancellation::CancellationToken;

/// A Steam game other than the one being searched for, used to reject
/// cross-contamination (a candidate that actually belongs to a different
/// installed game).
#[derive(Debug, Clone)]
pub struct SteamGameRef {
    pub name: String,
    pub install_dir: Option<PathBuf>,
}

/// Input to [`crate::finder::orchestrator::find`].
#[derive(Debug, Clone, Default)]
pub struct Query {
    pub game_name: String,
    pub install_dir: Option<PathBuf>,
    pub steam_app_id: Option<String>,
    pub steam_userdata_root: Option<PathBuf>,
    pub steam_user_id3: Option<String>,
    pub is_steam_game: bool,
    pub other_installed_steam_games: HashMap<String, SteamGameRef>,
    pub cancellation_token: CancellationToken,
}

/// A directory discovered by the collector, with provenance and a
/// precomputed save-evidence hint.
///
/// Candidates are keyed (for deduplication) by normalized lowercase path;
/// this struct carries the original-case path plus everything that
/// accumulates across strategies that rediscover the same path.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub path: PathBuf,
    pub sources: BTreeSet<String>,
    pub has_saves_hint: bool,
}

impl Candidate {
    pub fn new(path: PathBuf, source: impl Into<String>) -> Self {
        let mut sources = BTreeSet::new();
        sources.insert(source.into());
        Self {
            path,
            sources,
            has_saves_hint: false,
        }
    }

    /// Merge another discovery of the same path: sources union, hint ORs.
    pub fn merge(&mut self, source: impl Into<String>, has_saves_hint: bool) {
        self.sources.insert(source.into());
        self.has_saves_hint |= has_saves_hint;
    }
}

/// A scored, ranked output path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredPath {
    pub path: PathBuf,
    pub score: i32,
}
