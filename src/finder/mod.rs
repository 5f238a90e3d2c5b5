//! Heuristic save-path finder.

pub mod cancellation;
pub mod collector;
pub mod inspector;
pub mod normalize;
pub mod orchestrator;
pub mod query;
pub mod scoring;

pub use cancellation::CancellationToken;
pub use orchestrator::find;
pub use query::{Candidate, Query, ScoredPath, SteamGameRef};

/// Recursion bounds for the Linux collector, surfaced explicitly on
/// `QueryContext` so every call site states its depth/width limits instead
/// of inheriting an implicit default.
#[derive(Debug, Clone, Copy)]
pub struct LinuxCollectorLimits {
    pub max_items_per_dir: usize,
    pub shallow_depth: u32,
    pub proton_recursion_depth: u32,
    pub xdg_recursion_depth: u32,
    pub install_dir_depth: u32,
}

impl Default for LinuxCollectorLimits {
    fn default() -> Self {
        Self {
            max_items_per_dir: 50,
            shallow_depth: 1,
            proton_recursion_depth: 7,
            xdg_recursion_depth: 4,
            install_dir_depth: 4,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct WindowsCollectorLimits {
    pub install_dir_depth: u32,
    pub fuzzy_threshold_install_dir: u8,
}

impl WindowsCollectorLimits {
    pub fn new() -> Self {
        Self {
            install_dir_depth: 3,
            fuzzy_threshold_install_dir: 85,
        }
    }
}

/// Everything a collector/scoring call needs about the current query,
/// computed once and threaded explicitly through calls rather than read
/// off shared mutable state.
pub struct QueryContext<'a> {
    pub query: &'a query::Query,
    pub cleaned_game_name: String,
    pub abbreviations: Vec<String>,
    pub abbreviations_lower: Vec<String>,
    pub significant_title_words: Vec<String>,
    pub cancellation_token: cancellation::CancellationToken,
}

impl<'a> QueryContext<'a> {
    pub fn new(query: &'a query::Query) -> Self {
        let sanitized_name: String = query
            .game_name
            .chars()
            .filter(|c| !matches!(c, '™' | '®' | '©' | ':'))
            .collect();
        let cleaned_game_name = normalize::clean_for_comparison(&sanitized_name);
        // Pass the raw name, not `sanitized_name`: `generate_abbreviations`
        // derives an acronym from the words after a colon, so it needs to see
        // the colon itself. It sanitizes internally before deriving the rest.
        let abbreviations = normalize::generate_abbreviations(
            &query.game_name,
            query.install_dir.as_deref(),
        );
        let abbreviations_lower = abbreviations.iter().map(|a| a.to_ascii_lowercase()).collect();
        let significant_title_words = normalize::significant_words(&sanitized_name);

        Self {
            query,
            cleaned_game_name,
            abbreviations,
            abbreviations_lower,
            significant_title_words,
            cancellation_token: query.cancellation_token.clone(),
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancellation_token.is_cancelled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colon_acronym_reaches_query_context() {
        let query = query::Query {
            game_name: "Command: Modern Operations".to_string(),
            ..Default::default()
        };
        let ctx = QueryContext::new(&query);
        assert!(
            ctx.abbreviations.contains(&"MO".to_string()),
            "{:?}",
            ctx.abbreviations
        );
    }
}
