//! String Normalization: `generate_abbreviations`, `are_names_similar`,
//! `matches_initial_sequence` and `clean_for_comparison`.
//!
//! `are_names_similar` uses a `token_set_ratio` rather than a
//! `token_sort_ratio` (see `DESIGN.md` for the reasoning).

use std::collections::BTreeSet;
use std::path::Path;

use crate::config::SIMILARITY_IGNORE_WORDS;

const DEFAULT_FUZZY_THRESHOLD: u8 = 88;
const DEFAULT_MIN_COMMON_WORDS: usize = 2;

fn ignore_words_lower() -> BTreeSet<String> {
    SIMILARITY_IGNORE_WORDS
        .iter()
        .map(|w| w.to_ascii_lowercase())
        .collect()
}

/// Remove `™®©:`, fold `-`/`_` to spaces, collapse whitespace, lowercase.
pub fn clean_for_comparison(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for ch in name.chars() {
        match ch {
            '™' | '®' | '©' | ':' => continue,
            '-' | '_' => out.push(' '),
            other => out.push(other),
        }
    }
    collapse_whitespace(&out).to_lowercase()
}

fn collapse_whitespace(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut last_was_space = false;
    for ch in s.trim().chars() {
        if ch.is_whitespace() {
            if !last_was_space {
                out.push(' ');
            }
            last_was_space = true;
        } else {
            out.push(ch);
            last_was_space = false;
        }
    }
    out
}

/// Tokenize on word boundaries (letters/digits/underscore).
fn word_tokens(s: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    for ch in s.chars() {
        if ch.is_alphanumeric() || ch == '_' {
            current.push(ch);
        } else if !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// Non-ignored tokens of length >= 2, preserving original case/order.
pub fn significant_words(name: &str) -> Vec<String> {
    let ignore = ignore_words_lower();
    word_tokens(name)
        .into_iter()
        .filter(|w| w.len() >= 2 && !ignore.contains(&w.to_ascii_lowercase()))
        .collect()
}

fn acronym_of(words: &[String]) -> Option<String> {
    if words.is_empty() {
        return None;
    }
    let acr: String = words
        .iter()
        .filter_map(|w| w.chars().next())
        .map(|c| c.to_ascii_uppercase())
        .collect();
    if acr.chars().count() >= 2 {
        Some(acr)
    } else {
        None
    }
}

const EXE_STRIP_SUFFIXES: &[&str] = &[
    "-Win64-Shipping.exe",
    "-Win32-Shipping.exe",
    ".exe",
    "-Win64-Shipping",
    "-Win32-Shipping",
    "-Shipping",
];
const EXE_KEYWORD_SUFFIXES: &[&str] = &["launcher", "server", "client", "editor"];

/// Derive an abbreviation from the largest `.exe` found under `install_dir`,
/// stripping shipping/launcher-style suffixes.
fn exe_derived_abbreviation(install_dir: &Path) -> Option<String> {
    let mut best: Option<(u64, String)> = None;
    let mut search_dirs = vec![install_dir.to_path_buf()];
    for sub in ["Binaries/Win64", "bin"] {
        search_dirs.push(install_dir.join(sub));
    }

    for dir in &search_dirs {
        let Ok(entries) = std::fs::read_dir(dir) else {
            continue;
        };
        for entry in entries.filter_map(|e| e.ok()) {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("exe") {
                continue;
            }
            let Ok(meta) = entry.metadata() else { continue };
            let size = meta.len();
            if size <= 100 * 1024 {
                continue;
            }
            let Some(stem) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if best.as_ref().map(|(s, _)| size > *s).unwrap_or(true) {
                best = Some((size, stem.to_string()));
            }
        }
    }

    let (_, mut name) = best?;
    for suffix in EXE_STRIP_SUFFIXES {
        if name.to_ascii_lowercase().ends_with(&suffix.to_ascii_lowercase()) {
            name.truncate(name.len() - suffix.len());
            break;
        }
    }
    name = name.trim_end_matches(['-', '_']).to_string();

    for keyword in EXE_KEYWORD_SUFFIXES {
        if name.to_ascii_lowercase().ends_with(keyword) {
            name.truncate(name.len() - keyword.len());
            break;
        }
    }
    name = name.trim_end_matches(['-', '_']).to_string();

    if name.chars().count() >= 2 {
        Some(name)
    } else {
        None
    }
}

fn looks_like_acronym(word: &str) -> bool {
    word.chars().count() <= 4 || word.chars().all(|c| !c.is_lowercase())
}

fn camel_case_join(words: &[String]) -> String {
    words
        .iter()
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}

/// Generates a deduplicated list of abbreviations, ordered by length
/// descending then alphabetically.
pub fn generate_abbreviations(name: &str, install_dir: Option<&Path>) -> Vec<String> {
    let mut set: BTreeSet<String> = BTreeSet::new();
    if name.trim().is_empty() {
        return Vec::new();
    }

    let cleaned = clean_for_comparison(name);
    let sanitized: String = name
        .chars()
        .filter(|c| !matches!(c, '™' | '®' | '©' | ':'))
        .collect::<String>()
        .trim()
        .to_string();
    let sanitized_nospace: String = sanitized.chars().filter(|c| !c.is_whitespace()).collect();
    let alnum_only: String = sanitized.chars().filter(|c| c.is_alphanumeric()).collect();

    set.insert(cleaned.clone());
    set.insert(sanitized_nospace);
    if !alnum_only.is_empty() {
        set.insert(alnum_only);
    }

    let sig_words = significant_words(&sanitized);
    let sig_words_capitalized: Vec<String> = sig_words
        .iter()
        .filter(|w| w.chars().next().map(|c| c.is_uppercase()).unwrap_or(false))
        .cloned()
        .collect();

    if let Some(acr) = acronym_of(&sig_words) {
        set.insert(acr);
    }
    if let Some(acr) = acronym_of(&sig_words_capitalized) {
        set.insert(acr);
    }

    if let Some((_, after_colon)) = name.split_once(':') {
        let after_colon = after_colon.trim();
        if !after_colon.is_empty() {
            let words_after = significant_words(after_colon);
            let caps_after: Vec<String> = words_after
                .iter()
                .filter(|w| w.chars().next().map(|c| c.is_uppercase()).unwrap_or(false))
                .cloned()
                .collect();
            if let Some(acr) = acronym_of(&caps_after) {
                set.insert(acr);
            }
        }
    }

    if let Some(dir) = install_dir {
        if dir.is_dir() {
            if let Some(exe_abbrev) = exe_derived_abbreviation(dir) {
                set.insert(exe_abbrev);
            }
        }
    }

    // Linux-preferred CamelCase variants.
    if !sig_words.is_empty() {
        set.insert(camel_case_join(&sig_words));
        if let Some(first) = sig_words.first() {
            if looks_like_acronym(first) && sig_words.len() > 1 {
                set.insert(camel_case_join(&sig_words[1..]));
            }
        }
    }

    let mut list: Vec<String> = set.into_iter().filter(|a| a.chars().count() >= 2).collect();
    list.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    list
}

/// Exact uppercase equality of `folder` to the initials of `words`.
pub fn matches_initial_sequence(folder: &str, words: &[String]) -> bool {
    if folder.is_empty() || words.is_empty() {
        return false;
    }
    let expected: String = words
        .iter()
        .filter_map(|w| w.chars().next())
        .map(|c| c.to_ascii_uppercase())
        .collect();
    folder.to_ascii_uppercase() == expected
}

/// Token-set ratio: bag-of-words comparison, 0-100, following the
/// standard thefuzz/rapidfuzz composition (sorted intersection vs. each
/// side's sorted remainder, best pairwise Levenshtein ratio of the three).
pub fn token_set_ratio(a: &str, b: &str) -> u32 {
    let tokens_a: BTreeSet<String> = word_tokens(&a.to_lowercase()).into_iter().collect();
    let tokens_b: BTreeSet<String> = word_tokens(&b.to_lowercase()).into_iter().collect();

    let intersection: Vec<&String> = tokens_a.intersection(&tokens_b).collect();
    let only_a: Vec<&String> = tokens_a.difference(&tokens_b).collect();
    let only_b: Vec<&String> = tokens_b.difference(&tokens_a).collect();

    let sect = join_sorted(&intersection);
    let combined_a = join_sorted_two(&intersection, &only_a);
    let combined_b = join_sorted_two(&intersection, &only_b);

    let r1 = simple_ratio(&sect, &combined_a);
    let r2 = simple_ratio(&sect, &combined_b);
    let r3 = simple_ratio(&combined_a, &combined_b);

    r1.max(r2).max(r3)
}

fn join_sorted(words: &[&String]) -> String {
    let mut v: Vec<&str> = words.iter().map(|s| s.as_str()).collect();
    v.sort_unstable();
    v.join(" ")
}

fn join_sorted_two(a: &[&String], b: &[&String]) -> String {
    let mut v: Vec<&str> = a.iter().chain(b.iter()).map(|s| s.as_str()).collect();
    v.sort_unstable();
    v.join(" ")
}

/// Simple Levenshtein-distance similarity ratio, scaled 0-100, as used by
/// the `ratio()` primitive underlying thefuzz/rapidfuzz's composite ratios.
fn simple_ratio(a: &str, b: &str) -> u32 {
    if a.is_empty() && b.is_empty() {
        return 100;
    }
    let dist = rapidfuzz::distance::levenshtein::distance(a.chars(), b.chars());
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 100;
    }
    let similarity = 1.0 - (dist as f64 / max_len as f64);
    (similarity.max(0.0) * 100.0).round() as u32
}

/// Decision over whether two names refer to the same game.
pub fn are_names_similar(a: &str, b: &str, title_sig_words: Option<&[String]>) -> bool {
    are_names_similar_with(
        a,
        b,
        DEFAULT_MIN_COMMON_WORDS,
        DEFAULT_FUZZY_THRESHOLD,
        title_sig_words,
    )
}

pub fn are_names_similar_with(
    a: &str,
    b: &str,
    min_common_words: usize,
    fuzzy_threshold: u8,
    title_sig_words: Option<&[String]>,
) -> bool {
    let clean_a = clean_for_comparison(a);
    let clean_b = clean_for_comparison(b);

    let ignore = ignore_words_lower();
    let words_a: BTreeSet<String> = word_tokens(&clean_a)
        .into_iter()
        .filter(|w| w.len() > 1 && !ignore.contains(w))
        .collect();
    let words_b: BTreeSet<String> = word_tokens(&clean_b)
        .into_iter()
        .filter(|w| w.len() > 1 && !ignore.contains(w))
        .collect();

    if words_a.intersection(&words_b).count() >= min_common_words {
        return true;
    }

    let nospace_a: String = clean_a.chars().filter(|c| !c.is_whitespace()).collect();
    let nospace_b: String = clean_b.chars().filter(|c| !c.is_whitespace()).collect();
    let min_prefix = (nospace_a.len().min(nospace_b.len()) / 2).max(3);
    if !nospace_a.is_empty() && !nospace_b.is_empty() {
        if nospace_a == nospace_b {
            return true;
        }
        let (shorter, longer) = if nospace_a.len() <= nospace_b.len() {
            (&nospace_a, &nospace_b)
        } else {
            (&nospace_b, &nospace_a)
        };
        if longer.starts_with(shorter.as_str()) && shorter.len() >= min_prefix {
            return true;
        }
    }

    if let Some(words) = title_sig_words {
        if matches_initial_sequence(b, words) {
            return true;
        }
    }

    if fuzzy_threshold as u32 <= 100 {
        let ratio = token_set_ratio(&clean_a, &clean_b);
        if ratio >= fuzzy_threshold as u32 {
            return true;
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_for_comparison_strips_symbols_and_collapses_whitespace() {
        assert_eq!(clean_for_comparison("Foo™: Bar_Baz-Qux"), "foo bar baz qux");
        assert_eq!(clean_for_comparison("  Multi   Space  "), "multi space");
    }

    #[test]
    fn generate_abbreviations_contains_cleaned_name() {
        let abbrevs = generate_abbreviations("Overcooked 2", None);
        assert!(abbrevs.contains(&clean_for_comparison("Overcooked 2")));
    }

    #[test]
    fn generate_abbreviations_grand_theft_auto_v() {
        let abbrevs = generate_abbreviations("Grand Theft Auto: V", None);
        assert!(abbrevs.contains(&"grand theft auto v".to_string()));
        assert!(abbrevs.contains(&"grandtheftautov".to_string()));
        assert!(abbrevs.contains(&"GTAV".to_string()));
        assert!(abbrevs.contains(&"GrandTheftAuto".to_string()));
        assert!(abbrevs.iter().any(|a| a == "gta" || a == "GTA"));
    }

    #[test]
    fn abbreviations_filter_short_entries() {
        let abbrevs = generate_abbreviations("Go", None);
        assert!(abbrevs.iter().all(|a| a.chars().count() >= 2));
    }

    #[test]
    fn matches_initial_sequence_exact() {
        let words = vec!["Metro".to_string(), "Exodus".to_string()];
        assert!(matches_initial_sequence("ME", &words));
        assert!(!matches_initial_sequence("MX", &words));
    }

    #[test]
    fn token_set_ratio_is_order_independent() {
        assert_eq!(token_set_ratio("hello world", "world hello"), 100);
    }

    #[test]
    fn are_names_similar_reflexive() {
        assert!(are_names_similar("Final Fantasy VII", "Final Fantasy VII", None));
    }

    #[test]
    fn are_names_similar_nospace_prefix_rule() {
        assert!(are_names_similar("Overcooked 2", "Overcooked2", None));
    }

    #[test]
    fn are_names_similar_initial_sequence_rule() {
        let title_words = vec!["Metro".to_string(), "Exodus".to_string()];
        assert!(are_names_similar(
            "Metro Exodus",
            "ME",
            Some(&title_words)
        ));
    }

    #[test]
    fn are_names_similar_unrelated_games() {
        assert!(!are_names_similar("Halo", "Call of Duty", None));
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Invariant 6: generate_abbreviations(x, _) always contains clean_for_comparison(x).
        #[test]
        fn abbreviations_always_contain_cleaned_name(name in "[a-zA-Z0-9 ]{1,40}") {
            prop_assume!(!name.trim().is_empty());
            let abbrevs = generate_abbreviations(&name, None);
            prop_assert!(abbrevs.contains(&clean_for_comparison(&name)));
        }

        /// Invariant 7: are_names_similar(a, a, ..) holds for any non-empty a.
        #[test]
        fn similarity_is_reflexive(name in "[a-zA-Z0-9 ]{1,40}") {
            prop_assume!(!name.trim().is_empty());
            prop_assert!(are_names_similar(&name, &name, None));
        }
    }
}
