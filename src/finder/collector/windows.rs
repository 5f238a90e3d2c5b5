//! Windows Candidate Collector strategies.

use std::path::{Path, PathBuf};

use crate::config::{self, COMMON_PUBLISHERS, COMMON_SAVE_SUBDIRS};
use crate::finder::collector::list_subdirs;
use crate::finder::normalize::are_names_similar_with;
use crate::finder::{QueryContext, WindowsCollectorLimits};

/// Emits `(path, provenance)` pairs across all Windows strategies in a
/// fixed order. Checks cancellation before every directory descent.
pub fn collect(ctx: &QueryContext, emit: &mut dyn FnMut(PathBuf, String)) {
    let limits = WindowsCollectorLimits::new();

    if ctx.is_cancelled() {
        return;
    }
    steam_userdata(ctx, emit);

    if ctx.is_cancelled() {
        return;
    }
    direct_name_injection(ctx, emit);

    if ctx.is_cancelled() {
        return;
    }
    exploratory_walk(ctx, emit);

    if ctx.is_cancelled() {
        return;
    }
    install_dir_walk(ctx, emit, &limits);
}

fn steam_userdata(ctx: &QueryContext, emit: &mut dyn FnMut(PathBuf, String)) {
    let (Some(root), Some(id3), Some(app_id)) = (
        ctx.query.steam_userdata_root.as_ref(),
        ctx.query.steam_user_id3.as_ref(),
        ctx.query.steam_app_id.as_ref(),
    ) else {
        return;
    };

    let base = root.join(id3).join(app_id);
    emit(base.clone(), "SteamUserdata/base".to_string());

    let remote = base.join("remote");
    emit(remote.clone(), "SteamUserdata/remote".to_string());

    for (name, path) in list_subdirs(&remote, usize::MAX) {
        let is_known_subdir = COMMON_SAVE_SUBDIRS.iter().any(|s| s.eq_ignore_ascii_case(&name));
        let name_similar = are_names_similar_with(
            &ctx.query.game_name,
            &name,
            2,
            88,
            Some(&ctx.significant_title_words),
        );
        if is_known_subdir || name_similar {
            emit(path, "SteamUserdata/remote/child".to_string());
        }
    }
}

fn prime_user_locations() -> Vec<(&'static str, PathBuf)> {
    let mut locations = Vec::new();
    let home = dirs::home_dir();
    let documents = dirs::document_dir();

    if let Some(home) = &home {
        locations.push(("SavedGames", home.join("Saved Games")));
    }
    if let Some(docs) = &documents {
        locations.push(("Documents", docs.clone()));
        locations.push(("MyGames", docs.join("My Games")));
    }
    if let Ok(appdata) = std::env::var("APPDATA") {
        locations.push(("AppDataRoaming", PathBuf::from(appdata)));
    }
    if let Ok(local) = std::env::var("LOCALAPPDATA") {
        locations.push(("AppDataLocal", PathBuf::from(&local)));
        if let Some(parent) = Path::new(&local).parent() {
            locations.push(("AppDataLocalLow", parent.join("LocalLow")));
        }
    }
    if let Ok(public) = std::env::var("PUBLIC") {
        locations.push(("PublicDocuments", PathBuf::from(public).join("Documents")));
    }
    if let Ok(program_data) = std::env::var("ProgramData") {
        locations.push(("ProgramData", PathBuf::from(program_data)));
    }

    locations
}

fn direct_name_injection(ctx: &QueryContext, emit: &mut dyn FnMut(PathBuf, String)) {
    for (label, location) in prime_user_locations() {
        if !location.is_dir() {
            continue;
        }
        for abbrev in &ctx.abbreviations {
            let direct = location.join(abbrev);
            emit(direct, format!("Direct/{label}"));

            for publisher in COMMON_PUBLISHERS {
                let via_publisher = location.join(publisher).join(abbrev);
                emit(via_publisher, format!("Direct/{label}/Publisher"));
            }

            for save_subdir in COMMON_SAVE_SUBDIRS {
                let with_subdir = location.join(abbrev).join(save_subdir);
                emit(with_subdir, format!("Direct/{label}/SaveSubdir"));
            }
        }
    }
}

fn exploratory_walk(ctx: &QueryContext, emit: &mut dyn FnMut(PathBuf, String)) {
    for (label, location) in prime_user_locations() {
        if ctx.is_cancelled() {
            return;
        }
        if !location.is_dir() {
            continue;
        }

        for (lvl1_name, lvl1_path) in list_subdirs(&location, usize::MAX) {
            if ctx.is_cancelled() {
                return;
            }

            let lvl1_is_publisher = config::is_known_publisher(&lvl1_name);
            let lvl1_name_similar = are_names_similar_with(
                &ctx.query.game_name,
                &lvl1_name,
                2,
                88,
                Some(&ctx.significant_title_words),
            );
            let lvl1_game_match = lvl1_name_similar;
            let lvl1_related = lvl1_is_publisher || lvl1_name_similar || lvl1_game_match;

            if lvl1_game_match {
                emit(lvl1_path.clone(), format!("GameNameLvl1/{label}"));
            }

            for (lvl2_name, lvl2_path) in list_subdirs(&lvl1_path, usize::MAX) {
                let lvl2_name_similar = are_names_similar_with(
                    &ctx.query.game_name,
                    &lvl2_name,
                    2,
                    88,
                    Some(&ctx.significant_title_words),
                );
                let lvl2_abbrev_hit = ctx
                    .abbreviations_lower
                    .iter()
                    .any(|a| *a == lvl2_name.to_ascii_lowercase());

                let lvl2_qualifies = if lvl1_related {
                    lvl2_name_similar || lvl2_abbrev_hit
                } else {
                    lvl2_name_similar
                };

                let lvl2_save_subdir_under_publisher =
                    COMMON_SAVE_SUBDIRS.iter().any(|s| s.eq_ignore_ascii_case(&lvl2_name))
                        && lvl1_is_publisher;

                if lvl2_qualifies {
                    emit(lvl2_path.clone(), format!("GameNameLvl2/{label}"));
                }

                if lvl2_save_subdir_under_publisher {
                    emit(lvl2_path.clone(), format!("GameNameLvl2/{label}/SaveSubdir"));

                    for (lvl3_name, lvl3_path) in list_subdirs(&lvl2_path, usize::MAX) {
                        if COMMON_SAVE_SUBDIRS.iter().any(|s| s.eq_ignore_ascii_case(&lvl3_name)) {
                            emit(lvl3_path, format!("GameNameLvl3/{label}"));
                        }
                    }
                }
            }
        }
    }
}

fn install_dir_walk(
    ctx: &QueryContext,
    emit: &mut dyn FnMut(PathBuf, String),
    limits: &WindowsCollectorLimits,
) {
    let Some(install_dir) = ctx.query.install_dir.as_ref() else {
        return;
    };
    if !install_dir.is_dir() {
        return;
    }

    let mut stack: Vec<(PathBuf, u32)> = vec![(install_dir.clone(), 0)];
    while let Some((dir, depth)) = stack.pop() {
        if ctx.is_cancelled() {
            return;
        }
        if depth >= limits.install_dir_depth {
            continue;
        }

        for (name, path) in list_subdirs(&dir, usize::MAX) {
            let is_save_subdir = COMMON_SAVE_SUBDIRS.iter().any(|s| s.eq_ignore_ascii_case(&name));
            let abbrev_hit = ctx.abbreviations_lower.iter().any(|a| *a == name.to_ascii_lowercase());
            let fuzzy_hit = {
                let cleaned_name = super::super::normalize::clean_for_comparison(&name);
                super::super::normalize::token_set_ratio(&ctx.cleaned_game_name, &cleaned_name)
                    >= limits.fuzzy_threshold_install_dir as u32
            };

            if is_save_subdir || abbrev_hit || fuzzy_hit {
                emit(path.clone(), "InstallDirWalk".to_string());
            }

            stack.push((path, depth + 1));
        }
    }
}
