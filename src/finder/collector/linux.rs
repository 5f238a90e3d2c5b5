//! Linux Candidate Collector strategies.

use std::path::PathBuf;

use crate::config::{self, LINUX_KNOWN_SAVE_LOCATIONS, LINUX_STEAM_ROOTS, PROTON_USER_PATH_FRAGMENTS};
use crate::finder::collector::{is_potential_save_dir, list_subdirs};
use crate::finder::normalize::are_names_similar_with;
use crate::finder::{LinuxCollectorLimits, QueryContext};

/// Explicit DFS stack entry replacing recursive "check parent, check
/// child" calls: each entry carries whether its parent was
/// already judged "related to the target", so Level-1/Level-2
/// relatedness threads downward without rereading ancestor names.
struct DfsEntry {
    path: PathBuf,
    depth: u32,
    parent_related: bool,
}

pub fn collect(ctx: &QueryContext, emit: &mut dyn FnMut(PathBuf, String)) {
    let limits = LinuxCollectorLimits::default();

    if ctx.is_cancelled() {
        return;
    }
    steam_userdata(ctx, emit);

    if ctx.is_cancelled() {
        return;
    }
    proton_compatdata(ctx, emit, &limits);

    if ctx.is_cancelled() {
        return;
    }
    xdg_and_known_locations(ctx, emit, &limits);

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
        let is_known_subdir = config::is_common_save_subdir(&name);
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

fn expand_tilde(path: &str) -> Option<PathBuf> {
    if let Some(rest) = path.strip_prefix("~/") {
        dirs::home_dir().map(|home| home.join(rest))
    } else if path == "~" {
        dirs::home_dir()
    } else {
        Some(PathBuf::from(path))
    }
}

fn proton_compatdata(ctx: &QueryContext, emit: &mut dyn FnMut(PathBuf, String), limits: &LinuxCollectorLimits) {
    let Some(app_id) = ctx.query.steam_app_id.as_ref() else {
        return;
    };

    for steam_root in LINUX_STEAM_ROOTS {
        let Some(steam_base) = expand_tilde(steam_root) else {
            continue;
        };
        let pfx = steam_base
            .join("steamapps")
            .join("compatdata")
            .join(app_id)
            .join("pfx");
        if !pfx.is_dir() {
            continue;
        }

        emit(pfx.clone(), "ProtonPfx/base".to_string());

        for fragment in PROTON_USER_PATH_FRAGMENTS {
            let candidate = pfx.join(fragment);
            if candidate.is_dir() {
                emit(candidate.clone(), "ProtonPfx/fragment".to_string());
                recurse(
                    ctx,
                    emit,
                    &candidate,
                    1,
                    limits.proton_recursion_depth,
                    true,
                    "ProtonPfx",
                    limits,
                );
            }
        }
    }
}

fn xdg_and_known_locations(
    ctx: &QueryContext,
    emit: &mut dyn FnMut(PathBuf, String),
    limits: &LinuxCollectorLimits,
) {
    for (label, base_path) in LINUX_KNOWN_SAVE_LOCATIONS {
        let Some(base) = expand_tilde(base_path) else {
            continue;
        };
        if !base.is_dir() {
            continue;
        }

        for abbrev in &ctx.abbreviations {
            let direct = base.join(abbrev);
            if direct.is_dir() {
                emit(direct, format!("{label}/Direct"));
            }
        }

        let provenance: &'static str = match *label {
            "XDG_CONFIG_HOME" => "XDG_CONFIG",
            "XDG_DATA_HOME" => "XDG_DATA",
            _ => "XDG_DATA",
        };

        recurse(
            ctx,
            emit,
            &base,
            0,
            limits.xdg_recursion_depth,
            false,
            provenance,
            limits,
        );
    }
}

fn install_dir_walk(ctx: &QueryContext, emit: &mut dyn FnMut(PathBuf, String), limits: &LinuxCollectorLimits) {
    let Some(install_dir) = ctx.query.install_dir.as_ref() else {
        return;
    };
    if !install_dir.is_dir() {
        return;
    }
    recurse(
        ctx,
        emit,
        install_dir,
        0,
        limits.install_dir_depth,
        false,
        "InstallDirWalk",
        limits,
    );
}

/// Bounded DFS with the two-tier "strong recursion" vs. "shallow
/// exploration" policy.
fn recurse(
    ctx: &QueryContext,
    emit: &mut dyn FnMut(PathBuf, String),
    root: &std::path::Path,
    start_depth: u32,
    max_depth: u32,
    start_related: bool,
    provenance: &str,
    limits: &LinuxCollectorLimits,
) {
    let mut stack = vec![DfsEntry {
        path: root.to_path_buf(),
        depth: start_depth,
        parent_related: start_related,
    }];

    while let Some(entry) = stack.pop() {
        if ctx.is_cancelled() {
            return;
        }
        if entry.depth >= max_depth {
            continue;
        }

        for (name, path) in list_subdirs(&entry.path, limits.max_items_per_dir) {
            let name_similar = are_names_similar_with(
                &ctx.query.game_name,
                &name,
                2,
                88,
                Some(&ctx.significant_title_words),
            );
            let is_publisher = config::is_known_publisher(&name);
            let is_potential_save = is_potential_save_dir(&name, &path);
            let abbrev_hit_if_related = entry.parent_related
                && ctx
                    .abbreviations_lower
                    .iter()
                    .any(|a| *a == name.to_ascii_lowercase());

            let strong = name_similar || is_publisher || is_potential_save || abbrev_hit_if_related;

            if strong || config::is_common_save_subdir(&name) {
                emit(path.clone(), provenance.to_string());
            }

            if strong {
                stack.push(DfsEntry {
                    path,
                    depth: entry.depth + 1,
                    parent_related: true,
                });
            } else if entry.depth < limits.shallow_depth.saturating_add(start_depth) {
                stack.push(DfsEntry {
                    path,
                    depth: entry.depth + 1,
                    parent_related: false,
                });
            }
        }
    }
}
