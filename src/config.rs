//! Compiled-in constant tables driving the finder and emulator adapters.
//!
//! `SIMILARITY_IGNORE_WORDS`, `COMMON_SAVE_EXTENSIONS`, and the other
//! lookups below are plain `&'static` slices rather than a loaded data
//! file, matching the host's preference for const data over an external
//! loader.

/// Words stripped out of a title before acronym/significant-word extraction.
pub const SIMILARITY_IGNORE_WORDS: &[&str] = &[
    "a",
    "an",
    "the",
    "of",
    "and",
    "remake",
    "intergrade",
    "edition",
    "goty",
    "demo",
    "trial",
    "play",
    "launch",
    "definitive",
    "enhanced",
    "complete",
    "collection",
    "hd",
    "ultra",
    "deluxe",
    "game",
    "year",
    "directors",
    "cut",
];

/// Lower-cased file extensions (no leading dot) considered save-file evidence.
pub const COMMON_SAVE_EXTENSIONS: &[&str] = &[
    "sav", "save", "dat", "bin", "srm", "dsv", "mcr", "nba", "profile", "slot", "dbsav", "ess",
    "fos", "sl2", "sko", "gam", "cfg",
];

/// Lower-cased filename substrings considered save-file evidence.
pub const COMMON_SAVE_FILENAMES: &[&str] = &[
    "save", "user", "profile", "settings", "config", "game", "player",
];

/// Directory basenames (case-insensitive) that are conventionally save folders.
pub const COMMON_SAVE_SUBDIRS: &[&str] = &[
    "Saves",
    "Save",
    "SaveGame",
    "SaveGames",
    "Saved",
    "SavedGames",
    "SaveData",
    "save_data",
    "profile",
    "profiles",
    "slot0",
    "Slots",
    "PlayerData",
    "UserData",
    "storage",
    "persistent",
];

/// Publisher/developer names used to recognize "related" Level-1 folders.
pub const COMMON_PUBLISHERS: &[&str] = &[
    "Electronic Arts",
    "EA Games",
    "Ubisoft",
    "Square Enix",
    "Bethesda Softworks",
    "Bethesda",
    "2K Games",
    "Activision",
    "Capcom",
    "Bandai Namco",
    "SEGA",
    "Devolver Digital",
    "CD Projekt Red",
    "Paradox Interactive",
    "Team17",
    "THQ Nordic",
    "Focus Entertainment",
    "Deep Silver",
    "505 Games",
    "Annapurna Interactive",
    "Rockstar Games",
    "Warner Bros",
];

/// Folder basenames (lowercase) that are never descended into or emitted.
pub const BANNED_FOLDER_NAMES_LOWER: &[&str] = &[
    "windows",
    "program files",
    "program files (x86)",
    "programdata",
    "system32",
    "syswow64",
    "$recycle.bin",
    "system volume information",
    "microsoft",
    "nvidia corporation",
    "intel",
    "amd",
    "google",
    "mozilla",
    "steam",
    "vortex",
    "soundtrack",
    "artbook",
    "extras",
    "dlc",
    "ost",
    "common files",
    "internet explorer",
    "drivers",
    "perflogs",
    "dell",
    "hp",
    "lenovo",
    "avast software",
    "avg",
    "kaspersky lab",
    "mcafee",
    "adobe",
    "python",
    "java",
    "oracle",
    "config.msi",
    "default",
    "all users",
    "public",
];

/// `(label, path-with-tilde)` pairs making up the Linux XDG/known-location table.
pub const LINUX_KNOWN_SAVE_LOCATIONS: &[(&str, &str)] = &[
    ("XDG_CONFIG_HOME", "~/.config"),
    ("XDG_DATA_HOME", "~/.local/share"),
    ("Flatpak/app-data", "~/.var/app"),
    ("Wine-Home", "~/.wine/drive_c/users"),
];

/// Path fragments relative to a Proton prefix root (`.../pfx`) that are
/// plausible Windows save locations inside the emulated user profile.
pub const PROTON_USER_PATH_FRAGMENTS: &[&str] = &[
    "drive_c/users/steamuser/AppData/Roaming",
    "drive_c/users/steamuser/AppData/Local",
    "drive_c/users/steamuser/AppData/LocalLow",
    "drive_c/users/steamuser/Documents",
    "drive_c/users/steamuser/Documents/My Games",
    "drive_c/users/steamuser/Saved Games",
];

/// Plausible Steam install roots to probe for a Proton `compatdata` tree on Linux.
pub const LINUX_STEAM_ROOTS: &[&str] = &[
    "~/.steam/steam",
    "~/.local/share/Steam",
    "~/.var/app/com.valvesoftware.Steam/.local/share/Steam",
    "~/.var/app/com.valvesoftware.Steam/.steam/steam",
];

/// `(keyword, EmulatorKind)` dispatch table: matched against the lowercased
/// target path by [`crate::emulators::detect_and_find_profiles`].
pub const EMULATOR_KEYWORDS: &[(&str, crate::emulators::EmulatorKind)] = &[
    ("ryujinx", crate::emulators::EmulatorKind::Ryujinx),
    ("yuzu", crate::emulators::EmulatorKind::Yuzu),
    ("vita3k", crate::emulators::EmulatorKind::Vita3k),
    ("desmume", crate::emulators::EmulatorKind::DeSmuME),
    ("mgba", crate::emulators::EmulatorKind::MGba),
    ("snes9x", crate::emulators::EmulatorKind::Snes9x),
    ("sameboy", crate::emulators::EmulatorKind::SameBoy),
    ("gopher64", crate::emulators::EmulatorKind::Gopher64),
    ("xenia", crate::emulators::EmulatorKind::Xenia),
    ("pcsx2", crate::emulators::EmulatorKind::Pcsx2),
    ("flycast", crate::emulators::EmulatorKind::Flycast),
    ("minecraft", crate::emulators::EmulatorKind::Minecraft),
];

/// Case-insensitive check against [`BANNED_FOLDER_NAMES_LOWER`].
pub fn is_banned_folder_name(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    BANNED_FOLDER_NAMES_LOWER.contains(&lower.as_str())
}

/// Case-insensitive check against [`COMMON_SAVE_SUBDIRS`].
pub fn is_common_save_subdir(name: &str) -> bool {
    COMMON_SAVE_SUBDIRS
        .iter()
        .any(|s| s.eq_ignore_ascii_case(name))
}

/// Case-insensitive check against [`COMMON_PUBLISHERS`].
pub fn is_known_publisher(name: &str) -> bool {
    COMMON_PUBLISHERS.iter().any(|p| p.eq_ignore_ascii_case(name))
}
