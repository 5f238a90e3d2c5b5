//! Content Inspector: bounded directory scan for save-like evidence.

use std::path::Path;

use crate::config::{COMMON_SAVE_EXTENSIONS, COMMON_SAVE_FILENAMES};

const MAX_ENTRIES_SCANNED: usize = 100;
pub const MULTIPLE_EVIDENCE_THRESHOLD: usize = 2;

/// Result of scanning a directory for save-like files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Inspection {
    pub has_save_evidence: bool,
    pub match_count: usize,
}

impl Inspection {
    pub fn has_multiple_evidence(&self) -> bool {
        self.match_count >= MULTIPLE_EVIDENCE_THRESHOLD
    }
}

/// Lists up to [`MAX_ENTRIES_SCANNED`] entries and flags regular files whose
/// extension or filename substring matches the configured save tables.
/// Access errors are logged and treated as "no evidence".
pub fn inspect(dir: &Path) -> Inspection {
    let entries = match std::fs::read_dir(dir) {
        Ok(e) => e,
        Err(e) => {
            log::warn!("inspect: cannot read directory {}: {e}", dir.display());
            return Inspection::default();
        }
    };

    let mut match_count = 0usize;
    for entry in entries.take(MAX_ENTRIES_SCANNED).filter_map(|e| e.ok()) {
        let is_file = entry.file_type().map(|t| t.is_file()).unwrap_or(false);
        if !is_file {
            continue;
        }
        let file_name = entry.file_name();
        let name_lower = file_name.to_string_lossy().to_ascii_lowercase();

        let ext_hit = entry
            .path()
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase())
            .map(|ext| COMMON_SAVE_EXTENSIONS.contains(&ext.as_str()))
            .unwrap_or(false);

        let name_hit = COMMON_SAVE_FILENAMES
            .iter()
            .any(|needle| name_lower.contains(needle));

        if ext_hit || name_hit {
            match_count += 1;
        }
    }

    Inspection {
        has_save_evidence: match_count > 0,
        match_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn empty_directory_has_no_evidence() {
        let dir = TempDir::new().unwrap();
        let result = inspect(dir.path());
        assert!(!result.has_save_evidence);
        assert_eq!(result.match_count, 0);
    }

    #[test]
    fn extension_match_counts_as_evidence() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("slot1.sav"), b"data").unwrap();
        let result = inspect(dir.path());
        assert!(result.has_save_evidence);
        assert_eq!(result.match_count, 1);
    }

    #[test]
    fn filename_substring_match_counts_as_evidence() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("player_settings.bin"), b"data").unwrap();
        let result = inspect(dir.path());
        assert!(result.has_save_evidence);
    }

    #[test]
    fn multiple_evidence_threshold() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("a.sav"), b"1").unwrap();
        std::fs::write(dir.path().join("b.sav"), b"2").unwrap();
        let result = inspect(dir.path());
        assert!(result.has_multiple_evidence());
    }

    #[test]
    fn nonexistent_directory_is_not_an_error() {
        let result = inspect(Path::new("/does/not/exist/at/all"));
        assert!(!result.has_save_evidence);
    }
}
