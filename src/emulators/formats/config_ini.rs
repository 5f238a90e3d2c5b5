//! Text-keyed configuration reader, used by
//! the mGBA adapter to read `config.ini` overrides.

use std::path::PathBuf;

/// A flat `"[section].key" -> value` view over an INI-style document.
pub fn parse(content: &str) -> std::collections::HashMap<String, String> {
    let mut map = std::collections::HashMap::new();
    let mut section = String::new();

    for raw_line in content.lines() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
            continue;
        }
        if let Some(name) = line.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
            section = name.trim().to_string();
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let full_key = if section.is_empty() {
            key.trim().to_string()
        } else {
            format!("[{}].{}", section, key.trim())
        };
        map.insert(full_key, value.trim().to_string());
    }

    map
}

/// The two mGBA overrides read from `[ports.qt]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MgbaOverrides {
    pub save_dir: Option<PathBuf>,
    pub last_directory: Option<PathBuf>,
}

/// Reads `[ports.qt].savedir` and `[ports.qt].lastDirectory`, expanding a
/// leading `~` and discarding values that don't resolve to a directory.
pub fn read_mgba_overrides(content: &str) -> MgbaOverrides {
    let parsed = parse(content);
    MgbaOverrides {
        save_dir: parsed
            .get("[ports.qt].savedir")
            .and_then(|v| expand_and_validate(v)),
        last_directory: parsed
            .get("[ports.qt].lastDirectory")
            .and_then(|v| expand_and_validate(v)),
    }
}

fn expand_and_validate(value: &str) -> Option<PathBuf> {
    if value.is_empty() {
        return None;
    }
    let expanded = if let Some(rest) = value.strip_prefix("~/") {
        dirs::home_dir()?.join(rest)
    } else if value == "~" {
        dirs::home_dir()?
    } else {
        PathBuf::from(value)
    };
    if expanded.is_dir() {
        Some(expanded)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_sectioned_key_value_pairs() {
        let content = "[ports.qt]\nsavedir=/tmp/saves\nlastDirectory=/tmp/last\n";
        let parsed = parse(content);
        assert_eq!(parsed.get("[ports.qt].savedir"), Some(&"/tmp/saves".to_string()));
        assert_eq!(parsed.get("[ports.qt].lastDirectory"), Some(&"/tmp/last".to_string()));
    }

    #[test]
    fn ignores_comments_and_blank_lines() {
        let content = "; comment\n\n[ports.qt]\n# another comment\nsavedir=/tmp\n";
        let parsed = parse(content);
        assert_eq!(parsed.len(), 1);
    }

    #[test]
    fn missing_directory_is_discarded() {
        let content = "[ports.qt]\nsavedir=/this/path/does/not/exist\n";
        let overrides = read_mgba_overrides(content);
        assert_eq!(overrides.save_dir, None);
    }

    #[test]
    fn existing_directory_is_kept() {
        let content = format!("[ports.qt]\nsavedir={}\n", std::env::temp_dir().display());
        let overrides = read_mgba_overrides(&content);
        assert_eq!(overrides.save_dir, Some(std::env::temp_dir()));
    }
}
