//! Nintendo Switch control metadata decoder.
//!
//! Extracts the first populated localized title from an in-memory
//! `control.nacp` buffer.

const TITLE_TABLE_OFFSET: usize = 0x3000;
const LANGUAGE_ENTRY_SIZE: usize = 0x200;
const MAX_LANGUAGE_ENTRIES: usize = 16;

const NO_TITLE: &str = "no title";

/// Returns the first non-empty localized title, or `"no title"` if every
/// language slot is empty or the buffer is too short to contain the table.
pub fn decode_title(bytes: &[u8]) -> String {
    for index in 0..MAX_LANGUAGE_ENTRIES {
        let start = TITLE_TABLE_OFFSET + index * LANGUAGE_ENTRY_SIZE;
        let Some(slice) = bytes.get(start..) else {
            break;
        };
        let len = slice.len().min(LANGUAGE_ENTRY_SIZE);
        let entry = &slice[..len];

        let nul_pos = entry.iter().position(|&b| b == 0).unwrap_or(entry.len());
        let Ok(text) = std::str::from_utf8(&entry[..nul_pos]) else {
            continue;
        };
        let trimmed = text.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }
    NO_TITLE.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer_with_title(index: usize, title: &str) -> Vec<u8> {
        let mut bytes = vec![0u8; TITLE_TABLE_OFFSET + MAX_LANGUAGE_ENTRIES * LANGUAGE_ENTRY_SIZE];
        let start = TITLE_TABLE_OFFSET + index * LANGUAGE_ENTRY_SIZE;
        bytes[start..start + title.len()].copy_from_slice(title.as_bytes());
        bytes
    }

    #[test]
    fn empty_buffer_yields_no_title() {
        assert_eq!(decode_title(&[]), NO_TITLE);
    }

    #[test]
    fn first_language_entry_wins() {
        let bytes = buffer_with_title(0, "Super Mario Odyssey");
        assert_eq!(decode_title(&bytes), "Super Mario Odyssey");
    }

    #[test]
    fn falls_through_empty_entries_to_first_populated() {
        let mut bytes = buffer_with_title(3, "Breath of the Wild");
        // Ensure earlier entries are all-zero (already the default).
        let _ = &mut bytes;
        assert_eq!(decode_title(&bytes), "Breath of the Wild");
    }

    #[test]
    fn all_empty_entries_yields_no_title() {
        let bytes = vec![0u8; TITLE_TABLE_OFFSET + MAX_LANGUAGE_ENTRIES * LANGUAGE_ENTRY_SIZE];
        assert_eq!(decode_title(&bytes), NO_TITLE);
    }

    #[test]
    fn short_buffer_yields_no_title() {
        let bytes = vec![0u8; 100];
        assert_eq!(decode_title(&bytes), NO_TITLE);
    }
}
