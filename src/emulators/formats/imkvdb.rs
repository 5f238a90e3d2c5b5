//! Nintendo Switch save-index binary decoder.
//!
//! Maps `SaveDataID -> ProgramID` (both as 16-char uppercase hex) by
//! reading `bis/system/save/8000000000000000/0/imkvdb.arc`.

use std::collections::HashMap;
use std::io::Read;

const HEADER_MAGIC: &[u8; 4] = b"IMKV";
const ENTRY_MAGIC: &[u8; 4] = b"IMEN";
const EXPECTED_BLOCK_SIZE: i32 = 64;
const SKIP_SANITY_CEILING: i32 = 1024;

/// Decodes a complete in-memory IMKVDB buffer. Total: never panics, and
/// returns whatever was assembled before truncation or a size so mangled
/// recovery isn't possible.
pub fn decode(bytes: &[u8]) -> HashMap<String, String> {
    let mut map = HashMap::new();
    let mut cursor = std::io::Cursor::new(bytes);

    let mut header = [0u8; 12];
    if cursor.read_exact(&mut header).is_err() {
        return map;
    }
    if &header[0..4] != HEADER_MAGIC {
        log::warn!("imkvdb: bad file magic, ignoring");
        return map;
    }
    let entry_count = i32::from_le_bytes([header[8], header[9], header[10], header[11]]);
    if entry_count < 0 {
        return map;
    }

    for _ in 0..entry_count {
        let mut entry_header = [0u8; 12];
        if cursor.read_exact(&mut entry_header).is_err() {
            break;
        }
        let magic_ok = &entry_header[0..4] == ENTRY_MAGIC;
        let key_size = i32::from_le_bytes([entry_header[4], entry_header[5], entry_header[6], entry_header[7]]);
        let value_size = i32::from_le_bytes([entry_header[8], entry_header[9], entry_header[10], entry_header[11]]);

        if !magic_ok {
            log::warn!("imkvdb: entry magic mismatch, attempting recovery");
            if skip(&mut cursor, (EXPECTED_BLOCK_SIZE * 2) as usize).is_err() {
                break;
            }
            continue;
        }

        if key_size != EXPECTED_BLOCK_SIZE || value_size != EXPECTED_BLOCK_SIZE {
            log::warn!("imkvdb: entry size mismatch (key={key_size}, value={value_size})");
            let skip_key = key_size.max(EXPECTED_BLOCK_SIZE).clamp(0, SKIP_SANITY_CEILING);
            let skip_value = value_size.max(EXPECTED_BLOCK_SIZE).clamp(0, SKIP_SANITY_CEILING);
            if skip(&mut cursor, (skip_key + skip_value) as usize).is_err() {
                break;
            }
            continue;
        }

        let mut key_block = [0u8; EXPECTED_BLOCK_SIZE as usize];
        let mut value_block = [0u8; EXPECTED_BLOCK_SIZE as usize];
        if cursor.read_exact(&mut key_block).is_err() {
            break;
        }
        if cursor.read_exact(&mut value_block).is_err() {
            break;
        }

        let program_id = u64::from_le_bytes(key_block[0..8].try_into().unwrap());
        let save_data_id = u64::from_le_bytes(value_block[0..8].try_into().unwrap());

        map.insert(format!("{save_data_id:016X}"), format!("{program_id:016X}"));
    }

    map
}

fn skip(cursor: &mut std::io::Cursor<&[u8]>, n: usize) -> std::io::Result<()> {
    let mut remaining = n;
    let mut buf = [0u8; 256];
    while remaining > 0 {
        let chunk = remaining.min(buf.len());
        cursor.read_exact(&mut buf[..chunk])?;
        remaining -= chunk;
    }
    Ok(())
}

/// Encodes a synthetic index for round-trip testing.
#[cfg(test)]
fn encode(entries: &[(u64, u64)]) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(HEADER_MAGIC);
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&(entries.len() as i32).to_le_bytes());
    for (program_id, save_data_id) in entries {
        out.extend_from_slice(ENTRY_MAGIC);
        out.extend_from_slice(&EXPECTED_BLOCK_SIZE.to_le_bytes());
        out.extend_from_slice(&EXPECTED_BLOCK_SIZE.to_le_bytes());

        let mut key_block = [0u8; EXPECTED_BLOCK_SIZE as usize];
        key_block[0..8].copy_from_slice(&program_id.to_le_bytes());
        out.extend_from_slice(&key_block);

        let mut value_block = [0u8; EXPECTED_BLOCK_SIZE as usize];
        value_block[0..8].copy_from_slice(&save_data_id.to_le_bytes());
        out.extend_from_slice(&value_block);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_buffer_yields_empty_map() {
        assert!(decode(&[]).is_empty());
    }

    #[test]
    fn bad_header_magic_yields_empty_map() {
        let bytes = b"NOPE0000000000000".to_vec();
        assert!(decode(&bytes).is_empty());
    }

    #[test]
    fn round_trip_n_entries() {
        let entries: Vec<(u64, u64)> = (0..5)
            .map(|i| (0x0100000000010000u64 + i, 0x0000ABCDEF012345u64 + i))
            .collect();
        let bytes = encode(&entries);
        let decoded = decode(&bytes);

        assert_eq!(decoded.len(), entries.len());
        for (program_id, save_data_id) in &entries {
            let key = format!("{save_data_id:016X}");
            let value = format!("{program_id:016X}");
            assert_eq!(decoded.get(&key), Some(&value));
        }
    }

    #[test]
    fn truncated_entry_returns_partial_map() {
        let bytes = encode(&[(0x01, 0x02), (0x03, 0x04)]);
        let truncated = &bytes[..bytes.len() - 10];
        let decoded = decode(truncated);
        assert_eq!(decoded.len(), 1);
    }

    #[test]
    fn entry_magic_mismatch_is_skipped_and_recovers() {
        let mut bytes = encode(&[(0x01, 0x02), (0x03, 0x04)]);
        // Corrupt the first entry's magic in place; size fields still line
        // up so the recovery skip lands exactly on the next entry header.
        bytes[12] = b'X';
        let decoded = decode(&bytes);
        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded.get("0000000000000004"), Some(&"0000000000000003".to_string()));
    }
}
