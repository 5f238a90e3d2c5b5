//! PS Vita `param.sfo` decoder.

use std::collections::HashMap;
use std::io::Read;

const MAGIC: &[u8; 4] = b"\x00PSF";
const ENTRY_HEADER_SIZE: usize = 16;
const FMT_UTF8_STRING: u16 = 0x0204;
const FMT_U32: u16 = 0x0404;

/// A single decoded SFO value, typed by its on-disk `data_fmt` tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SfoValue {
    Str(String),
    U32(u32),
    Raw(Vec<u8>),
}

impl SfoValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            SfoValue::Str(s) => Some(s),
            _ => None,
        }
    }
}

/// Decoded title metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SfoSummary {
    pub title: Option<String>,
    pub title_id: Option<String>,
}

/// Decodes every key/value pair in a complete in-memory `param.sfo`
/// buffer. Returns an empty map on bad magic or a truncated header
///.
pub fn decode_entries(bytes: &[u8]) -> HashMap<String, SfoValue> {
    let mut map = HashMap::new();

    if bytes.len() < 20 || &bytes[0..4] != MAGIC {
        log::warn!("sfo: bad file magic, ignoring");
        return map;
    }
    let key_table_offset = read_u32(bytes, 8);
    let data_table_offset = read_u32(bytes, 12);
    let entries_count = read_u32(bytes, 16);

    for i in 0..entries_count {
        let entry_offset = 20 + i as usize * ENTRY_HEADER_SIZE;
        let Some(entry) = bytes.get(entry_offset..entry_offset + ENTRY_HEADER_SIZE) else {
            break;
        };

        let key_offset = u16::from_le_bytes([entry[0], entry[1]]) as usize;
        let data_fmt = u16::from_le_bytes([entry[2], entry[3]]);
        let data_len = u32::from_le_bytes([entry[4], entry[5], entry[6], entry[7]]) as usize;
        let _data_max_len = u32::from_le_bytes([entry[8], entry[9], entry[10], entry[11]]);
        let data_offset = u32::from_le_bytes([entry[12], entry[13], entry[14], entry[15]]) as usize;

        let Some(key) = read_cstring(bytes, key_table_offset as usize + key_offset) else {
            continue;
        };

        let data_start = data_table_offset as usize + data_offset;
        let Some(data) = bytes.get(data_start..data_start + data_len) else {
            continue;
        };

        let value = match data_fmt {
            FMT_UTF8_STRING => {
                let trimmed_end = data.iter().position(|&b| b == 0).unwrap_or(data.len());
                match std::str::from_utf8(&data[..trimmed_end]) {
                    Ok(s) => SfoValue::Str(s.to_string()),
                    Err(_) => continue,
                }
            }
            FMT_U32 if data.len() >= 4 => SfoValue::U32(u32::from_le_bytes([data[0], data[1], data[2], data[3]])),
            _ => SfoValue::Raw(data.to_vec()),
        };

        map.insert(key, value);
    }

    map
}

/// Decodes the title and title-id fields emitted by the emulator adapter
/// contract.
pub fn decode(bytes: &[u8]) -> SfoSummary {
    let entries = decode_entries(bytes);
    let title = entries
        .get("TITLE")
        .or_else(|| entries.get("STITLE"))
        .and_then(|v| v.as_str())
        .map(|s| s.to_string());
    let title_id = entries.get("TITLE_ID").and_then(|v| v.as_str()).map(|s| s.to_string());
    SfoSummary { title, title_id }
}

fn read_u32(bytes: &[u8], offset: usize) -> u32 {
    bytes
        .get(offset..offset + 4)
        .map(|s| u32::from_le_bytes([s[0], s[1], s[2], s[3]]))
        .unwrap_or(0)
}

fn read_cstring(bytes: &[u8], offset: usize) -> Option<String> {
    let slice = bytes.get(offset..)?;
    let mut cursor = std::io::Cursor::new(slice);
    let mut buf = Vec::new();
    let mut byte = [0u8; 1];
    loop {
        if cursor.read_exact(&mut byte).is_err() {
            break;
        }
        if byte[0] == 0 {
            break;
        }
        buf.push(byte[0]);
    }
    String::from_utf8(buf).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build_sfo(entries: &[(&str, u16, &[u8])]) -> Vec<u8> {
        let mut key_table = Vec::new();
        let mut data_table = Vec::new();
        let mut headers = Vec::new();

        for (key, data_fmt, data) in entries {
            let key_offset = key_table.len() as u16;
            key_table.extend_from_slice(key.as_bytes());
            key_table.push(0);

            let data_offset = data_table.len() as u32;
            data_table.extend_from_slice(data);

            headers.extend_from_slice(&key_offset.to_le_bytes());
            headers.extend_from_slice(&data_fmt.to_le_bytes());
            headers.extend_from_slice(&(data.len() as u32).to_le_bytes());
            headers.extend_from_slice(&(data.len() as u32).to_le_bytes());
            headers.extend_from_slice(&data_offset.to_le_bytes());
        }

        let key_table_offset = 20 + headers.len() as u32;
        let data_table_offset = key_table_offset + key_table.len() as u32;

        let mut out = Vec::new();
        out.extend_from_slice(MAGIC);
        out.extend_from_slice(&0u32.to_le_bytes());
        out.extend_from_slice(&key_table_offset.to_le_bytes());
        out.extend_from_slice(&data_table_offset.to_le_bytes());
        out.extend_from_slice(&(entries.len() as u32).to_le_bytes());
        out.extend_from_slice(&headers);
        out.extend_from_slice(&key_table);
        out.extend_from_slice(&data_table);
        out
    }

    #[test]
    fn decode_happy_path() {
        let bytes = build_sfo(&[
            ("TITLE_ID", FMT_UTF8_STRING, b"PCSE00510\0"),
            ("TITLE", FMT_UTF8_STRING, b"Tearaway\0"),
        ]);
        let summary = decode(&bytes);
        assert_eq!(summary.title.as_deref(), Some("Tearaway"));
        assert_eq!(summary.title_id.as_deref(), Some("PCSE00510"));
    }

    #[test]
    fn bad_magic_yields_empty_map() {
        assert!(decode_entries(b"NOPE").is_empty());
    }

    #[test]
    fn u32_field_decodes_numerically() {
        let bytes = build_sfo(&[("PARENTAL_LEVEL", FMT_U32, &1u32.to_le_bytes())]);
        let entries = decode_entries(&bytes);
        assert_eq!(entries.get("PARENTAL_LEVEL"), Some(&SfoValue::U32(1)));
    }

    #[test]
    fn stitle_used_when_title_absent() {
        let bytes = build_sfo(&[("STITLE", FMT_UTF8_STRING, b"Short Title\0")]);
        let summary = decode(&bytes);
        assert_eq!(summary.title.as_deref(), Some("Short Title"));
    }
}
