//! BLE advertising-data (AD structure) parsing.
//!
//! Advertising payloads are a contiguous sequence of `[length][type][value]`
//! elements. This module walks that encoding with explicit bounds checks and
//! extracts the two fields the registry cares about: the local name and the
//! manufacturer-specific data blob. Everything else is skipped.

use std::fmt::Write;

/// Shortened Local Name AD type.
pub const AD_TYPE_SHORT_NAME: u8 = 0x08;
/// Complete Local Name AD type.
pub const AD_TYPE_COMPLETE_NAME: u8 = 0x09;
/// Manufacturer Specific Data AD type.
pub const AD_TYPE_MANUFACTURER_DATA: u8 = 0xFF;

/// Semantic fields extracted from one advertising payload.
///
/// Both fields are `None` when the corresponding AD element is missing or
/// the payload is malformed. Parsing never fails.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AdFields {
    /// Local name (shortened or complete), best-effort UTF-8 decoded.
    pub local_name: Option<String>,
    /// Manufacturer-specific data value, without the AD header.
    pub manufacturer_data: Option<Vec<u8>>,
}

/// Walk the AD structures in `data` and extract recognized fields.
///
/// Only the first occurrence of each recognized AD type is kept. The walk
/// stops at a zero length byte (end of significant data) or at any element
/// whose declared length would read past the end of the buffer; whatever
/// was found up to that point is returned.
pub fn parse_ad_fields(data: &[u8]) -> AdFields {
    let mut fields = AdFields::default();

    let mut i = 0;
    while i < data.len() {
        let length = data[i] as usize;
        if length == 0 {
            break;
        }
        // The type byte plus (length - 1) value bytes must fit in the buffer.
        if i + 1 + length > data.len() {
            break;
        }

        let ad_type = data[i + 1];
        let value = &data[i + 2..i + 1 + length];

        match ad_type {
            AD_TYPE_SHORT_NAME | AD_TYPE_COMPLETE_NAME if fields.local_name.is_none() => {
                fields.local_name = Some(decode_name(value));
            }
            AD_TYPE_MANUFACTURER_DATA if fields.manufacturer_data.is_none() => {
                fields.manufacturer_data = Some(value.to_vec());
            }
            _ => {}
        }

        i += 1 + length;
    }

    fields
}

/// Best-effort UTF-8 decode that drops undecodable byte sequences.
///
/// Device names occasionally arrive truncated mid-codepoint or with stray
/// bytes; those are silently omitted instead of failing the whole frame.
fn decode_name(bytes: &[u8]) -> String {
    let mut name = String::with_capacity(bytes.len());
    let mut rest = bytes;

    loop {
        match std::str::from_utf8(rest) {
            Ok(valid) => {
                name.push_str(valid);
                break;
            }
            Err(err) => {
                let (valid, after) = rest.split_at(err.valid_up_to());
                if let Ok(s) = std::str::from_utf8(valid) {
                    name.push_str(s);
                }
                // error_len is None when the buffer ends mid-codepoint.
                let skip = err.error_len().unwrap_or(after.len());
                rest = &after[skip..];
                if rest.is_empty() {
                    break;
                }
            }
        }
    }

    name
}

/// Render bytes as a lowercase hex string.
pub fn hex_string(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        let _ = write!(out, "{byte:02x}");
    }
    out
}

/// Frame a local name and/or manufacturer data back into AD structures.
///
/// Used by backends that receive already-decoded device properties (BlueZ
/// hands out structured data, not raw frames) so they can feed the same
/// intake path as raw-frame backends, and by tests building fixtures.
pub fn build_ad_buffer(local_name: Option<&str>, manufacturer: Option<(u16, &[u8])>) -> Vec<u8> {
    let mut buf = Vec::new();

    if let Some(name) = local_name {
        // AD length field is one byte; leave room for the type byte.
        let bytes = &name.as_bytes()[..name.len().min(254)];
        buf.push((1 + bytes.len()) as u8);
        buf.push(AD_TYPE_COMPLETE_NAME);
        buf.extend_from_slice(bytes);
    }

    if let Some((company_id, payload)) = manufacturer {
        let payload = &payload[..payload.len().min(252)];
        buf.push((3 + payload.len()) as u8);
        buf.push(AD_TYPE_MANUFACTURER_DATA);
        buf.extend_from_slice(&company_id.to_le_bytes());
        buf.extend_from_slice(payload);
    }

    buf
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_buffer() {
        assert_eq!(parse_ad_fields(&[]), AdFields::default());
    }

    #[test]
    fn test_zero_length_terminates() {
        // Leading zero length ends the walk regardless of trailing bytes.
        let data = [0x00, 0x05, 0x09, b'P', b'i', b'c', b'o'];
        assert_eq!(parse_ad_fields(&data), AdFields::default());
    }

    #[test]
    fn test_complete_local_name() {
        let data = [0x05, 0x09, b'P', b'i', b'c', b'o'];
        let fields = parse_ad_fields(&data);
        assert_eq!(fields.local_name.as_deref(), Some("Pico"));
        assert_eq!(fields.manufacturer_data, None);
    }

    #[test]
    fn test_shortened_local_name() {
        let data = [0x03, 0x08, b'P', b'i'];
        let fields = parse_ad_fields(&data);
        assert_eq!(fields.local_name.as_deref(), Some("Pi"));
    }

    #[test]
    fn test_manufacturer_data() {
        let data = [0x05, 0xFF, 0x4C, 0x00, 0x02, 0x15];
        let fields = parse_ad_fields(&data);
        assert_eq!(fields.local_name, None);
        assert_eq!(fields.manufacturer_data.as_deref(), Some(&[0x4C, 0x00, 0x02, 0x15][..]));
    }

    #[test]
    fn test_both_fields_in_one_frame() {
        let data = [
            0x02, 0x01, 0x06, // Flags, skipped
            0x05, 0x09, b'P', b'i', b'c', b'o', // Complete Local Name
            0x04, 0xFF, 0x4C, 0x00, 0x10, // Manufacturer Specific Data
        ];
        let fields = parse_ad_fields(&data);
        assert_eq!(fields.local_name.as_deref(), Some("Pico"));
        assert_eq!(fields.manufacturer_data.as_deref(), Some(&[0x4C, 0x00, 0x10][..]));
    }

    #[test]
    fn test_first_occurrence_wins() {
        let data = [
            0x03, 0x09, b'o', b'k', // first name
            0x04, 0x09, b'd', b'u', b'p', // second name, ignored
        ];
        let fields = parse_ad_fields(&data);
        assert_eq!(fields.local_name.as_deref(), Some("ok"));
    }

    #[test]
    fn test_unrecognized_types_skipped() {
        let data = [
            0x02, 0x01, 0x06, // Flags
            0x03, 0x03, 0x12, 0x18, // 16-bit Service UUIDs
        ];
        assert_eq!(parse_ad_fields(&data), AdFields::default());
    }

    #[test]
    fn test_overlong_length_stops_safely() {
        // Declared length runs past the buffer end; the element is dropped
        // and what was already found is kept.
        let data = [0x03, 0x08, b'P', b'i', 0x10, 0x09, b'x'];
        let fields = parse_ad_fields(&data);
        assert_eq!(fields.local_name.as_deref(), Some("Pi"));
        assert_eq!(fields.manufacturer_data, None);
    }

    #[test]
    fn test_length_byte_at_end_of_buffer() {
        let fields = parse_ad_fields(&[0x05]);
        assert_eq!(fields, AdFields::default());
    }

    #[test]
    fn test_name_with_invalid_utf8_drops_bad_bytes() {
        let data = [0x07, 0x09, b'P', 0xFF, b'i', 0xFE, b'c', b'o'];
        let fields = parse_ad_fields(&data);
        assert_eq!(fields.local_name.as_deref(), Some("Pico"));
    }

    #[test]
    fn test_name_truncated_mid_codepoint() {
        // 0xC3 starts a two-byte sequence that never completes.
        let data = [0x04, 0x09, b'a', b'b', 0xC3];
        let fields = parse_ad_fields(&data);
        assert_eq!(fields.local_name.as_deref(), Some("ab"));
    }

    #[test]
    fn test_empty_name_element() {
        let data = [0x01, 0x09];
        let fields = parse_ad_fields(&data);
        assert_eq!(fields.local_name.as_deref(), Some(""));
    }

    #[test]
    fn test_hex_string() {
        assert_eq!(hex_string(&[0x4C, 0x00, 0x02, 0x15]), "4c000215");
        assert_eq!(hex_string(&[]), "");
    }

    #[test]
    fn test_build_ad_buffer_parses_back() {
        let buf = build_ad_buffer(Some("Pico"), Some((0x004C, &[0x02, 0x15])));
        let fields = parse_ad_fields(&buf);
        assert_eq!(fields.local_name.as_deref(), Some("Pico"));
        assert_eq!(fields.manufacturer_data.as_deref(), Some(&[0x4C, 0x00, 0x02, 0x15][..]));
    }

    #[test]
    fn test_build_ad_buffer_empty() {
        assert!(build_ad_buffer(None, None).is_empty());
    }
}
