//! Encoding fallback chain for decoded string bytes.
//!
//! Prestia statements draw text in cp932 (windows-31j). The WHATWG
//! `SHIFT_JIS` decoder covers the cp932 repertoire but is laxer in one spot:
//! it maps a 0x80 lead byte to U+0080 where cp932 rejects it. That laxness
//! would swallow UTF-8 input (whose continuation bytes are often 0x80) as
//! mojibake before the UTF-8 candidate ever runs, so the Shift_JIS candidate
//! is pre-checked to fail on a 0x80 in lead position. Anything no candidate
//! accepts is mapped through Latin-1 so decoding is total: unrecoverable
//! input comes out as visible mojibake instead of an error.

use encoding_rs::{Encoding, SHIFT_JIS, UTF_8};

const CANDIDATES: [&Encoding; 2] = [SHIFT_JIS, UTF_8];

/// Whether every 0x80 byte sits in a double-byte trail position, where cp932
/// assigns real characters (e.g. 0x81 0x80 is ÷). A 0x80 lead is a cp932
/// error even though WHATWG Shift_JIS decodes it to U+0080.
fn shift_jis_lead_bytes_ok(raw: &[u8]) -> bool {
    let mut i = 0;
    while i < raw.len() {
        let b = raw[i];
        if b == 0x80 {
            return false;
        }
        // Double-byte lead: the next byte is a trail, not a lead. Invalid
        // trails (and a lead cut off by end of input) are left for the
        // decoder itself to reject.
        if matches!(b, 0x81..=0x9f | 0xe0..=0xfc) {
            i += 2;
        } else {
            i += 1;
        }
    }
    true
}

/// Decode raw string bytes into text. Never fails.
pub fn decode_text(raw: &[u8]) -> String {
    for encoding in CANDIDATES {
        if encoding == SHIFT_JIS && !shift_jis_lead_bytes_ok(raw) {
            continue;
        }
        if let Some(text) = encoding.decode_without_bom_handling_and_without_replacement(raw) {
            return text.into_owned();
        }
    }
    raw.iter().map(|&b| char::from(b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii() {
        assert_eq!(decode_text(b"STARBUCKS #4410"), "STARBUCKS #4410");
    }

    #[test]
    fn test_shift_jis_katakana() {
        // "スタバ" in Shift_JIS
        let raw = [0x83, 0x58, 0x83, 0x5e, 0x83, 0x6f];
        assert_eq!(decode_text(&raw), "スタバ");
    }

    #[test]
    fn test_windows_31j_extension() {
        // ① (NEC row 13) only exists in the windows-31j superset.
        let raw = [0x87, 0x40];
        assert_eq!(decode_text(&raw), "①");
    }

    #[test]
    fn test_trail_0x80_is_still_shift_jis() {
        // ÷ is 0x81 0x80 in cp932: 0x80 in trail position must not fail the
        // Shift_JIS candidate.
        assert_eq!(decode_text(&[0x81, 0x80]), "÷");
    }

    #[test]
    fn test_utf8_fallback() {
        // "À" is C3 80; a 0x80 lead is a cp932 error, so the chain falls
        // through to UTF-8.
        let text = "\u{c0}vila";
        assert_eq!(decode_text(text.as_bytes()), text);
    }

    #[test]
    fn test_utf8_with_0x80_continuations_reaches_utf8_candidate() {
        // U+4000 is E4 80 80. The WHATWG decoder would happily read
        // "E4 80" as a kanji and "80" as U+0080; the strict pre-check must
        // reject that so the string survives as UTF-8.
        let text = "\u{4000}\u{4000}";
        assert_eq!(decode_text(text.as_bytes()), text);
    }

    #[test]
    fn test_total_fallback_never_fails() {
        // Invalid in both Shift_JIS and UTF-8; Latin-1 maps it byte-for-byte.
        let raw = [0x80, 0xff, 0xfe];
        let decoded = decode_text(&raw);
        assert_eq!(decoded.chars().count(), 3);
        assert_eq!(decoded, "\u{80}\u{ff}\u{fe}");
    }

    #[test]
    fn test_empty() {
        assert_eq!(decode_text(b""), "");
    }
}
