//! PDF literal-string tokenizer.
//!
//! Literal strings are parenthesis-delimited byte strings inside a content
//! stream. Balanced inner parentheses are part of the string; backslash
//! introduces the usual single-character escapes plus 1-3 digit octal byte
//! values. The scanner is tolerant of truncated input: a string cut off by
//! end-of-buffer yields whatever bytes were accumulated.

/// Extract all literal strings from a decompressed content stream, in source
/// order, with escapes resolved to raw bytes. Empty strings are included.
pub fn parse_literal_strings(stream: &[u8]) -> Vec<Vec<u8>> {
    let mut strings = Vec::new();
    let mut i = 0;
    let len = stream.len();
    while i < len {
        if stream[i] != b'(' {
            i += 1;
            continue;
        }
        i += 1;
        let mut buf = Vec::new();
        let mut depth = 1usize;
        while i < len && depth > 0 {
            let c = stream[i];
            match c {
                b'\\' => {
                    i += 1;
                    if i >= len {
                        break;
                    }
                    let esc = stream[i];
                    match esc {
                        b'n' => buf.push(b'\n'),
                        b'r' => buf.push(b'\r'),
                        b't' => buf.push(b'\t'),
                        b'b' => buf.push(0x08),
                        b'f' => buf.push(0x0c),
                        b'\\' | b'(' | b')' => buf.push(esc),
                        b'0'..=b'7' => {
                            // Up to two more octal digits follow the first.
                            let mut value = u32::from(esc - b'0');
                            for _ in 0..2 {
                                match stream.get(i + 1) {
                                    Some(&d) if d.is_ascii_digit() && d < b'8' => {
                                        i += 1;
                                        value = value * 8 + u32::from(d - b'0');
                                    }
                                    _ => break,
                                }
                            }
                            buf.push((value % 256) as u8);
                        }
                        other => buf.push(other),
                    }
                }
                b'(' => {
                    depth += 1;
                    buf.push(c);
                }
                b')' => {
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                    buf.push(c);
                }
                _ => buf.push(c),
            }
            i += 1;
        }
        strings.push(buf);
        i += 1;
    }
    strings
}

/// Encode raw bytes as the body of a PDF literal string, the inverse of
/// [`parse_literal_strings`]. Delimiters and backslashes are escaped, named
/// control characters use their short escapes, and remaining control or
/// DEL bytes are written as 3-digit octal so that any byte string survives a
/// round trip.
pub fn escape_literal(raw: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(raw.len());
    for &b in raw {
        match b {
            b'\\' => out.extend_from_slice(b"\\\\"),
            b'(' => out.extend_from_slice(b"\\("),
            b')' => out.extend_from_slice(b"\\)"),
            b'\n' => out.extend_from_slice(b"\\n"),
            b'\r' => out.extend_from_slice(b"\\r"),
            b'\t' => out.extend_from_slice(b"\\t"),
            0x08 => out.extend_from_slice(b"\\b"),
            0x0c => out.extend_from_slice(b"\\f"),
            0x00..=0x1f | 0x7f => {
                out.push(b'\\');
                out.push(b'0' + (b >> 6));
                out.push(b'0' + ((b >> 3) & 7));
                out.push(b'0' + (b & 7));
            }
            _ => out.push(b),
        }
    }
    out
}
