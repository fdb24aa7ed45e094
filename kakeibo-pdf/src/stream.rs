//! Content-stream extraction: locate `stream`/`endstream` ranges and inflate
//! the ones that hold page text.

use anyhow::Result;
use flate2::read::ZlibDecoder;
use regex::bytes::Regex;
use std::io::Read;

/// Result of scanning a PDF for text-bearing content streams.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamScan {
    /// Inflated stream bodies that contain text-showing operators.
    pub streams: Vec<Vec<u8>>,
    /// Candidate ranges dropped: not zlib data (fonts, images) or no text.
    pub skipped: usize,
}

/// Scan a raw PDF buffer for content streams worth tokenizing.
///
/// Ranges that fail to inflate are skipped silently: a statement PDF carries
/// plenty of non-text binary streams and those are not an error. Inflated
/// streams with no ` Tj`/` TJ` operator are skipped too. The skip count is
/// kept so callers can report it.
pub fn extract_text_streams(pdf: &[u8]) -> Result<StreamScan> {
    // Unicode mode must be off: stream bodies are arbitrary bytes, and a
    // Unicode `.` refuses to match invalid UTF-8.
    let stream_re = Regex::new(r"(?s-u)stream\r?\n(.*?)endstream")?;

    let mut streams = Vec::new();
    let mut skipped = 0usize;
    for caps in stream_re.captures_iter(pdf) {
        let body = &caps[1];
        let mut inflated = Vec::new();
        if ZlibDecoder::new(body).read_to_end(&mut inflated).is_err() {
            skipped += 1;
            continue;
        }
        if !contains(&inflated, b" Tj") && !contains(&inflated, b" TJ") {
            skipped += 1;
            continue;
        }
        streams.push(inflated);
    }
    Ok(StreamScan { streams, skipped })
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}
