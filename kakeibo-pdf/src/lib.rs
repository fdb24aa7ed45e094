//! kakeibo-pdf: minimal PDF content-stream text extraction for bank statements.
//!
//! This is not a PDF object model. It inflates content streams found between
//! `stream`/`endstream` markers, pulls literal strings out of the ones that
//! contain text-showing operators, and decodes them through an encoding
//! fallback chain. That is exactly enough to read the text a Prestia
//! statement draws on the page, and nothing more.

pub mod literal;
pub mod stream;
pub mod text;

pub use literal::{escape_literal, parse_literal_strings};
pub use stream::{StreamScan, extract_text_streams};
pub use text::decode_text;

use anyhow::Result;

/// Decoded text recovered from a PDF, one entry per literal string shown.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedText {
    /// Non-empty decoded strings in source order.
    pub lines: Vec<String>,
    /// Streams dropped because they failed to inflate or showed no text.
    pub skipped_streams: usize,
}

/// Run the full extraction pipeline over a raw PDF byte buffer.
pub fn extract_text(pdf: &[u8]) -> Result<ExtractedText> {
    let scan = extract_text_streams(pdf)?;
    let mut lines = Vec::new();
    for stream in &scan.streams {
        for raw in parse_literal_strings(stream) {
            if raw.is_empty() {
                continue;
            }
            lines.push(decode_text(&raw));
        }
    }
    Ok(ExtractedText {
        lines,
        skipped_streams: scan.skipped,
    })
}
