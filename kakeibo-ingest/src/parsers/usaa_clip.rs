//! USAA web-UI clipboard matcher.
//!
//! Selecting the transaction table in the USAA site and pasting it yields
//! three lines per transaction: "Mon DD, YYYY<TAB>MERCHANT", the USAA
//! category, then the dollar amount. Column-header lines survive the paste
//! and are filtered before matching. The matcher walks in a fixed stride of
//! three; a triplet whose first line has no date is dropped without shifting
//! the stride.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use regex::Regex;

use crate::types::ClipTransaction;

/// Lowercased header cells that leak into the paste.
const HEADER_WORDS: [&str; 4] = ["date", "description", "category", "amount"];

/// Split pasted text into trimmed, non-empty, non-header lines.
pub fn normalize_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| !HEADER_WORDS.contains(&line.to_lowercase().as_str()))
        .map(str::to_string)
        .collect()
}

fn parse_clip_amount(s: &str) -> Result<f64> {
    s.replace('$', "")
        .replace(',', "")
        .parse::<f64>()
        .with_context(|| format!("unparseable clip amount: {s:?}"))
}

/// Match transactions out of normalized clipboard lines, three at a time.
pub fn parse_transactions(lines: &[String]) -> Result<Vec<ClipTransaction>> {
    let date_re = Regex::new(r"([A-Za-z]{3} \d{2}, \d{4})")?;

    let mut txns = Vec::new();
    let mut i = 0;
    while i + 2 < lines.len() {
        let date_merchant = &lines[i];
        let usaa_category = &lines[i + 1];
        let amount_str = &lines[i + 2];
        i += 3;

        let Some(m) = date_re.find(date_merchant) else {
            continue;
        };
        let date = NaiveDate::parse_from_str(m.as_str(), "%b %d, %Y")
            .with_context(|| format!("unparseable clip date: {:?}", m.as_str()))?;
        // The web table pastes a tab between date and merchant cells; a
        // plain-text paste runs them together.
        let merchant = match date_merchant.split_once('\t') {
            Some((_, rest)) => rest.trim().to_string(),
            None => date_merchant[m.end()..].trim().to_string(),
        };
        // USAA lists spends as positive dollar amounts.
        let amount_usd = -parse_clip_amount(amount_str)?;
        txns.push(ClipTransaction {
            date,
            merchant,
            usaa_category: usaa_category.clone(),
            amount_usd,
        });
    }
    Ok(txns)
}
