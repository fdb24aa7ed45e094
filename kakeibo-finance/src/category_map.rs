//! Merchant → category rules loaded from a markdown pipe table.
//!
//! The map file is meant to be edited by hand in the repo root, e.g.:
//!
//! | Pattern      | Category | Notes                    |
//! | ---          | ---      | ---                      |
//! | STARBUCKS*   | Dining   |                          |
//! | AMAZON CO JP | Shopping | confirm household split  |
//!
//! A trailing `*` on a pattern makes it a prefix rule; everything else is an
//! exact match. Rules are applied in file order, first match wins.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Notes containing any of these mark a rule whose category assignment still
/// wants a human check.
const CONFIRM_KEYWORDS: [&str; 4] = ["ask", "confirm", "確認", "should"];

/// One merchant-matching rule from the map table.
#[derive(Debug, Clone, PartialEq)]
pub struct Mapping {
    pub pattern: String,
    pub prefix: bool,
    pub category: String,
    pub notes: String,
}

/// Load rules from a markdown pipe table. Non-table lines and `| ---`
/// separator rows are ignored, as are rows with fewer than three cells.
/// A missing file is an empty rule set, not an error.
pub fn load_mappings(path: &Path) -> Result<Vec<Mapping>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading category map {}", path.display()))?;

    let mut mappings = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if !line.starts_with('|') || line.starts_with("| ---") {
            continue;
        }
        let cols: Vec<&str> = line
            .trim_matches('|')
            .split('|')
            .map(str::trim)
            .collect();
        if cols.len() < 3 {
            continue;
        }
        let (mut pattern, category, notes) = (cols[0].to_string(), cols[1], cols[2]);
        let prefix = pattern.ends_with('*');
        if prefix {
            pattern.pop();
        }
        mappings.push(Mapping {
            pattern,
            prefix,
            category: category.to_string(),
            notes: notes.to_string(),
        });
    }
    Ok(mappings)
}

/// First rule matching the merchant, or None. Prefix rules match by
/// `starts_with`, the rest by equality.
pub fn find_category<'a>(merchant: &str, mappings: &'a [Mapping]) -> Option<&'a Mapping> {
    let merchant = merchant.trim();
    mappings.iter().find(|m| {
        if m.prefix {
            merchant.starts_with(&m.pattern)
        } else {
            merchant == m.pattern
        }
    })
}

/// Whether a matched rule's notes flag the categorization as uncertain.
pub fn needs_confirmation(notes: &str) -> bool {
    let lowered = notes.to_lowercase();
    CONFIRM_KEYWORDS.iter().any(|kw| lowered.contains(kw))
}
