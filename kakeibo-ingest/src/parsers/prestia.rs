//! Prestia (SMBC Trust Bank) statement matcher.
//!
//! Statement text arrives as one decoded string per draw call, so a
//! transaction is spread across consecutive lines:
//!
//!   ****-****-****-1234        <- sets the active card
//!   ...
//!   STARBUCKS #4410            <- merchant (line before the currency code)
//!   JPY                        <- currency code triggers a match
//!   24/01/05                   <- date
//!   1,280                      <- amount (printed positive for spends)
//!
//! The matcher is a cursor state machine: it carries the most recent masked
//! card suffix and, on each known currency code, tries to assemble the
//! merchant/date/amount around it. Anything that does not line up is skipped
//! one line at a time; a date or amount that fails to parse inside a matched
//! block is a structural violation and aborts the run.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use regex::Regex;

use crate::types::StatementTransaction;

/// Currency codes Prestia prints on multi-currency statements.
const CURRENCY_CODES: [&str; 11] = [
    "JPY", "USD", "EUR", "GBP", "AUD", "CAD", "CHF", "CNY", "HKD", "SGD", "KRW",
];

/// Trim decoded strings into match-ready lines: strip carriage returns,
/// trim whitespace, drop empties.
pub fn normalize_lines<S: AsRef<str>>(strings: &[S]) -> Vec<String> {
    strings
        .iter()
        .map(|s| s.as_ref().replace('\r', "").trim().to_string())
        .filter(|line| !line.is_empty())
        .collect()
}

/// Dates appear as YY/MM/DD, occasionally as YYYY/MM/DD.
fn parse_statement_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%y/%m/%d")
        .or_else(|_| NaiveDate::parse_from_str(s, "%Y/%m/%d"))
        .with_context(|| format!("unparseable statement date: {s:?}"))
}

fn parse_statement_amount(s: &str) -> Result<f64> {
    s.replace(',', "")
        .parse::<f64>()
        .with_context(|| format!("unparseable statement amount: {s:?}"))
}

/// Match transactions out of normalized statement lines.
pub fn parse_transactions(lines: &[String]) -> Result<Vec<StatementTransaction>> {
    let masked_re = Regex::new(r"^\*{4}-\*{4}-\*{4}-(\d{4})")?;

    let mut txns = Vec::new();
    let mut card_last4: Option<String> = None;
    let mut i = 0;
    let n = lines.len();
    while i < n {
        let line = &lines[i];
        if let Some(caps) = masked_re.captures(line) {
            card_last4 = Some(caps[1].to_string());
            i += 1;
            continue;
        }
        if CURRENCY_CODES.contains(&line.as_str()) {
            // A currency code at the very start or end of the sequence, or
            // before any card line, cannot anchor a full record.
            let Some(last4) = card_last4.as_ref() else {
                i += 1;
                continue;
            };
            if i == 0 || i + 2 >= n {
                i += 1;
                continue;
            }
            let date = parse_statement_date(&lines[i + 1])?;
            let amount = parse_statement_amount(&lines[i + 2])?;
            txns.push(StatementTransaction {
                card_last4: last4.clone(),
                date,
                merchant: lines[i - 1].clone(),
                currency: line.clone(),
                // Statement prints spends as positive; flip once here.
                amount: -amount,
                note: String::new(),
            });
            i += 3;
            continue;
        }
        i += 1;
    }
    Ok(txns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_normalize_strips_and_drops_empties() {
        let normalized = normalize_lines(&["  JPY \r", "", "  ", "merchant\r\r"]);
        assert_eq!(normalized, vec!["JPY", "merchant"]);
    }

    #[test]
    fn test_single_transaction_with_negated_amount() {
        let txns = parse_transactions(&lines(&[
            "****-****-****-1234",
            "STARBUCKS #4410",
            "JPY",
            "24/01/05",
            "1,280",
        ]))
        .unwrap();
        assert_eq!(txns.len(), 1);
        let txn = &txns[0];
        assert_eq!(txn.card_last4, "1234");
        assert_eq!(txn.merchant, "STARBUCKS #4410");
        assert_eq!(txn.currency, "JPY");
        assert_eq!(txn.date, NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
        assert_eq!(txn.amount, -1280.0);
    }

    #[test]
    fn test_refund_becomes_positive() {
        let txns = parse_transactions(&lines(&[
            "****-****-****-1234",
            "AMAZON REFUND",
            "JPY",
            "24/02/10",
            "-3,500",
        ]))
        .unwrap();
        assert_eq!(txns[0].amount, 3500.0);
    }

    #[test]
    fn test_currency_without_card_is_skipped() {
        let txns = parse_transactions(&lines(&["SOME SHOP", "JPY", "24/01/05", "100"])).unwrap();
        assert!(txns.is_empty());
    }

    #[test]
    fn test_currency_at_sequence_edges_is_skipped() {
        // First line: no merchant before it.
        let txns =
            parse_transactions(&lines(&["JPY", "****-****-****-9999", "x", "y"])).unwrap();
        assert!(txns.is_empty());
        // Too close to the end: no date/amount after it.
        let txns =
            parse_transactions(&lines(&["****-****-****-9999", "SHOP", "JPY", "24/01/05"]))
                .unwrap();
        assert!(txns.is_empty());
    }

    #[test]
    fn test_card_switch_applies_to_later_matches() {
        let txns = parse_transactions(&lines(&[
            "****-****-****-1111",
            "SHOP A",
            "JPY",
            "24/01/05",
            "100",
            "****-****-****-2222",
            "SHOP B",
            "USD",
            "24/01/06",
            "20.50",
        ]))
        .unwrap();
        assert_eq!(txns.len(), 2);
        assert_eq!(txns[0].card_last4, "1111");
        assert_eq!(txns[1].card_last4, "2222");
        assert_eq!(txns[1].currency, "USD");
        assert_eq!(txns[1].amount, -20.50);
    }

    #[test]
    fn test_two_and_four_digit_years_agree() {
        let short = parse_transactions(&lines(&[
            "****-****-****-1234",
            "SHOP",
            "JPY",
            "24/01/05",
            "100",
        ]))
        .unwrap();
        let long = parse_transactions(&lines(&[
            "****-****-****-1234",
            "SHOP",
            "JPY",
            "2024/01/05",
            "100",
        ]))
        .unwrap();
        assert_eq!(short[0].date, long[0].date);
    }

    #[test]
    fn test_bad_date_in_matched_block_is_fatal() {
        let result = parse_transactions(&lines(&[
            "****-****-****-1234",
            "SHOP",
            "JPY",
            "not-a-date",
            "100",
        ]));
        assert!(result.is_err());
    }

    #[test]
    fn test_bad_amount_in_matched_block_is_fatal() {
        let result = parse_transactions(&lines(&[
            "****-****-****-1234",
            "SHOP",
            "JPY",
            "24/01/05",
            "1,2x0",
        ]));
        assert!(result.is_err());
    }

    #[test]
    fn test_surrounding_noise_ignored() {
        let txns = parse_transactions(&lines(&[
            "ご利用明細",
            "****-****-****-1234",
            "page 1 of 3",
            "STARBUCKS #4410",
            "JPY",
            "24/01/05",
            "1,280",
            "total",
        ]))
        .unwrap();
        assert_eq!(txns.len(), 1);
        assert_eq!(txns[0].merchant, "STARBUCKS #4410");
    }

    #[test]
    fn test_cursor_advances_past_consumed_triplet() {
        // The amount line "100" must not be re-examined as a merchant for a
        // following currency line.
        let txns = parse_transactions(&lines(&[
            "****-****-****-1234",
            "SHOP A",
            "JPY",
            "24/01/05",
            "100",
            "SHOP B",
            "JPY",
            "24/01/06",
            "200",
        ]))
        .unwrap();
        assert_eq!(txns.len(), 2);
        assert_eq!(txns[1].merchant, "SHOP B");
    }
}
