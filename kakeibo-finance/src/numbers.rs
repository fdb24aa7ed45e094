//! Conversion of raw Prestia TSV rows into the 10-column spreadsheet-import
//! layout ("Numbers rows").
//!
//! Column layout, positional, no header: blank, M/D date, merchant, payment
//! method, USD amount, JPY amount, note, blank, YYYY-MM month, category.
//! JPY amounts go in their own column as integers; USD amounts keep two
//! decimals and are echoed into the note; any other currency rides in the
//! note only.

use anyhow::{Context, Result, bail};
use chrono::Datelike;
use kakeibo_ingest::StatementTransaction;
use std::path::Path;

/// Read a raw Prestia extraction TSV (header + rows) back into transactions.
pub fn read_raw_transactions(path: &Path) -> Result<Vec<StatementTransaction>> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let mut txns = Vec::new();
    for (idx, result) in rdr.records().enumerate() {
        let record = result?;
        if record.len() < 5 {
            bail!("raw TSV row {} has {} fields, expected 5+", idx + 2, record.len());
        }
        let date = record[1]
            .trim()
            .parse()
            .with_context(|| format!("raw TSV row {}: bad date {:?}", idx + 2, &record[1]))?;
        let amount = record[4]
            .trim()
            .parse()
            .with_context(|| format!("raw TSV row {}: bad amount {:?}", idx + 2, &record[4]))?;
        txns.push(StatementTransaction {
            card_last4: record[0].trim().to_string(),
            date,
            merchant: record[2].trim().to_string(),
            currency: record[3].trim().to_uppercase(),
            amount,
            note: record.get(5).unwrap_or("").trim().to_string(),
        });
    }
    Ok(txns)
}

/// Format one transaction into a Numbers row under the given category label.
pub fn numbers_row(txn: &StatementTransaction, category: &str) -> Vec<String> {
    let mut usd_amount = String::new();
    let mut jpy_amount = String::new();
    let mut note = txn.note.clone();
    match txn.currency.as_str() {
        "JPY" => jpy_amount = format!("{}", txn.amount.round() as i64),
        "USD" => {
            usd_amount = format!("{:.2}", txn.amount);
            note = format!("{note} USD {:.2}", txn.amount).trim().to_string();
        }
        other => {
            note = format!("{note} {other} {:.2}", txn.amount).trim().to_string();
        }
    }
    vec![
        // Column A stays blank for detail rows.
        String::new(),
        format!("{}/{}", txn.date.month(), txn.date.day()),
        txn.merchant.clone(),
        format!("Prestia {}", txn.card_last4),
        usd_amount,
        jpy_amount,
        note,
        String::new(),
        txn.date.format("%Y-%m").to_string(),
        category.to_string(),
    ]
}
