//! Categorize a raw Prestia TSV against the merchant map and emit a
//! spreadsheet-import ("Numbers") TSV.
//!
//! Merchants that match no rule get the review sentinel category and are
//! listed on stderr after the output is written, as are merchants whose rule
//! is flagged for confirmation. Exit codes: 0 on success (even with zero
//! rows), 1 on usage or structural errors.

use anyhow::{Context, Result};
use clap::Parser;
use kakeibo_finance::{find_category, load_mappings, needs_confirmation, numbers_row};
use kakeibo_ingest::types::REVIEW_CATEGORY;
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "prestia-to-numbers", version, about = "Raw Prestia TSV -> Numbers-import TSV")]
struct Cli {
    /// Raw TSV produced by parse-prestia
    input: PathBuf,

    /// Numbers-import output TSV (10 positional columns, no header)
    output: PathBuf,

    /// Merchant category map (markdown pipe table)
    #[arg(long, default_value = "MERCHANT_CATEGORY_MAP.md")]
    map: PathBuf,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() { ExitCode::from(1) } else { ExitCode::SUCCESS };
        }
    };
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(1)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let mappings = load_mappings(&cli.map)?;
    let txns = kakeibo_finance::read_raw_transactions(&cli.input)?;

    let mut unmatched: BTreeSet<String> = BTreeSet::new();
    let mut confirmations: BTreeSet<String> = BTreeSet::new();

    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .from_path(&cli.output)
        .with_context(|| format!("writing {}", cli.output.display()))?;
    for txn in &txns {
        let merchant = txn.merchant.trim().to_string();
        let category = match find_category(&merchant, &mappings) {
            Some(rule) => {
                if needs_confirmation(&rule.notes) {
                    confirmations.insert(merchant.clone());
                }
                rule.category.as_str()
            }
            None => {
                unmatched.insert(merchant.clone());
                REVIEW_CATEGORY
            }
        };
        wtr.write_record(numbers_row(txn, category))?;
    }
    wtr.flush()?;

    if !unmatched.is_empty() {
        let list: Vec<&str> = unmatched.iter().map(String::as_str).collect();
        eprintln!("Unmapped merchants: {list:?}");
    }
    if !confirmations.is_empty() {
        let list: Vec<&str> = confirmations.iter().map(String::as_str).collect();
        eprintln!("Needs confirmation: {list:?}");
    }

    println!("Wrote {} rows to {}", txns.len(), cli.output.display());
    Ok(())
}
