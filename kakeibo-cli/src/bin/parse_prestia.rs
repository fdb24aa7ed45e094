//! Extract transaction lines from a Prestia (SMBC Trust Bank) PDF statement
//! into a raw tab-delimited file.
//!
//! Exit codes: 0 on success, 1 on usage or structural errors, 2 when the PDF
//! parsed mechanically but contained no transactions (nothing is written).

use anyhow::{Context, Result};
use clap::Parser;
use kakeibo_ingest::parsers::prestia;
use kakeibo_ingest::types::STATEMENT_HEADER;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "parse-prestia", version, about = "Prestia PDF statement -> raw TSV")]
struct Cli {
    /// Path to the PDF statement
    input: PathBuf,

    /// Output TSV path (card_last4, date, merchant, currency, amount, note)
    output: PathBuf,
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
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(1)
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let pdf = fs::read(&cli.input).with_context(|| format!("reading {}", cli.input.display()))?;
    let extracted = kakeibo_pdf::extract_text(&pdf)?;
    if extracted.skipped_streams > 0 {
        eprintln!("Skipped {} non-text stream(s)", extracted.skipped_streams);
    }

    let lines = prestia::normalize_lines(&extracted.lines);
    let txns = prestia::parse_transactions(&lines)?;
    if txns.is_empty() {
        eprintln!("No transactions parsed");
        return Ok(ExitCode::from(2));
    }

    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .from_path(&cli.output)
        .with_context(|| format!("writing {}", cli.output.display()))?;
    wtr.write_record(STATEMENT_HEADER)?;
    for txn in &txns {
        wtr.write_record(txn.to_row())?;
    }
    wtr.flush()?;

    let name = cli
        .input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| cli.input.display().to_string());
    println!("Parsed {} transactions from {}", txns.len(), name);
    Ok(ExitCode::SUCCESS)
}
