//! Convert a USAA web-UI clipboard paste into a raw TSV plus a
//! spreadsheet-import ("Numbers") TSV.
//!
//! Both outputs are always written, possibly empty. Exit codes: 0 on
//! success, 1 on usage or structural errors.

use anyhow::{Context, Result};
use clap::Parser;
use kakeibo_ingest::parsers::usaa_clip;
use kakeibo_ingest::types::{CLIP_HEADER, ClipTransaction};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "parse-usaa-clip", version, about = "USAA clipboard paste -> raw + Numbers TSVs")]
struct Cli {
    /// Pasted transaction table (UTF-8 text)
    input: PathBuf,

    /// Raw output TSV (date, merchant, usaa_category, amount_usd)
    raw_output: PathBuf,

    /// Numbers-import output TSV (10 positional columns, no header)
    numbers_output: PathBuf,
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

fn tsv_writer(path: &Path) -> Result<csv::Writer<fs::File>> {
    csv::WriterBuilder::new()
        .delimiter(b'\t')
        .from_path(path)
        .with_context(|| format!("writing {}", path.display()))
}

fn write_raw(txns: &[ClipTransaction], path: &Path) -> Result<()> {
    let mut wtr = tsv_writer(path)?;
    wtr.write_record(CLIP_HEADER)?;
    for txn in txns {
        wtr.write_record(txn.raw_row())?;
    }
    Ok(wtr.flush()?)
}

fn write_numbers(txns: &[ClipTransaction], path: &Path) -> Result<()> {
    let mut wtr = tsv_writer(path)?;
    for txn in txns {
        wtr.write_record(txn.numbers_row())?;
    }
    Ok(wtr.flush()?)
}

fn run(cli: Cli) -> Result<()> {
    let text = fs::read_to_string(&cli.input)
        .with_context(|| format!("reading {}", cli.input.display()))?;
    let lines = usaa_clip::normalize_lines(&text);
    let txns = usaa_clip::parse_transactions(&lines)?;

    write_raw(&txns, &cli.raw_output)?;
    write_numbers(&txns, &cli.numbers_output)?;

    println!(
        "Parsed {} USAA transactions → {}",
        txns.len(),
        cli.numbers_output.display()
    );
    Ok(())
}
