use std::error::Error;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use acct_key::{AccountKeys, AcctError};
use clap::Args;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Args, Debug)]
pub struct BatchArgs {
    /// File with one JSON account name per line.
    #[arg(long = "input")]
    pub input: PathBuf,
    /// Destination for JSON records; stdout when omitted.
    #[arg(long)]
    pub output: Option<PathBuf>,
}

/// Result for one input line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchRecord {
    /// Account key of the line.
    pub key: String,
    /// One-based line number in the input file.
    pub line: usize,
    /// Canonical account name.
    pub name: String,
}

pub fn run(args: &BatchArgs, keys: &AccountKeys, threads: usize) -> Result<(), Box<dyn Error>> {
    let text = fs::read_to_string(&args.input)
        .map_err(|err| format!("failed to read {}: {err}", args.input.display()))?;
    let records = process(keys, &text, threads)?;
    tracing::info!(records = records.len(), "batch complete");

    let mut rendered = Vec::new();
    for record in &records {
        serde_json::to_writer(&mut rendered, record)?;
        rendered.push(b'\n');
    }
    match &args.output {
        Some(path) => fs::write(path, rendered)
            .map_err(|err| format!("failed to write {}: {err}", path.display()))?,
        None => io::stdout().lock().write_all(&rendered)?,
    }
    Ok(())
}

/// Derives records for every non-empty line, in input order.
pub fn process(
    keys: &AccountKeys,
    text: &str,
    threads: usize,
) -> Result<Vec<BatchRecord>, Box<dyn Error>> {
    let lines: Vec<(usize, &str)> = text
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
        .collect();
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .map_err(|err| format!("failed to start batch workers: {err}"))?;

    let results: Vec<Result<BatchRecord, AcctError>> = pool.install(|| {
        lines
            .par_iter()
            .map(|&(line, name)| -> Result<BatchRecord, AcctError> {
                let canonical = keys
                    .normalize_name(name)
                    .map_err(|err| err.with_context("line", line.to_string()))?;
                Ok(BatchRecord {
                    key: keys.key_for_text(&canonical).into_string(),
                    line,
                    name: canonical.into_string(),
                })
            })
            .collect()
    });
    // First error in input order wins.
    let records = results.into_iter().collect::<Result<Vec<_>, _>>()?;
    Ok(records)
}
