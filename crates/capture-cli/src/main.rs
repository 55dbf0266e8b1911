// File: crates/capture-cli/src/main.rs
// Summary: CLI that reads one CSV column, sorts it and prints how many values fall between two targets.

mod form;
mod ingest;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use crate::form::QueryForm;
use crate::ingest::{CsvColumnSource, IngestOptions};

/// Count the values of a CSV column that lie within [TARGET1, TARGET2].
#[derive(Debug, Parser)]
#[command(name = "series-capture", version, about)]
struct Args {
    /// CSV file to read
    csv: String,

    /// Column (header name) holding the readings
    #[arg(short, long)]
    column: String,

    /// Lower bound, inclusive
    #[arg(long, allow_hyphen_values = true)]
    target1: String,

    /// Upper bound, inclusive
    #[arg(long, allow_hyphen_values = true)]
    target2: String,

    /// Field separator
    #[arg(short, long, default_value_t = ';')]
    delimiter: char,

    /// Zero-based line index of the header line
    #[arg(long, default_value_t = 1)]
    header_row: usize,

    /// Rows after the header to drop (units)
    #[arg(long, default_value_t = 1)]
    unit_rows: usize,
}

impl Args {
    fn ingest_options(&self) -> Result<IngestOptions> {
        let delimiter = u8::try_from(self.delimiter)
            .ok()
            .filter(u8::is_ascii)
            .with_context(|| format!("delimiter '{}' must be a single ASCII character", self.delimiter))?;
        Ok(IngestOptions { delimiter, header_row: self.header_row, skip_unit_rows: self.unit_rows })
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let options = args.ingest_options()?;
    info!("reading {} with {:?}", args.csv, options);

    let form = QueryForm {
        path: args.csv,
        column: args.column,
        target1: args.target1,
        target2: args.target2,
    };
    let outcome = form.submit(|path| CsvColumnSource::new(path, options));
    println!("{outcome}");

    if !outcome.is_success() {
        std::process::exit(1);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_station_layout() {
        let args = Args::parse_from(["series-capture", "58220.csv", "-c", "PRESSION", "--target1", "-2000", "--target2", "2000"]);
        assert_eq!(args.target1, "-2000");
        assert_eq!(args.ingest_options().unwrap(), IngestOptions::default());
    }

    #[test]
    fn layout_flags_override_defaults() {
        let args = Args::parse_from([
            "series-capture", "data.csv", "--column", "x", "--target1", "0", "--target2", "1",
            "-d", ",", "--header-row", "0", "--unit-rows", "0",
        ]);
        let opts = args.ingest_options().unwrap();
        assert_eq!(opts, IngestOptions { delimiter: b',', header_row: 0, skip_unit_rows: 0 });
    }

    #[test]
    fn non_ascii_delimiter_is_rejected() {
        let args = Args::parse_from(["series-capture", "a.csv", "-c", "x", "--target1", "0", "--target2", "1", "-d", "§"]);
        assert!(args.ingest_options().is_err());
    }
}
