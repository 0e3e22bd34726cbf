//! Write a rate table directory
//!
//! Starts from the built-in 2024 tables (or an existing directory), applies any
//! `--set term=value` overrides and writes the CSVs that `--rates` reads.

use anyhow::{bail, Context, Result};
use clap::Parser;
use sg_property_calc::rates::loader::{write_rate_tables, DEFAULT_RATES_PATH};
use sg_property_calc::RateTables;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "export_rates", about = "Write rate tables as CSV")]
struct Args {
    /// Output directory
    #[arg(long, default_value = DEFAULT_RATES_PATH)]
    out: PathBuf,

    /// Start from this directory instead of the built-in tables
    #[arg(long)]
    from: Option<PathBuf>,

    /// Parameter override, e.g. --set sora_3m=3.2 (repeatable)
    #[arg(long = "set", value_name = "TERM=VALUE")]
    overrides: Vec<String>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut tables = match &args.from {
        Some(path) => RateTables::from_csv_path(path)
            .with_context(|| format!("loading rate tables from {}", path.display()))?,
        None => RateTables::singapore_2024(),
    };

    for raw in &args.overrides {
        let Some((term, value)) = raw.split_once('=') else {
            bail!("override '{}' is not TERM=VALUE", raw);
        };
        let value: f64 = value
            .trim()
            .parse()
            .with_context(|| format!("override '{}' has a non-numeric value", raw))?;
        if !tables.apply_parameter(term.trim(), value) {
            bail!("unknown parameter '{}'", term.trim());
        }
    }

    write_rate_tables(&tables, &args.out)
        .with_context(|| format!("writing rate tables to {}", args.out.display()))?;

    println!("Wrote {} tables to {}", tables.version, args.out.display());
    for (term, value) in tables.parameter_terms() {
        println!("  {:<28} {}", term, value);
    }
    Ok(())
}
