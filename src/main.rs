use std::{path::PathBuf, process::ExitCode};

use anyhow::{Context, Result};
use clap::Parser;
use log::error;
use regional_sales::{Config, Error};

/// Totals sales records by region and salesman, and prints a paged revenue
/// report to the terminal and to a file.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// CSV file of sales records; the first line is a header
    #[arg(default_value = "./input_data_1.csv")]
    input: PathBuf,
    /// File to write the report to
    #[arg(default_value = "./output.txt")]
    output: PathBuf,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::from(e.downcast_ref::<Error>().map_or(1, Error::exit_code))
        }
    }
}

fn run(args: Args) -> Result<()> {
    let config = Config {
        input: args.input,
        output: args.output,
        ..Config::default()
    };
    regional_sales::run(&config)
        .with_context(|| format!("reporting sales from {}", config.input.display()))?;
    Ok(())
}
