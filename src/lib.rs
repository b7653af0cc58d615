#![doc = include_str!("../README.md")]
use chrono::Local;
use log::info;

use std::path::PathBuf;

mod catalog;
mod error;
mod ledger;
mod record;
mod report;
mod rupees;
mod source;

pub use catalog::{Catalog, STANDARD_PRICES};
pub use error::{Error, Result};
pub use ledger::{aggregate, Ledger};
pub use record::{ParseRecordError, Record};
pub use report::{Line, Report, Sink, Style, Styled};
pub use rupees::Rupees;
pub use source::{read_all, read_records};

/// Everything a report run needs to know.
///
/// [`Config::default`] gives the standard setup: "ABC Company", four
/// regions of six salesmen each, the standard [`Catalog`], reading
/// `./input_data_1.csv` and writing `./output.txt`.
#[derive(Clone, Debug)]
pub struct Config {
    pub company: String,
    pub regions: u16,
    pub salesmen: u16,
    pub catalog: Catalog,
    pub input: PathBuf,
    pub output: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            company: "ABC Company".to_string(),
            regions: 4,
            salesmen: 6,
            catalog: Catalog::standard(),
            input: PathBuf::from("./input_data_1.csv"),
            output: PathBuf::from("./output.txt"),
        }
    }
}

/// Reads the sales data named by `config` and totals it into a ledger.
///
/// # Errors
///
/// Returns any error from [`read_all`] or [`aggregate`].
pub fn load_ledger(config: &Config) -> Result<Ledger> {
    let records = read_all(&config.input)?;
    aggregate(&records, &config.catalog, config.regions, config.salesmen)
}

/// Runs the whole pipeline: reads and totals the sales data, then writes
/// the report to standard output and to the output file.
///
/// The output file is only created once the data has been totalled, so a
/// bad input never clobbers a previous report.
///
/// # Errors
///
/// Returns any error from [`load_ledger`], [`Sink::create_file`], or
/// [`Report::emit`].
pub fn run(config: &Config) -> Result<Report> {
    let ledger = load_ledger(config)?;
    let report = Report::render(&ledger, &config.company, Local::now().naive_local());
    let mut sinks = [Sink::stdout(), Sink::create_file(&config.output)?];
    report.emit(&mut sinks)?;
    info!(
        "reported {} across {} regions to {}",
        ledger.grand_total(),
        ledger.regions(),
        config.output.display()
    );
    Ok(report)
}
