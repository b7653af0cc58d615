use std::{io, path::PathBuf};

use thiserror::Error;

use crate::record::ParseRecordError;

/// Everything that can abort a report run.
///
/// All of these are fatal: the pipeline stops at the first one and nothing
/// further is written.
#[derive(Error, Debug)]
pub enum Error {
    #[error("cannot open sales data {path:?}")]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("reading sales data")]
    SourceRead(#[source] csv::Error),
    #[error("malformed record at line {line}: {content:?}")]
    MalformedRecord {
        line: u64,
        content: String,
        #[source]
        source: ParseRecordError,
    },
    #[error("unknown product code `{0}`")]
    UnknownProduct(String),
    #[error(
        "record for region {region}, salesman {salesman} is outside the ledger ({regions} regions, {salesmen} salesmen)"
    )]
    OutOfRange {
        region: i64,
        salesman: i64,
        regions: u16,
        salesmen: u16,
    },
    #[error("revenue for region {region}, salesman {salesman} is too large to total")]
    RevenueOverflow { region: i64, salesman: i64 },
    #[error("invalid catalog {path:?}: {reason}")]
    InvalidCatalog { path: PathBuf, reason: String },
    #[error("writing report to {sink}")]
    SinkWrite {
        sink: String,
        #[source]
        source: io::Error,
    },
}

impl Error {
    /// Returns the process exit code for this error.
    ///
    /// Each kind of failure gets its own code, so scripts can tell them
    /// apart.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::SourceUnavailable { .. } | Self::SourceRead(_) => 2,
            Self::MalformedRecord { .. } => 3,
            Self::UnknownProduct(_) => 4,
            Self::OutOfRange { .. } => 5,
            Self::InvalidCatalog { .. } => 6,
            Self::SinkWrite { .. } => 7,
            Self::RevenueOverflow { .. } => 8,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
