use csv::ByteRecord;
use log::debug;

use std::{fs::File, io::Read, path::Path};

use crate::{
    error::{Error, Result},
    record::{sales_reader, Record},
};

/// Reads every sales record from the file at `path`.
///
/// See [`read_records`] for the format.
///
/// # Errors
///
/// Returns [`Error::SourceUnavailable`] if the file cannot be opened, and
/// any error from [`read_records`].
pub fn read_all(path: impl AsRef<Path>) -> Result<Vec<Record>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| Error::SourceUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    let records = read_records(file)?;
    debug!("read {} records from {}", records.len(), path.display());
    Ok(records)
}

fn is_blank(row: &ByteRecord) -> bool {
    row.len() == 1 && row[0].is_empty()
}

fn content(row: &ByteRecord) -> String {
    row.iter()
        .map(String::from_utf8_lossy)
        .collect::<Vec<_>>()
        .join(",")
}

/// Reads every sales record from `input`, in order.
///
/// The first line is a header and is always discarded unread, whatever it
/// contains (it need not even be UTF-8). An empty input therefore yields no
/// records. Blank lines are skipped; every other line must parse as a
/// [`Record`].
///
/// # Errors
///
/// Returns [`Error::MalformedRecord`] for the first line that does not parse,
/// or [`Error::SourceRead`] if reading fails.
pub fn read_records(input: impl Read) -> Result<Vec<Record>> {
    let mut records = Vec::new();
    for row in sales_reader(input).byte_records() {
        let row = row.map_err(Error::SourceRead)?;
        let line = row.position().map_or(0, |pos| pos.line());
        if line == 1 || is_blank(&row) {
            continue;
        }
        let record = Record::from_byte_record(&row).map_err(|source| Error::MalformedRecord {
            line,
            content: content(&row),
            source,
        })?;
        records.push(record);
    }
    Ok(records)
}
