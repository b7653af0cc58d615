use csv::ByteRecord;
use thiserror::Error;

use std::{
    fmt::Display,
    io::Read,
    num::ParseIntError,
    str::{FromStr, Utf8Error},
};

/// One sales transaction: who sold how many units of which product, where.
///
/// The text form is a single comma-separated line:
///
/// ```txt
/// REGION,SALESMAN,PRODUCT_CODE,UNITS
/// ```
///
/// Fields after the fourth are ignored. There is no quoting, so a product
/// code cannot contain a comma. Region and salesman numbers are any integer
/// here; whether they fit the report is decided when the ledger is built.
///
/// # Examples
///
/// ```
/// # use regional_sales::Record;
/// let record: Record = "1,2,12345678A,3".parse().unwrap();
/// assert_eq!(record.region, 1);
/// assert_eq!(record.salesman, 2);
/// assert_eq!(record.product_code, "12345678A");
/// assert_eq!(record.units, 3);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Record {
    pub region: i64,
    pub salesman: i64,
    pub product_code: String,
    pub units: u32,
}

/// Why a line could not be turned into a [`Record`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseRecordError {
    #[error("missing {0} field")]
    MissingField(&'static str),
    #[error("{field} field is not valid UTF-8")]
    NotUtf8 {
        field: &'static str,
        #[source]
        source: Utf8Error,
    },
    #[error("{field} field {value:?} is not an integer in range")]
    InvalidNumber {
        field: &'static str,
        value: String,
        #[source]
        source: ParseIntError,
    },
}

/// Returns a CSV reader for sales lines: no header handling, no quoting,
/// any number of fields, whitespace trimmed.
pub(crate) fn sales_reader<R: Read>(input: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(csv::Trim::All)
        .from_reader(input)
}

fn text<'a>(field: &'static str, value: Option<&'a [u8]>) -> Result<&'a str, ParseRecordError> {
    let value = value.ok_or(ParseRecordError::MissingField(field))?;
    std::str::from_utf8(value)
        .map(str::trim)
        .map_err(|source| ParseRecordError::NotUtf8 { field, source })
}

fn number<T>(field: &'static str, value: Option<&[u8]>) -> Result<T, ParseRecordError>
where
    T: FromStr<Err = ParseIntError>,
{
    let value = text(field, value)?;
    value
        .parse()
        .map_err(|source| ParseRecordError::InvalidNumber {
            field,
            value: value.to_string(),
            source,
        })
}

impl Record {
    /// Builds a record from the fields of one CSV row.
    ///
    /// # Errors
    ///
    /// Returns [`ParseRecordError`] if the row has fewer than four fields,
    /// a field is not UTF-8, or a numeric field is not an integer.
    pub fn from_byte_record(row: &ByteRecord) -> Result<Self, ParseRecordError> {
        let mut fields = row.iter();
        let region = number("region", fields.next())?;
        let salesman = number("salesman", fields.next())?;
        let product_code = text("product code", fields.next())?.to_string();
        let units = number("units", fields.next())?;
        Ok(Self {
            region,
            salesman,
            product_code,
            units,
        })
    }
}

impl FromStr for Record {
    type Err = ParseRecordError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        // Reading from a byte slice cannot fail; an empty line gives an empty row.
        let row = sales_reader(line.as_bytes())
            .byte_records()
            .next()
            .and_then(Result::ok)
            .unwrap_or_default();
        Self::from_byte_record(&row)
    }
}

impl Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{},{},{},{}",
            self.region, self.salesman, self.product_code, self.units
        )
    }
}
