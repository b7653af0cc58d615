use serde::Deserialize;

use std::{collections::BTreeMap, path::Path};

use crate::{
    error::{Error, Result},
    rupees::Rupees,
};

/// Unit prices of the standard product range.
pub const STANDARD_PRICES: [(&str, u64); 8] = [
    ("12345678A", 50),
    ("54326778B", 100),
    ("23679812C", 200),
    ("65478321D", 400),
    ("87678943E", 250),
    ("76579940F", 150),
    ("32671898G", 300),
    ("74526829H", 500),
];

/// Maps product codes to unit prices.
///
/// Use [`Catalog::standard`] for the company price list, or build a custom
/// one from `(code, price)` pairs with [`FromIterator`] or from a file with
/// [`Catalog::read_csv`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Catalog {
    prices: BTreeMap<String, Rupees>,
}

#[derive(Debug, Deserialize)]
struct Entry {
    code: String,
    price: Rupees,
}

impl Catalog {
    /// Creates the catalog of the standard product range.
    #[must_use]
    pub fn standard() -> Self {
        STANDARD_PRICES
            .iter()
            .map(|&(code, price)| (code, Rupees::new(price)))
            .collect()
    }

    /// Reads a catalog from the CSV file at `path`.
    ///
    /// The file must have a `code,price` header, followed by one product per
    /// line:
    ///
    /// ```txt
    /// code,price
    /// 12345678A,50
    /// 54326778B,Rs.100/-
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCatalog`] if:
    /// * The file cannot be opened or read
    /// * A line does not have a code and a whole-rupee price
    /// * The same code appears twice
    pub fn read_csv(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let invalid = |reason: String| Error::InvalidCatalog {
            path: path.to_path_buf(),
            reason,
        };
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(|e| invalid(e.to_string()))?;
        let mut catalog = Self::default();
        for result in rdr.deserialize() {
            let entry: Entry = result.map_err(|e| invalid(e.to_string()))?;
            if catalog.prices.contains_key(&entry.code) {
                return Err(invalid(format!("duplicate product code {}", entry.code)));
            }
            catalog.prices.insert(entry.code, entry.price);
        }
        Ok(catalog)
    }

    /// Returns the unit price of product `code`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownProduct`] if `code` is not in the catalog.
    ///
    /// # Examples
    ///
    /// ```
    /// # use regional_sales::{Catalog, Rupees};
    /// let catalog = Catalog::standard();
    /// assert_eq!(catalog.price_of("12345678A").unwrap(), Rupees::new(50));
    /// assert!(catalog.price_of("ZZZZZZZZZ").is_err());
    /// ```
    pub fn price_of(&self, code: &str) -> Result<Rupees> {
        self.prices
            .get(code)
            .copied()
            .ok_or_else(|| Error::UnknownProduct(code.to_string()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, Rupees)> for Catalog {
    fn from_iter<I: IntoIterator<Item = (S, Rupees)>>(iter: I) -> Self {
        Self {
            prices: iter
                .into_iter()
                .map(|(code, price)| (code.into(), price))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_fn_installs_the_company_price_list() {
        let catalog = Catalog::standard();
        assert_eq!(catalog.len(), 8);
        assert_eq!(catalog.price_of("12345678A").unwrap(), Rupees::new(50));
        assert_eq!(catalog.price_of("65478321D").unwrap(), Rupees::new(400));
        assert_eq!(catalog.price_of("74526829H").unwrap(), Rupees::new(500));
    }

    #[test]
    fn price_of_fn_returns_error_for_unknown_code() {
        let catalog = Catalog::standard();
        assert!(matches!(
            catalog.price_of("ZZZZZZZZZ"),
            Err(Error::UnknownProduct(code)) if code == "ZZZZZZZZZ"
        ));
        assert!(catalog.price_of("12345678a").is_err());
    }

    #[test]
    fn from_iter_builds_substitute_catalog() {
        let catalog: Catalog = [("X", Rupees::new(7))].into_iter().collect();
        assert_eq!(catalog.price_of("X").unwrap(), Rupees::new(7));
        assert!(catalog.price_of("12345678A").is_err());
    }

    #[test]
    fn read_csv_fn_correctly_parses_catalog_file() {
        let catalog = Catalog::read_csv("testdata/catalog.csv").unwrap();
        assert_eq!(catalog, Catalog::standard());
    }

    #[test]
    fn read_csv_fn_returns_error_for_bad_price() {
        assert!(matches!(
            Catalog::read_csv("testdata/catalog.bad.csv"),
            Err(Error::InvalidCatalog { .. })
        ));
    }

    #[test]
    fn read_csv_fn_returns_error_for_duplicate_code() {
        match Catalog::read_csv("testdata/catalog.dup.csv") {
            Err(Error::InvalidCatalog { reason, .. }) => {
                assert!(reason.contains("12345678A"), "{reason}");
            }
            other => panic!("expected invalid catalog error, got {other:?}"),
        }
    }

    #[test]
    fn read_csv_fn_returns_error_for_missing_file() {
        assert!(Catalog::read_csv("testdata/no_such_catalog.csv").is_err());
    }
}
