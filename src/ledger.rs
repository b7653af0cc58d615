use log::debug;

use crate::{
    catalog::Catalog,
    error::{Error, Result},
    record::Record,
    rupees::Rupees,
};

/// Accumulated revenue per region and salesman.
///
/// Regions and salesmen are numbered from 1. The grid is dense: every
/// (region, salesman) pair within the dimensions has a cell, starting at
/// zero.
///
/// The grand total is kept as cells are credited and never exceeds
/// `u64::MAX` rupees, so no cell or region total can overflow either.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ledger {
    regions: u16,
    salesmen: u16,
    cells: Vec<Rupees>,
    total: Rupees,
}

impl Ledger {
    /// Creates an all-zero ledger for `regions` regions of `salesmen` salesmen.
    #[must_use]
    pub fn new(regions: u16, salesmen: u16) -> Self {
        Self {
            regions,
            salesmen,
            cells: vec![Rupees::ZERO; usize::from(regions) * usize::from(salesmen)],
            total: Rupees::ZERO,
        }
    }

    #[must_use]
    pub fn regions(&self) -> u16 {
        self.regions
    }

    #[must_use]
    pub fn salesmen(&self) -> u16 {
        self.salesmen
    }

    fn index(&self, region: u16, salesman: u16) -> Option<usize> {
        if !(1..=self.regions).contains(&region) || !(1..=self.salesmen).contains(&salesman) {
            return None;
        }
        Some(usize::from(region - 1) * usize::from(self.salesmen) + usize::from(salesman - 1))
    }

    /// Returns the revenue of `salesman` in `region`, or `None` if either is
    /// outside the ledger.
    #[must_use]
    pub fn get(&self, region: u16, salesman: u16) -> Option<Rupees> {
        self.index(region, salesman).map(|i| self.cells[i])
    }

    /// Returns the revenue of all salesmen in `region`, or `None` if the
    /// region is outside the ledger.
    #[must_use]
    pub fn region_total(&self, region: u16) -> Option<Rupees> {
        if !(1..=self.regions).contains(&region) {
            return None;
        }
        let start = usize::from(region - 1) * usize::from(self.salesmen);
        Some(self.cells[start..start + usize::from(self.salesmen)].iter().sum())
    }

    #[must_use]
    pub fn grand_total(&self) -> Rupees {
        self.total
    }

    fn credit(&mut self, record: &Record, revenue: Rupees) -> Result<()> {
        let i = u16::try_from(record.region)
            .ok()
            .zip(u16::try_from(record.salesman).ok())
            .and_then(|(region, salesman)| self.index(region, salesman))
            .ok_or(Error::OutOfRange {
                region: record.region,
                salesman: record.salesman,
                regions: self.regions,
                salesmen: self.salesmen,
            })?;
        self.total = self
            .total
            .checked_add(revenue)
            .ok_or(Error::RevenueOverflow {
                region: record.region,
                salesman: record.salesman,
            })?;
        // Bounded by the total just checked.
        self.cells[i] += revenue;
        Ok(())
    }
}

/// Totals the revenue of `records` into a new ledger.
///
/// Each record contributes its product's unit price times the units sold to
/// the cell for its region and salesman. The order of `records` does not
/// affect the result.
///
/// # Errors
///
/// Returns [`Error::UnknownProduct`] if a record's product is not in
/// `catalog`, [`Error::OutOfRange`] if its region or salesman number is
/// below 1 or exceeds the ledger dimensions, or [`Error::RevenueOverflow`]
/// if the revenue cannot be represented. The price is looked up first.
///
/// # Examples
///
/// ```
/// # use regional_sales::{aggregate, Catalog, Record, Rupees};
/// let records: Vec<Record> = vec!["1,2,12345678A,3".parse().unwrap()];
/// let ledger = aggregate(&records, &Catalog::standard(), 4, 6).unwrap();
/// assert_eq!(ledger.get(1, 2), Some(Rupees::new(150)));
/// ```
pub fn aggregate(
    records: &[Record],
    catalog: &Catalog,
    regions: u16,
    salesmen: u16,
) -> Result<Ledger> {
    let mut ledger = Ledger::new(regions, salesmen);
    for record in records {
        let revenue = catalog
            .price_of(&record.product_code)?
            .checked_mul(record.units)
            .ok_or(Error::RevenueOverflow {
                region: record.region,
                salesman: record.salesman,
            })?;
        ledger.credit(record, revenue)?;
    }
    debug!(
        "aggregated {} records, total revenue {}",
        records.len(),
        ledger.grand_total()
    );
    Ok(ledger)
}
