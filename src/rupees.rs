use anyhow::Context;
use serde_with::DeserializeFromStr;

use std::{
    fmt::{Debug, Display},
    iter::Sum,
    ops::{Add, AddAssign},
    str::FromStr,
};

/// Represents an amount of money in whole rupees.
///
/// There are no fractional units. The [`Display`] implementation uses the
/// report's currency notation, `Rs.150/-`, with no thousands separators.
#[derive(Clone, Copy, Default, DeserializeFromStr, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Rupees(u64);

impl Rupees {
    pub const ZERO: Self = Self(0);

    #[must_use]
    pub const fn new(amount: u64) -> Self {
        Self(amount)
    }

    #[must_use]
    pub const fn amount(self) -> u64 {
        self.0
    }

    /// Returns the revenue of `units` at this unit price, or `None` on
    /// overflow.
    #[must_use]
    pub fn checked_mul(self, units: u32) -> Option<Self> {
        self.0.checked_mul(u64::from(units)).map(Self)
    }

    #[must_use]
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }
}

impl Debug for Rupees {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

impl Display for Rupees {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Rs.{}/-", self.0)
    }
}

/// Accepts either a bare integer (`150`) or the display form (`Rs.150/-`).
impl FromStr for Rupees {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        let digits = s
            .strip_prefix("Rs.")
            .map_or(s, |rest| rest.strip_suffix("/-").unwrap_or(rest));
        let amount = digits
            .parse()
            .with_context(|| format!("invalid rupee amount {s:?}"))?;
        Ok(Self(amount))
    }
}

impl Add for Rupees {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Rupees {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sum for Rupees {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Rupees> for Rupees {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}
