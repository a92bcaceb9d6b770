use std::{
    fmt::Display,
    iter::Sum,
    ops::{Add, AddAssign},
};

use serde::Serialize;

/// Amount of hours spent, stored as whole hundredths of an hour.
///
/// Card spend is rounded exactly once, when the full precision sum of its time entries is
/// converted into [Hours]. Every subtotal afterwards adds hundredths, so nested totals never
/// drift from the sum of their leaves.
///
/// Conversion from hours is range checked and aggregated spend is totalled with
/// [Hours::checked_add], so the plain additions done while building a report can't overflow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Hours(i64);

impl Hours {
    pub const ZERO: Hours = Hours(0);

    /// Largest amount that still converts back to `f64` exactly.
    pub const MAX: Hours = Hours(1 << 53);

    /// Rounds to 2 decimal places, halves away from zero. `None` for amounts beyond [Hours::MAX]
    /// in either direction and for values that aren't finite.
    pub fn try_from_hours(value: f64) -> Option<Self> {
        let hundredths = (value * 100.).round();
        (hundredths.abs() <= Self::MAX.0 as f64).then(|| Hours(hundredths as i64))
    }

    pub fn from_hundredths(hundredths: i64) -> Self {
        Hours(hundredths)
    }

    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Hours)
    }

    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / 100.
    }
}

impl Display for Hours {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

impl Add for Hours {
    type Output = Hours;

    fn add(self, rhs: Self) -> Self::Output {
        Hours(self.0 + rhs.0)
    }
}

impl AddAssign for Hours {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0
    }
}

impl Sum for Hours {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Hours::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Hours> for Hours {
    fn sum<I: Iterator<Item = &'a Hours>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// Serialized as a plain number, so `1.5` hours becomes `1.5` and not `"1.50"`.
impl Serialize for Hours {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_f64(self.as_f64())
    }
}
