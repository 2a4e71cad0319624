use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Horizon over which interest accrual is simulated.
///
/// # Examples
///
/// ```
/// use tranche_waterfall::core::period::TimePeriod;
/// use rust_decimal::Decimal;
///
/// let period: TimePeriod = "3months".parse().unwrap();
/// assert_eq!(period, TimePeriod::ThreeMonths);
/// assert_eq!(period.years() * Decimal::from(4), Decimal::ONE);
/// assert_eq!(period.label(), "3 Months");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimePeriod {
    #[serde(rename = "1week")]
    OneWeek,
    #[default]
    #[serde(rename = "1month")]
    OneMonth,
    #[serde(rename = "3months")]
    ThreeMonths,
    #[serde(rename = "1year")]
    OneYear,
}

/// Errors arising from parsing a time period token.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PeriodParseError {
    #[error("unknown time period '{0}' (expected 1week, 1month, 3months or 1year)")]
    Unknown(String),
}

impl TimePeriod {
    pub fn all() -> [TimePeriod; 4] {
        [
            TimePeriod::OneWeek,
            TimePeriod::OneMonth,
            TimePeriod::ThreeMonths,
            TimePeriod::OneYear,
        ]
    }

    /// Length of the period as a fraction of a year.
    pub fn years(&self) -> Decimal {
        match self {
            TimePeriod::OneWeek => Decimal::ONE / Decimal::from(52),
            TimePeriod::OneMonth => Decimal::ONE / Decimal::from(12),
            TimePeriod::ThreeMonths => Decimal::from(3) / Decimal::from(12),
            TimePeriod::OneYear => Decimal::ONE,
        }
    }

    /// Human readable label.
    pub fn label(&self) -> &'static str {
        match self {
            TimePeriod::OneWeek => "1 Week",
            TimePeriod::OneMonth => "1 Month",
            TimePeriod::ThreeMonths => "3 Months",
            TimePeriod::OneYear => "1 Year",
        }
    }

    /// Token used on the wire and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            TimePeriod::OneWeek => "1week",
            TimePeriod::OneMonth => "1month",
            TimePeriod::ThreeMonths => "3months",
            TimePeriod::OneYear => "1year",
        }
    }
}

impl fmt::Display for TimePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TimePeriod {
    type Err = PeriodParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TimePeriod::all()
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| PeriodParseError::Unknown(s.to_string()))
    }
}
